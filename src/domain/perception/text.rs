//! Text recognition (OCR) results

use serde::Deserialize;
use serde_json::{Value, json};

use super::normalize::Normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// One recognized text span and the polygon enclosing it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextAnnotation {
    pub description: String,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextRecognitionResult {
    pub text: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub full_information: Vec<TextAnnotation>,
}

impl Normalize for Vertex {
    fn normalize(&self) -> Value {
        json!({"x": self.x, "y": self.y})
    }
}

impl Normalize for TextAnnotation {
    fn normalize(&self) -> Value {
        json!({
            "description": self.description,
            "bounding_poly": {
                "vertices": self.bounding_poly.vertices.normalize(),
            },
        })
    }
}

impl Normalize for TextRecognitionResult {
    fn normalize(&self) -> Value {
        json!({
            "text": self.text,
            "locale": self.locale,
            "full_information": self.full_information.normalize(),
        })
    }
}
