//! Object detection results

use serde::Deserialize;
use serde_json::{Value, json};

use super::normalize::{Normalize, number};

/// A label attached to a detected object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedCategory {
    pub category_name: String,
    pub confidence: f64,
}

/// Axis-aligned box in pixel coordinates
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedObject {
    #[serde(default)]
    pub detected_categories: Vec<DetectedCategory>,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectDetectionResult {
    #[serde(default)]
    pub object_names: Vec<String>,
    #[serde(default)]
    pub detected_objects: Vec<DetectedObject>,
}

impl Normalize for DetectedCategory {
    fn normalize(&self) -> Value {
        json!({
            "category_name": self.category_name,
            "confidence": number(self.confidence),
        })
    }
}

impl Normalize for BoundingBox {
    fn normalize(&self) -> Value {
        json!({
            "origin_x": number(self.origin_x),
            "origin_y": number(self.origin_y),
            "width": number(self.width),
            "height": number(self.height),
        })
    }
}

impl Normalize for DetectedObject {
    fn normalize(&self) -> Value {
        json!({
            "detected_categories": self.detected_categories.normalize(),
            "bounding_box": self.bounding_box.normalize(),
        })
    }
}

impl Normalize for ObjectDetectionResult {
    fn normalize(&self) -> Value {
        json!({
            "object_names": self.object_names,
            "detected_objects": self.detected_objects.normalize(),
        })
    }
}
