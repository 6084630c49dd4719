//! Hand gesture recognition results

use serde::Deserialize;
use serde_json::{Value, json};

use super::normalize::{Normalize, number, optional_number};

/// A classification label with its score
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub index: i64,
    pub score: f64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// A hand keypoint; normalized image coordinates or world coordinates in metres
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub presence: Option<f64>,
}

/// Per-hand gesture output; every outer list has one entry per detected hand
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GestureRecognitionResult {
    #[serde(default)]
    pub gestures: Vec<Vec<Category>>,
    #[serde(default)]
    pub handedness: Vec<Vec<Category>>,
    #[serde(default)]
    pub hand_landmarks: Vec<Vec<Landmark>>,
    #[serde(default)]
    pub hand_world_landmarks: Vec<Vec<Landmark>>,
}

impl Normalize for Category {
    fn normalize(&self) -> Value {
        json!({
            "index": self.index,
            "score": number(self.score),
            "display_name": self.display_name,
            "category_name": self.category_name,
        })
    }
}

impl Normalize for Landmark {
    fn normalize(&self) -> Value {
        json!({
            "x": number(self.x),
            "y": number(self.y),
            "z": number(self.z),
            "visibility": optional_number(self.visibility),
            "presence": optional_number(self.presence),
        })
    }
}

impl Normalize for GestureRecognitionResult {
    fn normalize(&self) -> Value {
        json!({
            "gestures": self.gestures.normalize(),
            "handedness": self.handedness.normalize(),
            "hand_landmarks": self.hand_landmarks.normalize(),
            "hand_world_landmarks": self.hand_world_landmarks.normalize(),
        })
    }
}
