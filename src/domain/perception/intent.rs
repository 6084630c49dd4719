//! Intent recognition results

use serde::Deserialize;
use serde_json::{Value, json};

use super::normalize::{Normalize, number};

/// A slot value extracted alongside an intent
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizedEntity {
    pub entity_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizedIntent {
    pub intent: String,
    #[serde(default)]
    pub entities: Vec<RecognizedEntity>,
    #[serde(default)]
    pub confidence: f64,
    /// Whether the utterance was addressed to the drone
    #[serde(default)]
    pub addressed_to: bool,
}

impl Normalize for RecognizedEntity {
    fn normalize(&self) -> Value {
        json!({
            "entity_type": self.entity_type,
            "value": self.value,
        })
    }
}

impl Normalize for RecognizedIntent {
    fn normalize(&self) -> Value {
        json!({
            "intent": self.intent,
            "entities": self.entities.normalize(),
            "confidence": number(self.confidence),
            "addressed_to": self.addressed_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_intent() {
        let intent = RecognizedIntent {
            intent: "TAKE_OFF".to_string(),
            entities: vec![RecognizedEntity {
                entity_type: "distance".to_string(),
                value: "2m".to_string(),
            }],
            confidence: 0.5,
            addressed_to: true,
        };

        assert_eq!(
            intent.normalize(),
            json!({
                "intent": "TAKE_OFF",
                "entities": [{"entity_type": "distance", "value": "2m"}],
                "confidence": 0.5,
                "addressed_to": true
            })
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let intent: RecognizedIntent =
            serde_json::from_value(json!({"intent": "LAND"})).unwrap();
        assert_eq!(intent.intent, "LAND");
        assert!(intent.entities.is_empty());
        assert!(!intent.addressed_to);
    }
}
