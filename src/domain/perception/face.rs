//! Face recognition results

use serde::Deserialize;
use serde_json::Value;

use super::normalize::Normalize;

/// Names of the people recognized in an image, in engine order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RecognizedFaces(pub Vec<String>);

impl RecognizedFaces {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Normalize for RecognizedFaces {
    fn normalize(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_names() {
        let faces = RecognizedFaces(vec!["alice".to_string(), "unknown".to_string()]);
        assert_eq!(faces.normalize(), json!(["alice", "unknown"]));
    }

    #[test]
    fn test_deserialize_from_array() {
        let faces: RecognizedFaces = serde_json::from_value(json!(["bob"])).unwrap();
        assert_eq!(faces.names(), &["bob".to_string()]);
    }
}
