//! Engine configuration bundle passed to engine constructors

use serde::Serialize;
use serde_json::{Map, Value};

/// Opaque configuration handed to an engine at construction time.
///
/// Callers send it as a JSON-encoded string. A string that parses to a JSON
/// object becomes a [`EngineConfigurations::Mapping`]; anything else (invalid
/// JSON, or JSON that is not an object) is kept verbatim as
/// [`EngineConfigurations::Raw`]. Parsing never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineConfigurations {
    Mapping(Map<String, Value>),
    Raw(String),
}

impl EngineConfigurations {
    /// Parse a JSON-encoded configuration string, falling back to the raw string
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::Mapping(map),
            _ => Self::Raw(raw.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Mapping(map) => Value::Object(map.clone()),
            Self::Raw(raw) => Value::String(raw.clone()),
        }
    }
}

impl Default for EngineConfigurations {
    fn default() -> Self {
        Self::Mapping(Map::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_object() {
        let config = EngineConfigurations::parse(r#"{"a":"1"}"#);
        let mut expected = Map::new();
        expected.insert("a".to_string(), json!("1"));
        assert_eq!(config, EngineConfigurations::Mapping(expected));
    }

    #[test]
    fn test_parse_invalid_json_falls_back_to_raw() {
        let config = EngineConfigurations::parse("not-json");
        assert_eq!(config, EngineConfigurations::Raw("not-json".to_string()));
    }

    #[test]
    fn test_parse_non_object_json_is_raw() {
        let config = EngineConfigurations::parse("[1, 2]");
        assert_eq!(config, EngineConfigurations::Raw("[1, 2]".to_string()));
    }

    #[test]
    fn test_parse_empty_string_is_raw() {
        assert_eq!(
            EngineConfigurations::parse(""),
            EngineConfigurations::Raw(String::new())
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let mapping = EngineConfigurations::parse(r#"{"a":"1"}"#);
        assert_eq!(serde_json::to_value(&mapping).unwrap(), json!({"a": "1"}));

        let raw = EngineConfigurations::parse("not-json");
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("not-json"));
    }
}
