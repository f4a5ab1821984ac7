//! Value-to-text encoding capability
//!
//! The container never formats text itself. It is handed an [`Encoder`] and
//! uses it both to validate values on `set` and to compare documents in
//! `equals`, so the encoder's formatting rules define equality.

use crate::config::Config;
pub use crate::contract::EncodingError;
use serde_json::Value;

/// Converts a value into interchange text
pub trait Encoder: Send + Sync {
    /// Encode `value`, failing if it is not representable
    fn encode(&self, value: &Value) -> Result<String, EncodingError>;
}

/// JSON encoder backed by serde_json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncoder {
    max_depth: usize,
    pretty: bool,
}

impl JsonEncoder {
    pub fn new(max_depth: usize, pretty: bool) -> Self {
        Self { max_depth, pretty }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_depth, config.pretty)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<String, EncodingError> {
        if exceeds_depth(value, self.max_depth) {
            return Err(EncodingError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| EncodingError::Serialization(e.to_string()))
    }
}

/// Whether `value` nests arrays/objects deeper than `max_depth` levels.
/// Recursion stops as soon as the budget runs out.
fn exceeds_depth(value: &Value, max_depth: usize) -> bool {
    match value {
        Value::Array(items) => {
            max_depth == 0 || items.iter().any(|v| exceeds_depth(v, max_depth - 1))
        }
        Value::Object(map) => {
            max_depth == 0 || map.values().any(|v| exceeds_depth(v, max_depth - 1))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(levels: usize) -> Value {
        let mut value = json!(1);
        for _ in 0..levels {
            value = json!([value]);
        }
        value
    }

    #[test]
    fn test_encodes_compact_json() {
        let encoder = JsonEncoder::default();
        let text = encoder.encode(&json!({"b": [1, 2], "a": null})).unwrap();
        assert_eq!(text, r#"{"b":[1,2],"a":null}"#);
    }

    #[test]
    fn test_encodes_pretty_json() {
        let encoder = JsonEncoder::new(8, true);
        let text = encoder.encode(&json!({"a": 1})).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_scalars_have_no_depth() {
        let encoder = JsonEncoder::new(0, false);
        assert_eq!(encoder.encode(&json!("x")).unwrap(), "\"x\"");
        assert!(encoder.encode(&json!([])).is_err());
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let encoder = JsonEncoder::new(3, false);
        assert!(encoder.encode(&nested(3)).is_ok());
        assert_eq!(
            encoder.encode(&nested(4)),
            Err(EncodingError::DepthExceeded { max_depth: 3 })
        );
    }

    #[test]
    fn test_objects_count_towards_depth() {
        let encoder = JsonEncoder::new(2, false);
        assert!(encoder.encode(&json!({"a": {"b": 1}})).is_ok());
        assert!(encoder.encode(&json!({"a": {"b": [1]}})).is_err());
    }

    #[test]
    fn test_default_output_decodes_again() {
        let text = JsonEncoder::default().encode(&nested(127)).unwrap();
        let decoded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, nested(127));
    }

    #[test]
    fn test_default_depth_matches_config() {
        assert_eq!(JsonEncoder::default().max_depth(), 127);
        assert!(JsonEncoder::default().encode(&nested(127)).is_ok());
        assert!(JsonEncoder::default().encode(&nested(128)).is_err());
    }
}
