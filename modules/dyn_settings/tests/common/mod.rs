//! Common test utilities and fake encoders
#![allow(dead_code)]

use dyn_settings::{Encoder, EncodingError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Encoder that refuses any value containing a given string anywhere
pub struct RejectingEncoder {
    pub marker: String,
}

impl RejectingEncoder {
    pub fn new(marker: &str) -> Arc<Self> {
        Arc::new(Self {
            marker: marker.to_string(),
        })
    }

    fn contains_marker(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => s == &self.marker,
            Value::Array(items) => items.iter().any(|v| self.contains_marker(v)),
            Value::Object(map) => map.values().any(|v| self.contains_marker(v)),
            _ => false,
        }
    }
}

impl Encoder for RejectingEncoder {
    fn encode(&self, value: &Value) -> Result<String, EncodingError> {
        if self.contains_marker(value) {
            return Err(EncodingError::Rejected(format!(
                "value contains '{}'",
                self.marker
            )));
        }
        Ok(value.to_string())
    }
}

/// Encoder that renders every number as the same token
///
/// Used to show that equality follows whatever the encoder produces.
pub struct NumberBlindEncoder;

impl Encoder for NumberBlindEncoder {
    fn encode(&self, value: &Value) -> Result<String, EncodingError> {
        Ok(blind(value))
    }
}

fn blind(value: &Value) -> String {
    match value {
        Value::Number(_) => "#".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(blind).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), blind(v)))
                .collect();
            format!("{{{}}}", parts.join(","))
        }
        other => other.to_string(),
    }
}

/// Encoder that counts how often it is asked to encode
#[derive(Default)]
pub struct CountingEncoder {
    calls: AtomicUsize,
}

impl CountingEncoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Encoder for CountingEncoder {
    fn encode(&self, value: &Value) -> Result<String, EncodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_string())
    }
}
