//! Configuration for the default settings encoder

use serde::Deserialize;

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum array/object nesting depth a value may have to be encodable
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Emit indented text instead of compact text
    #[serde(default)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            pretty: false,
        }
    }
}

/// Deepest document serde_json will decode again
fn default_max_depth() -> usize {
    127
}
