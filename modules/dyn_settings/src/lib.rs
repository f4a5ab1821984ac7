//! Dynamic Settings
//!
//! A dynamically-keyed settings container for configuration whose shape is
//! only known at runtime. Values are JSON values validated by an injected
//! encoder when they are set; the container renders itself as a key-sorted
//! canonical document and compares by that rendering.

// Public exports
pub mod contract;
pub use contract::{SettingsError, ValueKind};

pub mod domain;
pub use domain::{Encoder, EncodingError, JsonEncoder, Settings};

pub mod config;
pub use config::Config;
