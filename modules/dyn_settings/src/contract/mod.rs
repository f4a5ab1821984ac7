//! Contract layer - public error and model types
//!
//! These types are shared by every caller of the container and carry no
//! behavior beyond classification and formatting.

pub mod error;
pub mod model;

pub use error::{EncodingError, SettingsError};
pub use model::ValueKind;
