//! Domain layer - the settings container and its encoding capability

pub mod coercion;
pub mod encoder;
pub mod settings;

pub use encoder::{Encoder, EncodingError, JsonEncoder};
pub use settings::Settings;
