//! Settings container
//!
//! A string-keyed bag of JSON values. Every value goes through the injected
//! [`Encoder`] before it is stored, so an instance only ever holds values the
//! encoder can render. The container renders itself as a canonical document
//! with its top-level keys sorted; equality is defined on that rendering.

use super::coercion;
use super::encoder::{Encoder, EncodingError, JsonEncoder};
use crate::config::Config;
use crate::contract::{SettingsError, ValueKind};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Validated, dynamically-keyed settings
#[derive(Clone)]
pub struct Settings {
    /// Stored values in insertion order
    entries: IndexMap<String, Value>,
    encoder: Arc<dyn Encoder>,
}

impl Settings {
    /// Create empty settings with the default [`JsonEncoder`]
    pub fn new() -> Self {
        Self::with_encoder(Arc::new(JsonEncoder::default()))
    }

    /// Create empty settings validated by `encoder`
    pub fn with_encoder(encoder: Arc<dyn Encoder>) -> Self {
        Self {
            entries: IndexMap::new(),
            encoder,
        }
    }

    /// Create empty settings with a [`JsonEncoder`] built from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::with_encoder(Arc::new(JsonEncoder::from_config(config)))
    }

    /// Build settings from `(name, value)` pairs, setting each in order
    pub fn from_entries<I, K>(entries: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::from_entries_with_encoder(entries, Arc::new(JsonEncoder::default()))
    }

    /// Build settings from `(name, value)` pairs using `encoder`.
    ///
    /// Stops at the first value the encoder rejects.
    pub fn from_entries_with_encoder<I, K>(
        entries: I,
        encoder: Arc<dyn Encoder>,
    ) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut settings = Self::with_encoder(encoder);
        for (name, value) in entries {
            settings.set(name, value)?;
        }
        Ok(settings)
    }

    /// Wrap a decoded structure.
    ///
    /// Objects contribute their members, arrays their elements keyed by
    /// index. Scalars are coerced by [`coercion::to_array`] first.
    pub fn from_serialization(value: Value) -> Result<Self, SettingsError> {
        Self::from_serialization_with_encoder(value, Arc::new(JsonEncoder::default()))
    }

    pub fn from_serialization_with_encoder(
        value: Value,
        encoder: Arc<dyn Encoder>,
    ) -> Result<Self, SettingsError> {
        Self::from_entries_with_encoder(coercion::entries(value), encoder)
    }

    /// Store `value` under `name`, replacing any previous value.
    ///
    /// The value is encoded once to prove it is representable; the text is
    /// discarded. A rejected value leaves the settings unchanged.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Result<(), SettingsError> {
        let name = name.into();
        if let Err(source) = self.encoder.encode(&value) {
            let kind = ValueKind::of(&value);
            tracing::debug!(setting = %name, %kind, error = %source, "Rejected setting value");
            return Err(SettingsError::Validation { name, kind, source });
        }

        tracing::trace!(setting = %name, "Setting stored");
        self.entries.insert(name, value);
        Ok(())
    }

    /// Convert any serializable value to JSON and [`set`](Self::set) it.
    ///
    /// Nested `Settings` are stored as their canonical document.
    pub fn set_serialized<T>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), SettingsError>
    where
        T: Serialize + ?Sized,
    {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => self.set(name, value),
            Err(e) => {
                let kind = ValueKind::native::<T>();
                tracing::debug!(setting = %name, %kind, error = %e, "Rejected setting value");
                Err(SettingsError::Validation {
                    name,
                    kind,
                    source: EncodingError::Serialization(e.to_string()),
                })
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Stored value for `name`, or `default` untouched
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.entries.get(name).unwrap_or(default)
    }

    /// Stored value coerced to array-or-object form, or an empty array
    pub fn get_array(&self, name: &str) -> Value {
        self.get_array_or(name, Value::Array(Vec::new()))
    }

    pub fn get_array_or(&self, name: &str, default: Value) -> Value {
        match self.entries.get(name) {
            Some(value) => coercion::to_array(value.clone()),
            None => default,
        }
    }

    pub fn require_array(&self, name: &str) -> Result<Value, SettingsError> {
        self.get_required(name).cloned().map(coercion::to_array)
    }

    /// Read an array or object setting as independent nested settings.
    ///
    /// An absent setting yields empty settings sharing this encoder.
    pub fn get_as_settings(&self, name: &str) -> Result<Settings, SettingsError> {
        match self.nested(name)? {
            Some(settings) => Ok(settings),
            None => Ok(Self::with_encoder(Arc::clone(&self.encoder))),
        }
    }

    pub fn get_as_settings_or(
        &self,
        name: &str,
        default: Settings,
    ) -> Result<Settings, SettingsError> {
        Ok(self.nested(name)?.unwrap_or(default))
    }

    pub fn get_required(&self, name: &str) -> Result<&Value, SettingsError> {
        self.entries
            .get(name)
            .ok_or_else(|| SettingsError::MissingKey {
                name: name.to_string(),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Compare canonical renderings produced by this instance's encoder.
    ///
    /// Two settings are equal exactly when the encoder renders them to the
    /// same text. Nested objects keep their stored member order, so they only
    /// compare equal when that order matches too.
    pub fn equals(&self, other: &Settings) -> Result<bool, SettingsError> {
        let theirs = self.encoder.encode(&other.to_canonical_document())?;
        Ok(theirs == self.encode()?)
    }

    /// Canonical document: an object with top-level keys in ascending order
    pub fn to_canonical_document(&self) -> Value {
        Value::Object(
            self.sorted_entries()
                .into_iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    /// Render the canonical document with this instance's encoder
    pub fn encode(&self) -> Result<String, SettingsError> {
        Ok(self.encoder.encode(&self.to_canonical_document())?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn encoder(&self) -> &Arc<dyn Encoder> {
        &self.encoder
    }

    fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    fn nested(&self, name: &str) -> Result<Option<Settings>, SettingsError> {
        let Some(value) = self.entries.get(name) else {
            return Ok(None);
        };

        let kind = ValueKind::of(value);
        if !kind.is_structured() {
            return Err(SettingsError::NotSettings {
                name: name.to_string(),
                kind,
            });
        }

        tracing::trace!(setting = %name, %kind, "Materializing nested settings");
        Self::from_serialization_with_encoder(value.clone(), Arc::clone(&self.encoder)).map(Some)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl TryFrom<Value> for Settings {
    type Error = SettingsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_serialization(value)
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.sorted_entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_serialization(value).map_err(serde::de::Error::custom)
    }
}
