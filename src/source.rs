//! Telemetry store access.
//!
//! The dashboard only needs two things from the store: whether it is
//! currently reachable, and the current value of a key (with a fallback when
//! the key is missing). [`TableSource`] is the in-memory implementation; the
//! network client in [`crate::net`] keeps one up to date.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// A single entry in the telemetry table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Number(f64),
    Flag(bool),
}

impl TelemetryValue {
    pub fn as_number(self) -> Option<f64> {
        match self {
            TelemetryValue::Number(v) => Some(v),
            TelemetryValue::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            TelemetryValue::Flag(b) => Some(b),
            TelemetryValue::Number(_) => None,
        }
    }
}

/// Key/value telemetry store as seen by the dashboard.
pub trait TelemetrySource {
    /// Whether the store is currently reachable. An error counts as "no".
    fn is_connected(&self) -> Result<bool, SourceError>;

    /// Current numeric value of `key`, or `default` if it is missing or not a number.
    fn get_value(&self, key: &str, default: f64) -> f64;

    /// Current boolean value of `key`, or `default` if it is missing or not a flag.
    fn get_flag(&self, key: &str, default: bool) -> bool;

    /// Fetch `keys` in order. The result always has `keys.len()` entries.
    fn fetch_batch(&self, keys: &[&str], default: f64) -> Vec<f64> {
        keys.iter().map(|k| self.get_value(k, default)).collect()
    }
}

#[derive(Debug, Default)]
struct TableInner {
    connected: bool,
    values: HashMap<String, TelemetryValue>,
}

/// Shared in-memory telemetry table.
///
/// Cloning yields another handle to the same table, so a writer (the network
/// client, a test) and the dashboard can hold it at the same time.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    inner: Arc<Mutex<TableInner>>,
}

impl TableSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TableInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    pub fn set_value(&self, key: impl Into<String>, value: f64) {
        self.lock().values.insert(key.into(), TelemetryValue::Number(value));
    }

    pub fn set_flag(&self, key: impl Into<String>, value: bool) {
        self.lock().values.insert(key.into(), TelemetryValue::Flag(value));
    }

    pub fn insert(&self, key: impl Into<String>, value: TelemetryValue) {
        self.lock().values.insert(key.into(), value);
    }

    /// Replace every value at once.
    pub fn replace_all(&self, values: HashMap<String, TelemetryValue>) {
        self.lock().values = values;
    }

    pub fn remove(&self, key: &str) -> Option<TelemetryValue> {
        self.lock().values.remove(key)
    }

    pub fn clear_values(&self) {
        self.lock().values.clear();
    }

    pub fn get(&self, key: &str) -> Option<TelemetryValue> {
        self.lock().values.get(key).copied()
    }
}

/// One frame of the telemetry wire protocol (JSON text).
///
/// ```json
/// {"type":"update","key":"Shuffleboard/PathTracer/vX","value":1.5}
/// {"type":"snapshot","values":{"Shuffleboard/PathTracer/ptReset":false}}
/// {"type":"clear"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryMessage {
    Update { key: String, value: TelemetryValue },
    Snapshot { values: HashMap<String, TelemetryValue> },
    Clear,
}

impl TelemetryMessage {
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn apply(self, table: &TableSource) {
        match self {
            TelemetryMessage::Update { key, value } => table.insert(key, value),
            TelemetryMessage::Snapshot { values } => table.replace_all(values),
            TelemetryMessage::Clear => table.clear_values(),
        }
    }
}

impl TelemetrySource for TableSource {
    fn is_connected(&self) -> Result<bool, SourceError> {
        Ok(self.lock().connected)
    }

    fn get_value(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(TelemetryValue::as_number).unwrap_or(default)
    }

    fn get_flag(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(TelemetryValue::as_flag).unwrap_or(default)
    }

    fn fetch_batch(&self, keys: &[&str], default: f64) -> Vec<f64> {
        // One lock for the whole batch keeps it consistent.
        let inner = self.lock();
        keys.iter()
            .map(|k| {
                inner
                    .values
                    .get(*k)
                    .and_then(|v| v.as_number())
                    .unwrap_or(default)
            })
            .collect()
    }
}
