use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mutable state container narrative progress is tracked in.
///
/// A context is either local to one actor or shared across actors. Keys are
/// strings; values are JSON so conditions and events can store anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeContext {
    label: String,
    #[serde(default)]
    data: HashMap<String, serde_json::Value>,
}

impl RuntimeContext {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: HashMap::new(),
        }
    }

    /// Create a context from initial data.
    pub fn from_map(label: impl Into<String>, data: HashMap<String, serde_json::Value>) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }

    /// Name used when this context shows up in diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Get a value as a string, if it's a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Get a value as an integer, if it's an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(|v| v.as_i64())
    }

    /// Get a value as a float; integers are widened.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(|v| v.as_f64())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Set a string value.
    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data
            .insert(key.into(), serde_json::Value::String(value.into()));
    }

    /// Remove a value, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Merge another context into this one (overwrites on conflict).
    pub fn merge(&mut self, other: &RuntimeContext) {
        for (k, v) in &other.data {
            self.data.insert(k.clone(), v.clone());
        }
    }

    /// Get the underlying data map.
    pub fn data(&self) -> &HashMap<String, serde_json::Value> {
        &self.data
    }
}

/// The contexts a controller hands to a node for one evaluation or dispatch.
///
/// The controller owns both contexts and lends them here, so a node never
/// reaches through a back-reference to find the shared one. A scope without a
/// local context models a caller that supplied none.
#[derive(Debug, Default)]
pub struct ContextScope<'a> {
    local: Option<&'a mut RuntimeContext>,
    shared: Option<&'a mut RuntimeContext>,
}

impl<'a> ContextScope<'a> {
    /// Scope over a local context with no shared context attached.
    pub fn new(local: &'a mut RuntimeContext) -> Self {
        Self {
            local: Some(local),
            shared: None,
        }
    }

    /// Scope with no contexts at all.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Attach the shared context. A scope holds at most one.
    pub fn with_shared(mut self, shared: &'a mut RuntimeContext) -> Self {
        self.shared = Some(shared);
        self
    }

    pub fn has_local(&self) -> bool {
        self.local.is_some()
    }

    pub fn has_shared(&self) -> bool {
        self.shared.is_some()
    }

    pub fn local(&self) -> Option<&RuntimeContext> {
        self.local.as_deref()
    }

    pub fn shared(&self) -> Option<&RuntimeContext> {
        self.shared.as_deref()
    }

    pub fn local_mut(&mut self) -> Option<&mut RuntimeContext> {
        self.local.as_deref_mut()
    }

    pub fn shared_mut(&mut self) -> Option<&mut RuntimeContext> {
        self.shared.as_deref_mut()
    }
}
