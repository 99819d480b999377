use serde::{Deserialize, Serialize};

use fable_core::context::RuntimeContext;
use fable_core::traits::Event;
use fable_core::types::{ActorId, ControllerId, FireOn};

/// A change applied to the values stored in a runtime context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextEffect {
    /// Store a value, replacing any previous one.
    Set { key: String, value: serde_json::Value },
    /// Delete a key.
    Remove { key: String },
    /// Add to an integer. A missing or non-integer value counts as 0.
    Increment {
        key: String,
        #[serde(default = "default_increment")]
        by: i64,
    },
    /// Push onto an array, creating it if needed.
    Append { key: String, value: serde_json::Value },
}

fn default_increment() -> i64 {
    1
}

impl ContextEffect {
    pub fn apply(&self, ctx: &mut RuntimeContext) {
        match self {
            Self::Set { key, value } => ctx.set(key.clone(), value.clone()),
            Self::Remove { key } => {
                ctx.remove(key);
            }
            Self::Increment { key, by } => {
                let current = ctx.get_i64(key).unwrap_or(0);
                ctx.set(key.clone(), serde_json::json!(current.saturating_add(*by)));
            }
            Self::Append { key, value } => {
                let items = match ctx.remove(key) {
                    Some(serde_json::Value::Array(mut items)) => {
                        items.push(value.clone());
                        items
                    }
                    Some(other) => vec![other, value.clone()],
                    None => vec![value.clone()],
                };
                ctx.set(key.clone(), serde_json::Value::Array(items));
            }
        }
    }
}

/// A data-driven event built from a [`ContextEffect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEvent {
    pub name: String,
    pub effect: ContextEffect,
    #[serde(default)]
    pub fire_on: FireOn,
    /// Apply the effect to the shared context instead of the local one.
    #[serde(default)]
    pub use_shared: bool,
}

impl ContextEvent {
    pub fn new(name: impl Into<String>, effect: ContextEffect) -> Self {
        Self {
            name: name.into(),
            effect,
            fire_on: FireOn::default(),
            use_shared: false,
        }
    }

    pub fn firing_on(mut self, fire_on: FireOn) -> Self {
        self.fire_on = fire_on;
        self
    }

    pub fn on_shared(mut self) -> Self {
        self.use_shared = true;
        self
    }
}

impl Event for ContextEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, _actor: &ActorId, _controller: &ControllerId, ctx: &mut RuntimeContext) {
        self.effect.apply(ctx);
    }

    fn fire_on(&self) -> FireOn {
        self.fire_on
    }

    fn uses_shared_context(&self) -> bool {
        self.use_shared
    }
}
