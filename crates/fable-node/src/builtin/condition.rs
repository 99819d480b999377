use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fable_core::context::RuntimeContext;
use fable_core::traits::Condition;
use fable_core::types::{ActorId, ControllerId};

/// A check against the values stored in a runtime context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextCheck {
    /// The key is present, whatever its value.
    HasKey { key: String },
    /// The key holds exactly this value.
    Equals { key: String, value: serde_json::Value },
    /// The key holds a string containing `substr`, or an array with that string.
    Contains { key: String, substr: String },
    /// The key holds a number greater than or equal to `value`.
    AtLeast { key: String, value: f64 },
    /// A simple expression over string values.
    /// Supported: `key == "value"`, `key != "value"`, `key contains "substr"`.
    Expr { expr: String },
}

impl ContextCheck {
    pub fn holds(&self, ctx: &RuntimeContext) -> bool {
        match self {
            Self::HasKey { key } => ctx.contains(key),
            Self::Equals { key, value } => ctx.get(key) == Some(value),
            Self::Contains { key, substr } => match ctx.get(key) {
                Some(serde_json::Value::String(s)) => s.contains(substr.as_str()),
                Some(serde_json::Value::Array(items)) => {
                    items.iter().any(|v| v.as_str() == Some(substr.as_str()))
                }
                _ => false,
            },
            Self::AtLeast { key, value } => ctx.get_f64(key).is_some_and(|v| v >= *value),
            Self::Expr { expr } => evaluate_expr(expr, ctx.data()),
        }
    }
}

/// A data-driven condition built from a [`ContextCheck`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextCondition {
    pub name: String,
    pub check: ContextCheck,
    /// Pass only when the check does not hold.
    #[serde(default)]
    pub negate: bool,
    /// Check the shared context instead of the local one.
    #[serde(default)]
    pub check_shared: bool,
}

impl ContextCondition {
    pub fn new(name: impl Into<String>, check: ContextCheck) -> Self {
        Self {
            name: name.into(),
            check,
            negate: false,
            check_shared: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn on_shared(mut self) -> Self {
        self.check_shared = true;
        self
    }
}

impl Condition for ContextCondition {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _actor: &ActorId, _controller: &ControllerId, ctx: &RuntimeContext) -> bool {
        self.check.holds(ctx)
    }

    fn negate(&self) -> bool {
        self.negate
    }

    fn uses_shared_context(&self) -> bool {
        self.check_shared
    }
}

/// Evaluate a simple expression against context data.
///
/// Accepts `key == "v"`, `key != "v"` and `key contains "v"`. The key is the
/// leading identifier, so operator tokens inside the value are literal.
/// Returns `false` for unparseable expressions and missing keys.
pub fn evaluate_expr(expr: &str, data: &HashMap<String, serde_json::Value>) -> bool {
    let Some((key, op, value)) = parse_expr(expr) else {
        return false;
    };
    let Some(actual) = data.get(key).and_then(|v| v.as_str()) else {
        return false;
    };
    match op {
        ExprOp::Eq => actual == value,
        ExprOp::Ne => actual != value,
        ExprOp::Contains => actual.contains(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprOp {
    Eq,
    Ne,
    Contains,
}

/// Split `key OP value` into its parts, unquoting the value.
fn parse_expr(expr: &str) -> Option<(&str, ExprOp, &str)> {
    let expr = expr.trim();
    let key_end = expr
        .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | ':')))
        .unwrap_or(expr.len());
    let (key, rest) = expr.split_at(key_end);
    if key.is_empty() {
        return None;
    }

    let rest = rest.trim_start();
    let (op, value) = if let Some(value) = rest.strip_prefix("==") {
        (ExprOp::Eq, value)
    } else if let Some(value) = rest.strip_prefix("!=") {
        (ExprOp::Ne, value)
    } else if let Some(value) = rest.strip_prefix("contains") {
        // `containsX` is not the operator
        if !value.starts_with(char::is_whitespace) {
            return None;
        }
        (ExprOp::Contains, value)
    } else {
        return None;
    };

    Some((key, op, unquote(value.trim())))
}

/// Strip exactly one pair of surrounding double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
