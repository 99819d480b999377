pub mod condition;
pub mod event;

pub use condition::{evaluate_expr, ContextCheck, ContextCondition};
pub use event::{ContextEffect, ContextEvent};
