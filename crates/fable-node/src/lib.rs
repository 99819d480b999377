pub mod builtin;
pub mod dispatcher;
pub mod evaluator;
pub mod graph;
pub mod identity;
pub mod node;
pub mod resolve;

pub use builtin::{ContextCheck, ContextCondition, ContextEffect, ContextEvent};
pub use dispatcher::{DispatchReport, EventDispatcher};
pub use evaluator::ConditionEvaluator;
pub use graph::QuestGraph;
pub use identity::validate_uniqueness;
pub use node::{ConditionSlot, EventSlot, Node};
pub use resolve::{resolve_target, Resolution, Resolver};
