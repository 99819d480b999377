use crate::context::RuntimeContext;
use crate::types::{ActorId, ControllerId, FireOn};

/// A boolean gate on progression through a node.
pub trait Condition: Send + Sync + 'static {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Evaluate against the resolved context.
    fn check(&self, actor: &ActorId, controller: &ControllerId, ctx: &RuntimeContext) -> bool;

    /// Invert pass/fail: when set, the condition passes only if `check` returns false.
    fn negate(&self) -> bool {
        false
    }

    /// Evaluate against the shared context instead of the local one.
    fn uses_shared_context(&self) -> bool {
        false
    }
}

/// A side effect run when a node is entered or exited.
pub trait Event: Send + Sync + 'static {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Apply the side effect to the resolved context.
    fn execute(&self, actor: &ActorId, controller: &ControllerId, ctx: &mut RuntimeContext);

    /// Phases this event fires on.
    fn fire_on(&self) -> FireOn;

    /// Execute against the shared context instead of the local one.
    fn uses_shared_context(&self) -> bool {
        false
    }
}
