use std::sync::Arc;

use tracing::debug;

use fable_core::context::ContextScope;
use fable_core::diagnostic::{CapabilityKind, Diagnostic, DiagnosticSink, TracingSink};
use fable_core::types::{ActorId, ControllerId};

use crate::node::Node;
use crate::resolve::Resolver;

/// Decides whether a node's conditions are met.
///
/// Conditions are a short-circuiting AND in declaration order. A condition
/// fails the node when its result equals its negate flag. Empty slots and
/// conditions whose context cannot be resolved are skipped and count as passing.
pub struct ConditionEvaluator {
    sink: Arc<dyn DiagnosticSink>,
}

impl ConditionEvaluator {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn are_conditions_met(
        &self,
        node: &Node,
        actor: &ActorId,
        controller: &ControllerId,
        scope: &ContextScope<'_>,
    ) -> bool {
        let label = node.label();
        if !scope.has_local() {
            self.sink
                .report(Diagnostic::node_without_context(label, CapabilityKind::Condition));
        }

        let resolver = Resolver::new(label, CapabilityKind::Condition, self.sink.as_ref());

        for condition in node.conditions.iter().flatten() {
            let Some(ctx) =
                resolver.resolve(scope, condition.name(), condition.uses_shared_context())
            else {
                continue;
            };

            let result = condition.check(actor, controller, ctx);
            if result == condition.negate() {
                debug!(
                    node = %label,
                    condition = %condition.name(),
                    result,
                    negate = condition.negate(),
                    "Condition failed"
                );
                return false;
            }
        }

        true
    }
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}
