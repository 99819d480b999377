use std::sync::Arc;

use tracing::debug;

use fable_core::context::ContextScope;
use fable_core::diagnostic::{CapabilityKind, Diagnostic, DiagnosticSink, TracingSink};
use fable_core::types::{ActorId, ControllerId, Phase};

use crate::node::Node;
use crate::resolve::Resolver;

/// Outcome counts of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events that ran.
    pub executed: usize,
    /// Events that matched the phase but had no context to run against.
    pub skipped: usize,
}

/// Runs a node's events for a lifecycle phase.
///
/// Every event tagged with the phase, or with both phases, runs in
/// declaration order. Dispatch always walks the whole list: nothing an event
/// does, and no missing context, stops the events after it.
pub struct EventDispatcher {
    sink: Arc<dyn DiagnosticSink>,
}

impl EventDispatcher {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn process_events(
        &self,
        node: &Node,
        actor: &ActorId,
        controller: &ControllerId,
        scope: &mut ContextScope<'_>,
        phase: Phase,
    ) -> DispatchReport {
        let label = node.label();
        if !scope.has_local() {
            self.sink
                .report(Diagnostic::node_without_context(label, CapabilityKind::Event));
        }

        let resolver = Resolver::new(label, CapabilityKind::Event, self.sink.as_ref());
        let mut report = DispatchReport::default();

        for event in node.events.iter().flatten() {
            if !event.fire_on().fires_on(phase) {
                continue;
            }

            match resolver.resolve_mut(scope, event.name(), event.uses_shared_context()) {
                Some(ctx) => {
                    debug!(
                        node = %label,
                        event = %event.name(),
                        %phase,
                        context = %ctx.label(),
                        "Executing event"
                    );
                    event.execute(actor, controller, ctx);
                    report.executed += 1;
                }
                None => report.skipped += 1,
            }
        }

        report
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}
