//! Per-capability choice between the local and the shared runtime context.

use fable_core::context::{ContextScope, RuntimeContext};
use fable_core::diagnostic::{CapabilityKind, Diagnostic, DiagnosticSink};

/// Which context a capability operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The local context, as requested.
    Local,
    /// The shared context, as requested.
    Shared,
    /// The shared context was requested but none is attached.
    FallbackLocal,
    /// No local context was supplied; nothing can run.
    Unavailable,
}

/// Decide which context a capability runs against.
///
/// Without a local context nothing resolves, even if a shared one exists.
pub fn resolve_target(use_shared: bool, has_local: bool, has_shared: bool) -> Resolution {
    match (has_local, use_shared, has_shared) {
        (false, _, _) => Resolution::Unavailable,
        (true, false, _) => Resolution::Local,
        (true, true, true) => Resolution::Shared,
        (true, true, false) => Resolution::FallbackLocal,
    }
}

/// Resolves contexts for the capabilities of one node, reporting as it goes.
pub struct Resolver<'a> {
    node: &'a str,
    what: CapabilityKind,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Resolver<'a> {
    pub fn new(node: &'a str, what: CapabilityKind, sink: &'a dyn DiagnosticSink) -> Self {
        Self { node, what, sink }
    }

    /// Resolve for read-only use (conditions).
    pub fn resolve<'s>(
        &self,
        scope: &'s ContextScope<'_>,
        name: &str,
        use_shared: bool,
    ) -> Option<&'s RuntimeContext> {
        match self.decide(scope, name, use_shared) {
            Resolution::Local | Resolution::FallbackLocal => scope.local(),
            Resolution::Shared => scope.shared(),
            Resolution::Unavailable => None,
        }
    }

    /// Resolve for mutation (events).
    pub fn resolve_mut<'s>(
        &self,
        scope: &'s mut ContextScope<'_>,
        name: &str,
        use_shared: bool,
    ) -> Option<&'s mut RuntimeContext> {
        match self.decide(scope, name, use_shared) {
            Resolution::Local | Resolution::FallbackLocal => scope.local_mut(),
            Resolution::Shared => scope.shared_mut(),
            Resolution::Unavailable => None,
        }
    }

    fn decide(&self, scope: &ContextScope<'_>, name: &str, use_shared: bool) -> Resolution {
        let resolution = resolve_target(use_shared, scope.has_local(), scope.has_shared());
        match resolution {
            Resolution::FallbackLocal => self
                .sink
                .report(Diagnostic::shared_fallback(self.node, self.what, name)),
            Resolution::Unavailable => self
                .sink
                .report(Diagnostic::capability_without_context(self.node, self.what, name)),
            Resolution::Local | Resolution::Shared => {}
        }
        resolution
    }
}
