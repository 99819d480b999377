use crate::diagnostic::{trace_diagnostic, Diagnostic, DiagnosticSink};

/// Diagnostic bus using a tokio broadcast channel.
/// All subscribers receive all diagnostics; publishing never blocks.
pub struct DiagnosticBus {
    tx: tokio::sync::broadcast::Sender<Diagnostic>,
    trace: bool,
}

impl DiagnosticBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = tokio::sync::broadcast::channel(capacity.max(1));
        Self { tx, trace: true }
    }

    /// Also forward every published diagnostic to `tracing`.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn publish(&self, diagnostic: Diagnostic) {
        if self.trace {
            trace_diagnostic(&diagnostic);
        }
        // Ignore error if no receivers
        let _ = self.tx.send(diagnostic);
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Diagnostic> {
        self.tx.subscribe()
    }
}

impl Default for DiagnosticBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl DiagnosticSink for DiagnosticBus {
    fn report(&self, diagnostic: Diagnostic) {
        self.publish(diagnostic);
    }
}
