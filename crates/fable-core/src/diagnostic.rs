use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// What went wrong. Every kind is recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The caller supplied no local context; the capability was skipped.
    MissingCallerContext,
    /// The shared context was requested but none is attached; the local one was used.
    MissingSharedContext,
}

/// Which family of capability a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Condition,
    Event,
}

impl CapabilityKind {
    fn plural(self) -> &'static str {
        match self {
            Self::Condition => "conditions",
            Self::Event => "events",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition => write!(f, "condition"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A leveled, human-readable report naming the offending node and capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    /// Label of the node being processed.
    pub node: String,
    /// Name of the condition or event, when the report concerns a single one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// The whole node was asked to run without a local context.
    ///
    /// Informational: each skipped capability is reported as a warning.
    pub fn node_without_context(node: &str, what: CapabilityKind) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            kind: DiagnosticKind::MissingCallerContext,
            node: node.to_string(),
            capability: None,
            message: format!(
                "Tried running {} on node {} but no local context was supplied",
                what.plural(),
                node
            ),
        }
    }

    /// One capability was skipped because no context could be resolved.
    pub fn capability_without_context(node: &str, what: CapabilityKind, name: &str) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            kind: DiagnosticKind::MissingCallerContext,
            node: node.to_string(),
            capability: Some(name.to_string()),
            message: format!(
                "Tried running {} {} on node {} but no context was available, skipping",
                what, name, node
            ),
        }
    }

    /// One capability asked for the shared context and fell back to the local one.
    pub fn shared_fallback(node: &str, what: CapabilityKind, name: &str) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            kind: DiagnosticKind::MissingSharedContext,
            node: node.to_string(),
            capability: Some(name.to_string()),
            message: format!(
                "{} {} on node {} requested the shared context but none is attached, falling back to local context",
                capitalize(&what.to_string()),
                name,
                node
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Destination for diagnostics. Reporting never fails and never blocks.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Sink that forwards every diagnostic to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        trace_diagnostic(&diagnostic);
    }
}

pub(crate) fn trace_diagnostic(d: &Diagnostic) {
    let capability = d.capability.as_deref().unwrap_or("-");
    match d.level {
        DiagnosticLevel::Warning => {
            warn!(kind = ?d.kind, node = %d.node, capability, "{}", d.message)
        }
        DiagnosticLevel::Info => {
            info!(kind = ?d.kind, node = %d.node, capability, "{}", d.message)
        }
    }
}

/// Sink that keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.entries().iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
