use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fable_core::context::RuntimeContext;
use fable_core::traits::{Condition, Event};
use fable_core::types::{ActorId, ControllerId, FireOn};

/// Actor handle used throughout the tests.
pub fn actor() -> ActorId {
    ActorId::from("test-actor")
}

/// Controller handle used throughout the tests.
pub fn controller() -> ControllerId {
    ControllerId::from("test-controller")
}

/// Condition with a fixed result that counts its calls and records the
/// label of every context it was checked against.
pub struct MockCondition {
    name: String,
    result: bool,
    negate: bool,
    shared: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockCondition {
    pub fn new(name: &str, result: bool) -> Self {
        Self {
            name: name.to_string(),
            result,
            negate: false,
            shared: false,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(vec![]),
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contexts_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Condition for MockCondition {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, _actor: &ActorId, _controller: &ControllerId, ctx: &RuntimeContext) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(ctx.label().to_string());
        self.result
    }

    fn negate(&self) -> bool {
        self.negate
    }

    fn uses_shared_context(&self) -> bool {
        self.shared
    }
}

/// Ordered record of executed events, shared between mocks.
///
/// Entries read `name@context-label`.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: String) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Event names only, in execution order.
    pub fn names(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|e| match e.split_once('@') {
                Some((name, _)) => name.to_string(),
                None => e,
            })
            .collect()
    }
}

/// Event that records itself in an [`EventLog`] and marks the context it ran
/// against with `fired:<name> = true`.
pub struct MockEvent {
    name: String,
    fire_on: FireOn,
    shared: bool,
    log: EventLog,
}

impl MockEvent {
    pub fn new(name: &str, fire_on: FireOn, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            fire_on,
            shared: false,
            log: log.clone(),
        }
    }

    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }
}

impl Event for MockEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, _actor: &ActorId, _controller: &ControllerId, ctx: &mut RuntimeContext) {
        self.log.record(format!("{}@{}", self.name, ctx.label()));
        ctx.set(format!("fired:{}", self.name), serde_json::Value::Bool(true));
    }

    fn fire_on(&self) -> FireOn {
        self.fire_on
    }

    fn uses_shared_context(&self) -> bool {
        self.shared
    }
}
