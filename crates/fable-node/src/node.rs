use std::fmt;
use std::sync::Arc;

use fable_core::traits::{Condition, Event};

/// A condition slot on a node. `None` is an empty authoring slot.
pub type ConditionSlot = Option<Arc<dyn Condition>>;

/// An event slot on a node. `None` is an empty authoring slot.
pub type EventSlot = Option<Arc<dyn Event>>;

/// A node in a quest graph.
///
/// The node only holds references to its conditions and events; they are
/// owned elsewhere and may be shared between nodes. Both lists are evaluated
/// in declaration order.
#[derive(Clone, Default)]
pub struct Node {
    /// Identifier unique within the owning graph. Unset until assigned.
    pub id: Option<String>,
    /// Structural name; the default source of the id.
    pub name: String,
    /// Gates checked before progression through this node.
    pub conditions: Vec<ConditionSlot>,
    /// Side effects run on enter and exit.
    pub events: Vec<EventSlot>,
}

impl Node {
    /// Create a new node with no id, conditions, or events.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            conditions: vec![],
            events: vec![],
        }
    }

    /// Set an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a condition.
    pub fn with_condition(self, condition: impl Condition) -> Self {
        self.with_condition_arc(Arc::new(condition))
    }

    /// Append a condition that is shared with other owners.
    pub fn with_condition_arc(mut self, condition: Arc<dyn Condition>) -> Self {
        self.conditions.push(Some(condition));
        self
    }

    /// Append an empty condition slot.
    pub fn with_empty_condition(mut self) -> Self {
        self.conditions.push(None);
        self
    }

    /// Append an event.
    pub fn with_event(self, event: impl Event) -> Self {
        self.with_event_arc(Arc::new(event))
    }

    /// Append an event that is shared with other owners.
    pub fn with_event_arc(mut self, event: Arc<dyn Event>) -> Self {
        self.events.push(Some(event));
        self
    }

    /// Append an empty event slot.
    pub fn with_empty_event(mut self) -> Self {
        self.events.push(None);
        self
    }

    /// Give the node its default id (its structural name) unless one is set.
    pub fn assign_identity(&mut self) -> &str {
        self.id.get_or_insert_with(|| self.name.clone())
    }

    /// How this node is named in diagnostics: id, then name.
    pub fn label(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ if !self.name.is_empty() => self.name.as_str(),
            _ => "<unnamed>",
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: Vec<Option<&str>> = self
            .conditions
            .iter()
            .map(|c| c.as_ref().map(|c| c.name()))
            .collect();
        let events: Vec<Option<&str>> = self
            .events
            .iter()
            .map(|e| e.as_ref().map(|e| e.name()))
            .collect();
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("conditions", &conditions)
            .field("events", &events)
            .finish()
    }
}
