use crate::node::Node;

/// The node set of one quest, in authoring order.
///
/// This is the container identities are unique within. It carries no edges;
/// traversal belongs to the controller walking the quest.
#[derive(Debug, Clone, Default)]
pub struct QuestGraph {
    nodes: Vec<Node>,
}

impl QuestGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index.
    pub fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Find the first node with the given id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_deref() == Some(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Give every node without an id its default one.
    pub fn assign_identities(&mut self) {
        for node in &mut self.nodes {
            node.assign_identity();
        }
    }

    /// Make the id of the node at `index` unique within the graph.
    ///
    /// Called after an id was edited. On a collision the smallest `_N` suffix
    /// (N >= 1) that no other node uses is appended. Returns the final id, or
    /// `None` if `index` is out of range.
    pub fn ensure_unique_id(&mut self, index: usize) -> Option<String> {
        let base = self.nodes.get_mut(index)?.assign_identity().to_string();

        let taken = |candidate: &str| {
            self.nodes
                .iter()
                .enumerate()
                .any(|(i, n)| i != index && n.id.as_deref() == Some(candidate))
        };

        let unique = if taken(base.as_str()) {
            (1..)
                .map(|n| format!("{}_{}", base, n))
                .find(|candidate| !taken(candidate.as_str()))?
        } else {
            base
        };

        self.nodes[index].id = Some(unique.clone());
        Some(unique)
    }
}
