use std::collections::BTreeMap;

use fable_core::error::{FableError, Result};

use crate::graph::QuestGraph;

/// Check that every node has an id and that no id is used twice.
///
/// Unassigned nodes are reported by name. Duplicates are reported once per id,
/// sorted.
pub fn validate_uniqueness(graph: &QuestGraph) -> Result<()> {
    let unassigned: Vec<String> = graph
        .nodes()
        .iter()
        .filter(|n| n.id.is_none())
        .map(|n| n.label().to_string())
        .collect();
    if !unassigned.is_empty() {
        return Err(FableError::UnassignedIdentity(unassigned));
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for id in graph.nodes().iter().filter_map(|n| n.id.as_deref()) {
        *counts.entry(id).or_default() += 1;
    }

    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    if !duplicates.is_empty() {
        return Err(FableError::DuplicateNodeIds(duplicates));
    }

    Ok(())
}
