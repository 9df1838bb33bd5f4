//! Test fixtures for hierarchy construction
//!
//! Shared by unit tests across modules.

use crate::core::{DefinitionRecord, Hierarchy};
use proptest::prelude::*;

/// Two disjoint roots: Parent{Child1×100, Child2×200}, Parent2{Child3×300}
pub fn sample_records() -> Vec<DefinitionRecord> {
    vec![
        DefinitionRecord::header("Parent"),
        DefinitionRecord::child("Child1", 100),
        DefinitionRecord::child("Child2", 200),
        DefinitionRecord::header("Parent2"),
        DefinitionRecord::child("Child3", 300),
    ]
}

/// Fund{Tech×2, Energy×3}, Tech{AAPL×10, MSFT×5}, Energy{XOM×20}
pub fn nested_records() -> Vec<DefinitionRecord> {
    vec![
        DefinitionRecord::header("Fund"),
        DefinitionRecord::child("Tech", 2),
        DefinitionRecord::child("Energy", 3),
        DefinitionRecord::header("Tech"),
        DefinitionRecord::child("AAPL", 10),
        DefinitionRecord::child("MSFT", 5),
        DefinitionRecord::header("Energy"),
        DefinitionRecord::child("XOM", 20),
    ]
}

pub fn sample_hierarchy() -> Hierarchy {
    Hierarchy::build(sample_records()).expect("sample hierarchy is well formed")
}

pub fn nested_hierarchy() -> Hierarchy {
    Hierarchy::build(nested_records()).expect("nested hierarchy is well formed")
}

/// Name used for node `i` of a generated tree
pub fn tree_node_name(i: usize) -> String {
    format!("N{i}")
}

/// Records for a generated single-root tree
///
/// `links[k] = (parent, shares)` describes node `k + 1`; `parent` must be
/// smaller than `k + 1`. Node 0 is the root.
pub fn tree_records(links: &[(usize, i64)]) -> Vec<DefinitionRecord> {
    let mut children: Vec<Vec<(usize, i64)>> = vec![Vec::new(); links.len() + 1];
    for (k, &(parent, shares)) in links.iter().enumerate() {
        children[parent].push((k + 1, shares));
    }

    let mut records = Vec::new();
    for (parent, holdings) in children.iter().enumerate() {
        if holdings.is_empty() {
            continue;
        }
        records.push(DefinitionRecord::header(tree_node_name(parent)));
        for &(child, shares) in holdings {
            records.push(DefinitionRecord::child(tree_node_name(child), shares));
        }
    }
    records
}

/// Indices of generated nodes with no children
pub fn tree_leaves(links: &[(usize, i64)]) -> Vec<usize> {
    let mut has_children = vec![false; links.len() + 1];
    for &(parent, _) in links {
        has_children[parent] = true;
    }
    (0..=links.len()).filter(|&i| !has_children[i]).collect()
}

/// Random single-root tree links for `tree_records`
///
/// Between 1 and `max_links - 1` non-root nodes, each attached to an earlier node.
pub fn tree_strategy(
    max_links: usize,
    max_shares: i64,
) -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((any::<prop::sample::Index>(), 1..max_shares), 1..max_links).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(k, (idx, shares))| (idx.index(k + 1), shares))
                .collect()
        },
    )
}
