//! Dependency graph construction: the client-side fallback for the remote
//! graph endpoint.
//!
//! The wire shape ([`DependencyGraph`]) keeps every declared dependency
//! edge, including edges whose source id resolves to no task (a dependency
//! on a removed task stays visible). Cycle detection, in contrast, only
//! considers edges between tasks that actually exist, matching the remote
//! service's behavior.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// One node per task in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Display name (the task title).
    pub name: String,
    pub importance: u8,
}

/// A directed edge from the depended-upon task to the dependent task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Nodes and links in the shape shared with the remote endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl DependencyGraph {
    /// Look up a node's display name by id.
    pub fn node_name(&self, id: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.name.as_str())
    }
}

/// Build the graph from the store: one node per task, one link per
/// `(dep_id, task.id)` pair. Dangling dependency ids are kept, so the link
/// count always equals the sum of dependency-list lengths.
pub fn build_graph(tasks: &[Task]) -> DependencyGraph {
    let mut graph = DependencyGraph::default();
    for task in tasks {
        graph.nodes.push(GraphNode {
            id: task.id.clone(),
            name: task.title.clone(),
            importance: task.importance,
        });
        for dep_id in &task.dependencies {
            graph.links.push(GraphLink {
                source: dep_id.clone(),
                target: task.id.clone(),
            });
        }
    }
    graph
}

/// Whether the dependency relation contains a cycle.
///
/// Dependencies on ids with no matching task are skipped; a task that
/// depends on itself is a cycle.
pub fn has_circular_deps(tasks: &[Task]) -> bool {
    let mut graph = DiGraph::<(), ()>::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for task in tasks {
        index
            .entry(task.id.as_str())
            .or_insert_with(|| graph.add_node(()));
    }
    for task in tasks {
        let Some(&target) = index.get(task.id.as_str()) else {
            continue;
        };
        for dep_id in &task.dependencies {
            if let Some(&source) = index.get(dep_id.as_str()) {
                graph.add_edge(source, target, ());
            }
        }
    }

    is_cyclic_directed(&graph)
}
