// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph functions over the privilege aggregation hierarchy.
//!
//! Nodes are privilege names, an edge `a -> b` means `a` declares `b` as an immediate child.
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;

use crate::Privilege;

/// Build the aggregation graph from `(name, declared children)` pairs.
pub fn aggregation_graph<'a, I, C>(declarations: I) -> DiGraphMap<&'a str, ()>
where
    I: IntoIterator<Item = (&'a str, C)>,
    C: IntoIterator<Item = &'a str>,
{
    let mut graph = DiGraphMap::new();
    for (name, children) in declarations {
        graph.add_node(name);
        for child in children {
            graph.add_edge(name, child, ());
        }
    }
    graph
}

/// Build the aggregation graph spanned by a translated privilege and its declared descendants.
pub fn privilege_graph(privilege: &Privilege) -> DiGraphMap<&str, ()> {
    let mut graph = DiGraphMap::new();
    add_declared_edges(&mut graph, privilege);
    graph
}

fn add_declared_edges<'a>(graph: &mut DiGraphMap<&'a str, ()>, privilege: &'a Privilege) {
    graph.add_node(privilege.name());
    for child in privilege.declared_aggregate_privileges() {
        let first_visit = !graph.contains_node(child.name());
        graph.add_edge(privilege.name(), child.name(), ());
        if first_visit {
            add_declared_edges(graph, child);
        }
    }
}

/// All privileges reachable from `name`, excluding `name` itself, in depth-first order.
///
/// Returns an empty list when `name` is not part of the graph.
pub fn closure<'a>(graph: &DiGraphMap<&'a str, ()>, name: &str) -> Vec<&'a str> {
    let Some(start) = graph.nodes().find(|node| *node == name) else {
        return Vec::new();
    };

    let mut reachable = Vec::new();
    let mut dfs = Dfs::new(graph, start);
    while let Some(node) = dfs.next(graph) {
        if node != start {
            reachable.push(node);
        }
    }
    reachable
}

/// Privileges reachable from `name` (including itself) which do not declare any children.
pub fn leaves<'a>(graph: &DiGraphMap<&'a str, ()>, name: &str) -> Vec<&'a str> {
    let Some(start) = graph.nodes().find(|node| *node == name) else {
        return Vec::new();
    };

    let mut leaves = Vec::new();
    let mut dfs = Dfs::new(graph, start);
    while let Some(node) = dfs.next(graph) {
        if graph.neighbors(node).next().is_none() {
            leaves.push(node);
        }
    }
    leaves
}

/// Return `true` if some privilege aggregates itself, directly or transitively.
pub fn has_cycle(graph: &DiGraphMap<&str, ()>) -> bool {
    is_cyclic_directed(graph)
}
