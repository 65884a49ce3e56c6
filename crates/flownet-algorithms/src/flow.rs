//! Network flow algorithms
//!
//! Augmenting-path max flow (Edmonds-Karp, Ford-Fulkerson) and the
//! [`FlowAlgorithm`] selector that also dispatches to [`dinic`].

use super::dinic::dinic;
use super::network::{Capacity, EdgeHandle, FlowNetwork, FlowTotal, VertexId};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a max flow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowResult {
    /// Net flow leaving the source once no augmenting path remains
    pub max_flow: FlowTotal,
    /// Dinic: level-graph phases. Augmenting-path solvers: paths found.
    pub phases: usize,
}

/// Available max flow solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FlowAlgorithm {
    #[default]
    Dinic,
    EdmondsKarp,
    FordFulkerson,
}

impl FlowAlgorithm {
    pub const ALL: [FlowAlgorithm; 3] = [
        FlowAlgorithm::Dinic,
        FlowAlgorithm::EdmondsKarp,
        FlowAlgorithm::FordFulkerson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FlowAlgorithm::Dinic => "dinic",
            FlowAlgorithm::EdmondsKarp => "edmonds-karp",
            FlowAlgorithm::FordFulkerson => "ford-fulkerson",
        }
    }

    /// Run the selected solver on `network`
    pub fn run(&self, network: &mut FlowNetwork, source: VertexId, sink: VertexId) -> FlowResult {
        match self {
            FlowAlgorithm::Dinic => dinic(network, source, sink),
            FlowAlgorithm::EdmondsKarp => edmonds_karp(network, source, sink),
            FlowAlgorithm::FordFulkerson => ford_fulkerson(network, source, sink),
        }
    }
}

impl fmt::Display for FlowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown flow algorithm '{0}' (expected dinic, edmonds-karp or ford-fulkerson)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for FlowAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlowAlgorithm::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Edmonds-Karp Algorithm for Max Flow
///
/// Repeatedly augments along a shortest (fewest edges) residual path found by BFS.
pub fn edmonds_karp(network: &mut FlowNetwork, source: VertexId, sink: VertexId) -> FlowResult {
    augment_until_blocked(network, source, sink, find_path_bfs)
}

/// Ford-Fulkerson Algorithm for Max Flow
///
/// Augments along whatever residual path an iterative depth-first search finds
/// first. Terminates for integer capacities.
pub fn ford_fulkerson(network: &mut FlowNetwork, source: VertexId, sink: VertexId) -> FlowResult {
    augment_until_blocked(network, source, sink, find_path_dfs)
}

/// For each vertex, the edge it was discovered through
type ParentEdges = Vec<Option<EdgeHandle>>;

fn augment_until_blocked(
    network: &mut FlowNetwork,
    source: VertexId,
    sink: VertexId,
    find_path: fn(&FlowNetwork, VertexId, VertexId) -> Option<ParentEdges>,
) -> FlowResult {
    if source == sink {
        return FlowResult { max_flow: 0, phases: 0 };
    }

    let mut total_flow = network.outflow(source);
    let mut paths = 0;

    while let Some(parent) = find_path(network, source, sink) {
        let path_flow = augment(network, &parent, source, sink);
        trace!(path = paths, path_flow, "augmented");
        total_flow += path_flow as FlowTotal;
        paths += 1;
    }

    FlowResult { max_flow: total_flow, phases: paths }
}

/// Push the bottleneck amount along the parent chain from `sink` back to `source`
fn augment(network: &mut FlowNetwork, parent: &ParentEdges, source: VertexId, sink: VertexId) -> Capacity {
    // Calculate path flow
    let mut path_flow = Capacity::MAX;
    let mut curr = sink;
    while curr != source {
        let Some(handle) = parent[curr] else { break };
        path_flow = path_flow.min(network.edge(handle).residual());
        curr = handle.vertex;
    }

    // Update residual capacities
    curr = sink;
    while curr != source {
        let Some(handle) = parent[curr] else { break };
        network.push_flow(handle, path_flow);
        curr = handle.vertex;
    }

    path_flow
}

fn find_path_bfs(network: &FlowNetwork, source: VertexId, sink: VertexId) -> Option<ParentEdges> {
    let n = network.vertex_count();
    let mut parent: ParentEdges = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for (index, edge) in network.edges(u).iter().enumerate() {
            if !visited[edge.to] && edge.residual() > 0 {
                visited[edge.to] = true;
                parent[edge.to] = Some(EdgeHandle { vertex: u, index });
                if edge.to == sink {
                    return Some(parent);
                }
                queue.push_back(edge.to);
            }
        }
    }

    None
}

fn find_path_dfs(network: &FlowNetwork, source: VertexId, sink: VertexId) -> Option<ParentEdges> {
    let n = network.vertex_count();
    let mut parent: ParentEdges = vec![None; n];
    let mut visited = vec![false; n];
    let mut stack = vec![source];

    visited[source] = true;

    while let Some(u) = stack.pop() {
        if u == sink {
            return Some(parent);
        }
        for (index, edge) in network.edges(u).iter().enumerate() {
            if !visited[edge.to] && edge.residual() > 0 {
                visited[edge.to] = true;
                parent[edge.to] = Some(EdgeHandle { vertex: u, index });
                stack.push(edge.to);
            }
        }
    }

    None
}
