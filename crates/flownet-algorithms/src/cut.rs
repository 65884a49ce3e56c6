//! Minimum s-t cut
//!
//! Read off a network that has already been drained by one of the max flow
//! solvers: whatever the source can still reach through residual capacity
//! forms the source side.

use super::network::{EdgeHandle, FlowNetwork, FlowTotal, VertexId};
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a min cut extraction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinCut {
    /// `true` for vertices on the source side
    pub source_side: Vec<bool>,
    /// Forward edges crossing from the source side to the sink side
    pub edges: Vec<EdgeHandle>,
    /// Total capacity of `edges`
    pub capacity: FlowTotal,
}

impl MinCut {
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.source_side[vertex]
    }
}

/// Minimum cut separating `source` from the sink of a maximum flow.
///
/// Only meaningful after a max flow run; on a network without flow this
/// returns the cut around everything reachable from `source`.
pub fn min_cut(network: &FlowNetwork, source: VertexId) -> MinCut {
    let mut source_side = vec![false; network.vertex_count()];
    let mut queue = VecDeque::new();

    source_side[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for edge in network.edges(u) {
            if !source_side[edge.to] && edge.residual() > 0 {
                source_side[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
    }

    let edges: Vec<EdgeHandle> = network
        .forward_edges()
        .filter(|(_, edge)| source_side[edge.from] && !source_side[edge.to])
        .map(|(handle, _)| handle)
        .collect();

    let capacity = cut_capacity(network, &edges);
    MinCut { source_side, edges, capacity }
}

/// Sum of capacities of a set of edges
pub fn cut_capacity(network: &FlowNetwork, edges: &[EdgeHandle]) -> FlowTotal {
    edges
        .iter()
        .map(|&h| network.edge(h).capacity as FlowTotal)
        .sum()
}
