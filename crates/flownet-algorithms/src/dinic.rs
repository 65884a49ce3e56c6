//! Dinic's maximum flow algorithm
//!
//! Alternates two phases until the sink is unreachable:
//! 1. BFS over positive-residual edges labels every vertex with its hop distance
//!    from the source (the level graph).
//! 2. Repeated DFS from the source, following only edges that go exactly one
//!    level deeper, pushes a blocking flow.
//!
//! The sink's level strictly grows between phases, so there are at most
//! `V - 1` phases, each costing O(V·E).

use super::flow::FlowResult;
use super::network::{Capacity, EdgeHandle, FlowNetwork, FlowTotal, VertexId};
use std::collections::VecDeque;
use tracing::debug;

/// Flow bound every path search starts from.
/// No single residual capacity can exceed it.
pub const UNBOUNDED: Capacity = Capacity::MAX;

/// BFS distance labels over the residual graph for one phase
#[derive(Debug, Clone)]
pub struct LevelGraph {
    levels: Vec<Option<usize>>,
}

impl LevelGraph {
    /// Label every vertex reachable from `source` through edges with positive
    /// residual capacity with its shortest hop distance.
    pub fn build(network: &FlowNetwork, source: VertexId) -> Self {
        let mut levels = vec![None; network.vertex_count()];
        let mut queue = VecDeque::new();

        levels[source] = Some(0);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            let next_level = levels[u].map(|l| l + 1);
            for edge in network.edges(u) {
                if levels[edge.to].is_none() && edge.residual() > 0 {
                    levels[edge.to] = next_level;
                    queue.push_back(edge.to);
                }
            }
        }

        LevelGraph { levels }
    }

    /// Level of `vertex`, `None` when unreachable this phase
    pub fn level(&self, vertex: VertexId) -> Option<usize> {
        self.levels[vertex]
    }

    pub fn reaches(&self, vertex: VertexId) -> bool {
        self.levels[vertex].is_some()
    }

    /// Whether an edge `from -> to` belongs to the level graph
    fn is_next(&self, from: VertexId, to: VertexId) -> bool {
        match (self.levels[from], self.levels[to]) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    }
}

/// Per-vertex scan position into the edge lists, valid for one phase.
///
/// Cursors only move forward until the next [`reset`](Self::reset): an edge
/// that could not carry flow to the sink is never looked at again in the
/// same phase.
#[derive(Debug, Clone)]
pub struct EdgeCursors {
    next: Vec<usize>,
}

impl EdgeCursors {
    pub fn new(vertex_count: usize) -> Self {
        EdgeCursors { next: vec![0; vertex_count] }
    }

    /// Rewind every cursor to the first edge; called once per phase
    pub fn reset(&mut self) {
        self.next.iter_mut().for_each(|c| *c = 0);
    }

    /// Edge index the cursor of `vertex` points at, or `None` once the list is exhausted
    pub fn current(&self, vertex: VertexId, degree: usize) -> Option<usize> {
        let position = self.next[vertex];
        (position < degree).then_some(position)
    }

    /// Permanently skip the current edge of `vertex` for the rest of the phase
    pub fn advance(&mut self, vertex: VertexId) {
        self.next[vertex] += 1;
    }
}

/// Find one source-to-sink path in the level graph starting at `source` and
/// push up to `bound` units along it. Returns the amount pushed (0 if none).
///
/// The walk keeps the current path on an explicit stack, so its depth is
/// bounded by the sink's level and not by the thread's call stack. A dead end
/// pops one edge and permanently advances the cursor of the vertex it left.
///
/// Returns right after the first successful push without moving any cursor,
/// so the same edges are tried again on the next call while they have
/// residual capacity left.
fn push_path(
    network: &mut FlowNetwork,
    levels: &LevelGraph,
    cursors: &mut EdgeCursors,
    source: VertexId,
    sink: VertexId,
    bound: Capacity,
) -> Capacity {
    let mut path: Vec<EdgeHandle> = Vec::new();
    let mut vertex = source;

    loop {
        if vertex == sink {
            let pushed = path
                .iter()
                .map(|&handle| network.edge(handle).residual())
                .fold(bound, Capacity::min);
            for &handle in &path {
                network.push_flow(handle, pushed);
            }
            return pushed;
        }

        match cursors.current(vertex, network.edges(vertex).len()) {
            Some(index) => {
                let edge = network.edges(vertex)[index];
                if edge.residual() > 0 && levels.is_next(vertex, edge.to) {
                    path.push(EdgeHandle { vertex, index });
                    vertex = edge.to;
                } else {
                    cursors.advance(vertex);
                }
            }
            None => {
                // Dead end: back up and skip the edge that led here.
                let Some(handle) = path.pop() else {
                    return 0;
                };
                vertex = handle.vertex;
                cursors.advance(vertex);
            }
        }
    }
}

/// Dinic's algorithm
///
/// Drives flow from `source` to `sink` until no augmenting path remains and
/// returns the net flow leaving the source. Flow already present in the network
/// (from an earlier run) is kept and counted, so calling this on a drained
/// network returns the same value without pushing anything.
pub fn dinic(network: &mut FlowNetwork, source: VertexId, sink: VertexId) -> FlowResult {
    if source == sink {
        return FlowResult { max_flow: 0, phases: 0 };
    }

    let mut total: FlowTotal = network.outflow(source);
    let mut cursors = EdgeCursors::new(network.vertex_count());
    let mut phases = 0;

    loop {
        let levels = LevelGraph::build(network, source);
        let Some(sink_level) = levels.level(sink) else {
            break;
        };
        phases += 1;

        cursors.reset();
        let mut phase_flow: FlowTotal = 0;
        loop {
            let pushed = push_path(network, &levels, &mut cursors, source, sink, UNBOUNDED);
            if pushed == 0 {
                break;
            }
            phase_flow += pushed as FlowTotal;
        }

        debug!(phase = phases, sink_level, pushed = %phase_flow, "dinic phase complete");
        total += phase_flow;
    }

    FlowResult { max_flow: total, phases }
}
