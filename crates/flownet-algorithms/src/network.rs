//! Residual flow network
//!
//! Adjacency-list graph where every inserted edge is paired with a zero-capacity
//! back-edge so that flow can later be rerouted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertex identifier (dense index in `0..vertex_count`)
pub type VertexId = usize;

/// Edge capacity and per-edge flow
pub type Capacity = i64;

/// Running flow totals, wider than [`Capacity`] so sums of pushes never overflow
pub type FlowTotal = i128;

/// A directed, residual-capable edge record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowEdge {
    pub from: VertexId,
    pub to: VertexId,
    /// Fixed at creation; 0 for residual back-edges
    pub capacity: Capacity,
    /// Current flow. Residual back-edges hold the negated flow of their sibling.
    pub flow: Capacity,
    /// Position of the paired edge in the adjacency list of `to`
    pub reverse: usize,
    /// Set on the back-edge half of a pair
    pub residual_edge: bool,
}

impl FlowEdge {
    /// Additional flow that can still be pushed along this edge
    #[inline]
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Position of an edge record: the owning vertex and the index in its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeHandle {
    pub vertex: VertexId,
    pub index: usize,
}

/// Directed flow network backed by per-vertex edge lists.
///
/// Insertion order within each list is preserved; the flow algorithms scan
/// edges in that order. Running an algorithm only ever changes `flow` values.
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<FlowEdge>>,
    edge_count: usize,
}

impl FlowNetwork {
    /// Create a network with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        FlowNetwork {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Insert a directed edge together with its residual back-edge.
    ///
    /// The forward edge is appended to `from`'s list and the back-edge (capacity 0)
    /// to `to`'s list; each records the other's position. Returns the handle of
    /// the forward edge.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range. Capacities must be non-negative.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: Capacity) -> EdgeHandle {
        debug_assert!(capacity >= 0, "negative capacity {} on {}->{}", capacity, from, to);
        assert!(
            from < self.adjacency.len() && to < self.adjacency.len(),
            "edge {}->{} out of range for {} vertices",
            from,
            to,
            self.adjacency.len()
        );

        let forward_index = self.adjacency[from].len();
        // A self-loop puts both halves in the same list, back-edge right after.
        let back_index = if from == to {
            forward_index + 1
        } else {
            self.adjacency[to].len()
        };

        self.adjacency[from].push(FlowEdge {
            from,
            to,
            capacity,
            flow: 0,
            reverse: back_index,
            residual_edge: false,
        });
        self.adjacency[to].push(FlowEdge {
            from: to,
            to: from,
            capacity: 0,
            flow: 0,
            reverse: forward_index,
            residual_edge: true,
        });
        self.edge_count += 1;

        EdgeHandle { vertex: from, index: forward_index }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges inserted through [`add_edge`](Self::add_edge), back-edges excluded
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All edge records leaving `vertex`, back-edges included, in insertion order
    pub fn edges(&self, vertex: VertexId) -> &[FlowEdge] {
        &self.adjacency[vertex]
    }

    /// Look up a single edge record
    pub fn edge(&self, handle: EdgeHandle) -> &FlowEdge {
        &self.adjacency[handle.vertex][handle.index]
    }

    /// Handle of the paired edge of `handle`
    pub fn sibling(&self, handle: EdgeHandle) -> EdgeHandle {
        let edge = self.edge(handle);
        EdgeHandle { vertex: edge.to, index: edge.reverse }
    }

    /// Forward edges only, grouped by source vertex in insertion order
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeHandle, &FlowEdge)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(vertex, list)| {
            list.iter()
                .enumerate()
                .filter(|(_, edge)| !edge.residual_edge)
                .map(move |(index, edge)| (EdgeHandle { vertex, index }, edge))
        })
    }

    /// Push `amount` units along an edge, mirroring it on the paired edge.
    ///
    /// `amount` must not exceed the edge's residual capacity.
    pub fn push_flow(&mut self, handle: EdgeHandle, amount: Capacity) {
        let edge = &mut self.adjacency[handle.vertex][handle.index];
        debug_assert!(amount <= edge.residual(), "push of {} exceeds residual {}", amount, edge.residual());
        edge.flow += amount;
        let (to, reverse) = (edge.to, edge.reverse);
        self.adjacency[to][reverse].flow -= amount;
    }

    /// Net flow leaving `vertex` (outgoing minus incoming)
    pub fn outflow(&self, vertex: VertexId) -> FlowTotal {
        // Back-edges carry the negated incoming flow, so a plain sum nets it out.
        self.adjacency[vertex]
            .iter()
            .map(|edge| edge.flow as FlowTotal)
            .sum()
    }

    /// Clear all flow, returning the network to its freshly built state
    pub fn reset_flow(&mut self) {
        for edge in self.adjacency.iter_mut().flatten() {
            edge.flow = 0;
        }
    }
}
