//! Maximum flow on residual networks
//!
//! The core is Dinic's algorithm ([`dinic`]); Edmonds-Karp and Ford-Fulkerson
//! run over the same [`FlowNetwork`] and [`min_cut`] reads the cut off a
//! drained network.

pub mod network;
pub mod dinic;
pub mod flow;
pub mod cut;

pub use network::{Capacity, EdgeHandle, FlowEdge, FlowNetwork, FlowTotal, VertexId};
pub use dinic::{dinic, EdgeCursors, LevelGraph, UNBOUNDED};
pub use flow::{edmonds_karp, ford_fulkerson, FlowAlgorithm, FlowResult, UnknownAlgorithm};
pub use cut::{cut_capacity, min_cut, MinCut};
