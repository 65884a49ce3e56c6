//! Flownet
//!
//! Maximum flow toolkit built around Dinic's algorithm.
//!
//! # Architecture
//!
//! - `flownet-algorithms`: residual [`FlowNetwork`], Dinic, Edmonds-Karp,
//!   Ford-Fulkerson and minimum cut. No I/O.
//! - this crate: instance parsing ([`FlowProblem`], [`Molecule`]),
//!   configuration ([`SolverConfig`]), errors and the [`Solver`] facade that
//!   turns results into serialisable reports.
//! - `flownet-cli`: command-line front end.
//!
//! ## Example Usage
//!
//! ```rust
//! use flownet::{FlowProblem, Solver, SolverConfig};
//!
//! // 4 vertices, 5 edges, 1-based `from to capacity` triples
//! let problem: FlowProblem = "4 5\n1 2 3\n1 3 2\n2 4 2\n3 4 3\n2 3 1\n".parse().unwrap();
//!
//! let report = Solver::new(SolverConfig::default()).solve(&problem).unwrap();
//! assert_eq!(report.max_flow, 5);
//! ```

pub mod config;
pub mod error;
mod input;
pub mod molecule;
pub mod problem;
pub mod solver;

pub use flownet_algorithms as algorithms;
pub use flownet_algorithms::{
    dinic, edmonds_karp, ford_fulkerson, min_cut, Capacity, FlowAlgorithm, FlowNetwork, FlowResult,
    FlowTotal, VertexId,
};

pub use config::SolverConfig;
pub use error::{FlowError, ParseError, SolveResult};
pub use molecule::{valence, Molecule, MoleculeNetwork};
pub use problem::{FlowProblem, ProblemEdge, MAX_VERTICES};
pub use solver::{CutReport, EdgeFlow, FlowReport, MoleculeReport, Solver};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.4.0");
    }
}
