//! Solver facade
//!
//! Builds residual networks from parsed instances, runs the configured
//! algorithm and packages the answer into serialisable reports. All vertex
//! numbers in reports use the external 1-based numbering.

use crate::config::SolverConfig;
use crate::error::{FlowError, SolveResult};
use crate::molecule::Molecule;
use crate::problem::FlowProblem;
use flownet_algorithms::{dinic, min_cut, Capacity, FlowAlgorithm, FlowEdge, FlowNetwork, FlowTotal, VertexId};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Flow carried by one input edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeFlow {
    pub from: usize,
    pub to: usize,
    pub capacity: Capacity,
    pub flow: Capacity,
}

/// Answer to a max flow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub algorithm: FlowAlgorithm,
    pub source: usize,
    pub sink: usize,
    pub max_flow: FlowTotal,
    pub phases: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeFlow>,
}

/// Minimum cut of a max flow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutReport {
    pub source: usize,
    pub sink: usize,
    pub capacity: FlowTotal,
    pub source_side: Vec<usize>,
    pub edges: Vec<EdgeFlow>,
}

/// Answer to a molecule instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoleculeReport {
    pub valid: bool,
    pub bonds: FlowTotal,
    pub left_valence: FlowTotal,
    pub right_valence: FlowTotal,
}

impl fmt::Display for MoleculeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.valid { "Valid" } else { "Invalid" })
    }
}

/// Runs max flow computations according to a [`SolverConfig`]
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Resolve configured terminals to 0-based indices
    fn terminals(&self, problem: &FlowProblem) -> SolveResult<(VertexId, VertexId)> {
        let vertex_count = problem.vertex_count();
        let resolve = |configured: Option<usize>, default: VertexId| match configured {
            None => Ok(default),
            Some(vertex) if (1..=vertex_count).contains(&vertex) => Ok(vertex - 1),
            Some(vertex) => Err(FlowError::InvalidTerminal { vertex, vertex_count }),
        };
        Ok((
            resolve(self.config.source, problem.default_source())?,
            resolve(self.config.sink, problem.default_sink())?,
        ))
    }

    /// Compute the maximum flow of `problem`
    pub fn solve(&self, problem: &FlowProblem) -> SolveResult<FlowReport> {
        let (source, sink) = self.terminals(problem)?;
        let mut network = problem.build_network();
        let algorithm = self.config.algorithm;

        let result = algorithm.run(&mut network, source, sink);
        info!(
            %algorithm,
            vertices = problem.vertex_count(),
            edges = problem.edges().len(),
            max_flow = %result.max_flow,
            phases = result.phases,
            "max flow computed"
        );

        let edges = if self.config.report_edges {
            edge_flows(&network)
        } else {
            Vec::new()
        };

        Ok(FlowReport {
            algorithm,
            source: source + 1,
            sink: sink + 1,
            max_flow: result.max_flow,
            phases: result.phases,
            edges,
        })
    }

    /// Compute a minimum cut of `problem` after draining it with the configured algorithm
    pub fn min_cut(&self, problem: &FlowProblem) -> SolveResult<CutReport> {
        let (source, sink) = self.terminals(problem)?;
        let mut network = problem.build_network();
        self.config.algorithm.run(&mut network, source, sink);

        let cut = min_cut(&network, source);
        info!(capacity = %cut.capacity, edges = cut.edges.len(), "min cut computed");

        let source_side = (0..network.vertex_count())
            .filter(|&v| cut.contains(v))
            .map(|v| v + 1)
            .collect();
        let edges = cut
            .edges
            .iter()
            .map(|&h| to_edge_flow(network.edge(h)))
            .collect();

        Ok(CutReport {
            source: source + 1,
            sink: sink + 1,
            capacity: cut.capacity,
            source_side,
            edges,
        })
    }

    /// Decide whether every atom of `molecule` can use exactly its valence
    pub fn check_molecule(&self, molecule: &Molecule) -> MoleculeReport {
        let mut built = molecule.build_network();
        let bonds = dinic(&mut built.network, built.source, built.sink).max_flow;

        let valid = bonds != 0 && bonds == built.left_valence && bonds == built.right_valence;
        info!(
            height = molecule.height(),
            width = molecule.width(),
            bonds = %bonds,
            valid,
            "molecule checked"
        );

        MoleculeReport {
            valid,
            bonds,
            left_valence: built.left_valence,
            right_valence: built.right_valence,
        }
    }
}

fn to_edge_flow(edge: &FlowEdge) -> EdgeFlow {
    EdgeFlow {
        from: edge.from + 1,
        to: edge.to + 1,
        capacity: edge.capacity,
        flow: edge.flow,
    }
}

/// Per-edge flow of every input edge, grouped by source vertex
fn edge_flows(network: &FlowNetwork) -> Vec<EdgeFlow> {
    network
        .forward_edges()
        .map(|(_, edge)| to_edge_flow(edge))
        .collect()
}
