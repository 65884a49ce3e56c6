//! Max flow problem instances
//!
//! Text format: `n m` followed by `m` lines of `from to capacity`, vertices
//! numbered from 1. Source defaults to vertex 1 and sink to vertex `n`.

use crate::error::{ParseError, SolveResult};
use crate::input::Tokens;
use flownet_algorithms::{Capacity, FlowEdge, FlowNetwork, VertexId};
use std::path::Path;
use std::str::FromStr;

/// Largest vertex count whose adjacency table fits in a single allocation
pub const MAX_VERTICES: usize = isize::MAX as usize / std::mem::size_of::<Vec<FlowEdge>>();

/// A directed edge of an instance, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemEdge {
    pub from: VertexId,
    pub to: VertexId,
    pub capacity: Capacity,
}

/// A validated max flow instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowProblem {
    vertex_count: usize,
    edges: Vec<ProblemEdge>,
}

impl FlowProblem {
    pub fn new(vertex_count: usize) -> Self {
        FlowProblem { vertex_count, edges: Vec::new() }
    }

    /// Append a 0-based edge. Endpoints must be below `vertex_count` and the
    /// capacity non-negative.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: Capacity) -> Result<(), ParseError> {
        for vertex in [from, to] {
            if vertex >= self.vertex_count {
                return Err(ParseError::VertexOutOfRange {
                    vertex: vertex as i64 + 1,
                    vertex_count: self.vertex_count,
                });
            }
        }
        if capacity < 0 {
            return Err(ParseError::NegativeCapacity {
                from: from as i64 + 1,
                to: to as i64 + 1,
                capacity,
            });
        }
        self.edges.push(ProblemEdge { from, to, capacity });
        Ok(())
    }

    /// Parse the `n m` + triples text format
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(input);

        let vertex_count = tokens.next_int("vertex count")?;
        if vertex_count <= 0 {
            return Err(ParseError::EmptyNetwork);
        }
        let vertex_count = usize::try_from(vertex_count)
            .ok()
            .filter(|&n| n <= MAX_VERTICES)
            .ok_or(ParseError::TooManyVertices { vertex_count, limit: MAX_VERTICES })?;

        let edge_count = tokens.next_int("edge count")?;
        if edge_count < 0 {
            return Err(ParseError::InvalidInteger {
                token: edge_count.to_string(),
                position: 2,
            });
        }

        let mut problem = FlowProblem::new(vertex_count);
        for _ in 0..edge_count {
            let from = tokens.next_int("edge source")?;
            let to = tokens.next_int("edge target")?;
            let capacity = tokens.next_int("edge capacity")?;

            let from = to_index(from, vertex_count)?;
            let to = to_index(to, vertex_count)?;
            problem.add_edge(from, to, capacity)?;
        }

        tokens.finish()?;
        Ok(problem)
    }

    /// Read and parse an instance file
    pub fn load(path: impl AsRef<Path>) -> SolveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edges(&self) -> &[ProblemEdge] {
        &self.edges
    }

    /// Vertex 1 in the external numbering
    pub fn default_source(&self) -> VertexId {
        0
    }

    /// Vertex `n` in the external numbering
    pub fn default_sink(&self) -> VertexId {
        self.vertex_count - 1
    }

    /// Build a fresh residual network, edges inserted in input order
    pub fn build_network(&self) -> FlowNetwork {
        let mut network = FlowNetwork::new(self.vertex_count);
        for edge in &self.edges {
            network.add_edge(edge.from, edge.to, edge.capacity);
        }
        network
    }
}

impl FromStr for FlowProblem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn to_index(vertex: i64, vertex_count: usize) -> Result<VertexId, ParseError> {
    if vertex < 1 || vertex as u64 > vertex_count as u64 {
        return Err(ParseError::VertexOutOfRange { vertex, vertex_count });
    }
    Ok((vertex - 1) as VertexId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instance() {
        let problem: FlowProblem = "4 5\n1 2 3\n1 3 2\n2 4 2\n3 4 3\n2 3 1\n".parse().unwrap();
        assert_eq!(problem.vertex_count(), 4);
        assert_eq!(problem.edges().len(), 5);
        assert_eq!(problem.edges()[0], ProblemEdge { from: 0, to: 1, capacity: 3 });
        assert_eq!(problem.default_source(), 0);
        assert_eq!(problem.default_sink(), 3);

        let network = problem.build_network();
        assert_eq!(network.edge_count(), 5);
        assert_eq!(network.edges(0).len(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_vertices() {
        assert_eq!(
            FlowProblem::parse("3 1\n1 4 2"),
            Err(ParseError::VertexOutOfRange { vertex: 4, vertex_count: 3 })
        );
        assert_eq!(
            FlowProblem::parse("3 1\n0 2 2"),
            Err(ParseError::VertexOutOfRange { vertex: 0, vertex_count: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_negative_capacity() {
        assert_eq!(
            FlowProblem::parse("2 1\n1 2 -3"),
            Err(ParseError::NegativeCapacity { from: 1, to: 2, capacity: -3 })
        );
    }

    #[test]
    fn test_parse_structure_errors() {
        assert_eq!(FlowProblem::parse("0 0"), Err(ParseError::EmptyNetwork));
        assert_eq!(
            FlowProblem::parse("2 2\n1 2 3\n"),
            Err(ParseError::UnexpectedEof { expected: "edge source" })
        );
        assert!(matches!(
            FlowProblem::parse("2 1\n1 2 3 4"),
            Err(ParseError::TrailingInput { .. })
        ));
        assert!(matches!(
            FlowProblem::parse("2 one"),
            Err(ParseError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unallocatable_vertex_count() {
        assert_eq!(
            FlowProblem::parse("4611686018427387904 0"),
            Err(ParseError::TooManyVertices {
                vertex_count: 4611686018427387904,
                limit: MAX_VERTICES,
            })
        );
        assert_eq!(
            FlowProblem::parse(&format!("{} 0", MAX_VERTICES as u64 + 1)),
            Err(ParseError::TooManyVertices {
                vertex_count: MAX_VERTICES as i64 + 1,
                limit: MAX_VERTICES,
            })
        );
    }
}
