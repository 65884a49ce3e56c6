//! Error types for problem loading and solving

use thiserror::Error;

/// Problems found while reading an instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Invalid integer '{token}' at token {position}")]
    InvalidInteger { token: String, position: usize },

    #[error("Network must have at least one vertex")]
    EmptyNetwork,

    #[error("Vertex count {vertex_count} exceeds the limit of {limit}")]
    TooManyVertices { vertex_count: i64, limit: usize },

    #[error("Vertex {vertex} out of range 1..={vertex_count}")]
    VertexOutOfRange { vertex: i64, vertex_count: usize },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity { from: i64, to: i64, capacity: i64 },

    #[error("Unexpected trailing input '{token}' at token {position}")]
    TrailingInput { token: String, position: usize },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

/// Errors that can occur while loading or solving a flow problem
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Terminal vertex {vertex} out of range 1..={vertex_count}")]
    InvalidTerminal { vertex: usize, vertex_count: usize },
}

pub type SolveResult<T> = Result<T, FlowError>;
