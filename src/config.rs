//! Solver configuration

use crate::error::SolveResult;
use flownet_algorithms::FlowAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Solver configuration
///
/// Terminals use the external 1-based numbering; `None` means the first
/// (source) or last (sink) vertex of the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Max flow algorithm to run
    pub algorithm: FlowAlgorithm,
    /// Source vertex (1-based)
    pub source: Option<usize>,
    /// Sink vertex (1-based)
    pub sink: Option<usize>,
    /// Include the per-edge flow assignment in reports
    pub report_edges: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: FlowAlgorithm::Dinic,
            source: None,
            sink: None,
            report_edges: true,
        }
    }
}

impl SolverConfig {
    pub fn from_yaml_str(yaml: &str) -> SolveResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> SolveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn with_algorithm(mut self, algorithm: FlowAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_terminals(mut self, source: Option<usize>, sink: Option<usize>) -> Self {
        if source.is_some() {
            self.source = source;
        }
        if sink.is_some() {
            self.sink = sink;
        }
        self
    }
}
