//! Grid molecule validity
//!
//! Atoms sit on a rectangular grid and may only bond with orthogonal
//! neighbours, at most one bond per neighbour pair. A molecule is valid when
//! every atom uses exactly its valence. Colouring the grid like a chessboard
//! makes this a bipartite matching with multiplicities, which is decided by a
//! single max flow.

use crate::error::{ParseError, SolveResult};
use crate::input::Tokens;
use flownet_algorithms::{Capacity, FlowNetwork, FlowTotal, VertexId};
use std::path::Path;
use std::str::FromStr;

/// Number of bonds an atom must form; unknown cells are empty
pub fn valence(atom: char) -> Capacity {
    match atom {
        'H' => 1,
        'O' => 2,
        'N' => 3,
        'C' => 4,
        _ => 0,
    }
}

/// A `height x width` grid of atom symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    height: usize,
    width: usize,
    cells: Vec<char>,
}

/// Flow network built from a molecule together with the valence totals of
/// both colour classes
#[derive(Debug, Clone)]
pub struct MoleculeNetwork {
    pub network: FlowNetwork,
    pub source: VertexId,
    pub sink: VertexId,
    pub left_valence: FlowTotal,
    pub right_valence: FlowTotal,
}

impl Molecule {
    /// Build from rows of equal length
    pub fn from_rows<I, S>(rows: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut height = 0;
        let mut width = None;
        let mut cells = Vec::new();
        for row in rows {
            let row: Vec<char> = row.as_ref().chars().collect();
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ParseError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    height + 1,
                    row.len(),
                    expected
                )));
            }
            cells.extend(row);
            height += 1;
        }
        Ok(Molecule { height, width: width.unwrap_or(0), cells })
    }

    /// Parse `height width` followed by `height * width` non-whitespace cells
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(input);
        let height = tokens.next_int("grid height")?;
        let width = tokens.next_int("grid width")?;
        if height < 0 || width < 0 {
            return Err(ParseError::InvalidGrid(format!(
                "dimensions {}x{} must not be negative",
                height, width
            )));
        }
        let (height, width) = (height as usize, width as usize);
        let cell_count = height.checked_mul(width).ok_or_else(|| {
            ParseError::InvalidGrid(format!("dimensions {}x{} are too large", height, width))
        })?;
        let cells = tokens.next_chars(cell_count, "grid cell")?;
        tokens.finish()?;
        Ok(Molecule { height, width, cells })
    }

    pub fn load(path: impl AsRef<Path>) -> SolveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn atom(&self, row: usize, col: usize) -> char {
        self.cells[row * self.width + col]
    }

    fn vertex(&self, row: usize, col: usize) -> VertexId {
        row * self.width + col + 1
    }

    /// Source feeds even cells with their valence, even cells send one unit
    /// to each neighbour, odd cells drain their valence into the sink.
    pub fn build_network(&self) -> MoleculeNetwork {
        let cell_count = self.height * self.width;
        let source = 0;
        let sink = cell_count + 1;
        let mut network = FlowNetwork::new(cell_count + 2);
        let mut left_valence: FlowTotal = 0;
        let mut right_valence: FlowTotal = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.vertex(row, col);
                let bonds = valence(self.atom(row, col));

                if (row + col) % 2 == 0 {
                    network.add_edge(source, cell, bonds);
                    left_valence += bonds as FlowTotal;

                    if row + 1 < self.height {
                        network.add_edge(cell, self.vertex(row + 1, col), 1);
                    }
                    if col + 1 < self.width {
                        network.add_edge(cell, self.vertex(row, col + 1), 1);
                    }
                    if row > 0 {
                        network.add_edge(cell, self.vertex(row - 1, col), 1);
                    }
                    if col > 0 {
                        network.add_edge(cell, self.vertex(row, col - 1), 1);
                    }
                } else {
                    network.add_edge(cell, sink, bonds);
                    right_valence += bonds as FlowTotal;
                }
            }
        }

        MoleculeNetwork { network, source, sink, left_valence, right_valence }
    }
}

impl FromStr for Molecule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
