use crate::alphabet::{bigram_key, Alphabet};
use crate::error::{HeatmapError, Result};
use crate::table::CountTable;

/// One cell of the frequency matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub bigram: String,
    pub count: u64,
}

/// Square grid of bigram counts; row = first symbol, column = second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMatrix {
    symbols: Vec<char>,
    rows: Vec<Vec<Cell>>,
}

impl FrequencyMatrix {
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn max_count(&self) -> u64 {
        self.cells().map(|c| c.count).max().unwrap_or(0)
    }

    pub fn min_count(&self) -> u64 {
        self.cells().map(|c| c.count).min().unwrap_or(0)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// Arrange table counts into a grid in `alphabet` order
///
/// `alphabet` may be the table's own or any reordering or subset of it; a
/// symbol the table does not know is an error.
pub fn build_matrix(table: &CountTable, alphabet: &Alphabet) -> Result<FrequencyMatrix> {
    if let Some(&missing) = alphabet
        .symbols()
        .iter()
        .find(|&&s| !table.alphabet().contains(s))
    {
        return Err(HeatmapError::AlphabetMismatch(format!(
            "symbol {:?} is not counted in the table",
            missing
        )));
    }

    let symbols = alphabet.symbols().to_vec();
    let rows = symbols
        .iter()
        .map(|&first| {
            symbols
                .iter()
                .map(|&second| Cell {
                    bigram: bigram_key(first, second),
                    count: table.count(first, second).unwrap_or(0),
                })
                .collect()
        })
        .collect();

    Ok(FrequencyMatrix { symbols, rows })
}
