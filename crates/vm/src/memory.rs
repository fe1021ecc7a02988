//! Growable zero-initialized memory.

use std::collections::BTreeMap;

/// Highest address the dense region will grow to cover.
///
/// Writes beyond it go to a sparse map, so a program can touch any
/// non-negative address without allocating everything below it.
pub const DENSE_LIMIT: usize = 1 << 20;

/// Machine memory: a dense vector of cells plus a sparse overflow map.
///
/// Addresses that were never written read as 0 without allocating.
/// Writing past the dense region zero-fills the gap, unless the address is
/// at or above [`DENSE_LIMIT`] and outside the loaded program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    sparse: BTreeMap<usize, i64>,
}

impl Memory {
    /// Create memory holding `cells` at addresses `0..cells.len()`.
    pub fn new(cells: Vec<i64>) -> Self {
        Self {
            cells,
            sparse: BTreeMap::new(),
        }
    }

    /// Read a cell. Never-written addresses are 0.
    pub fn get(&self, address: usize) -> i64 {
        match self.cells.get(address) {
            Some(&value) => value,
            None => self.sparse.get(&address).copied().unwrap_or(0),
        }
    }

    /// Write a cell, extending memory if needed.
    pub fn set(&mut self, address: usize, value: i64) {
        if address < self.cells.len() {
            self.cells[address] = value;
        } else if address < DENSE_LIMIT {
            self.cells.resize(address + 1, 0);
            self.cells[address] = value;
        } else {
            self.sparse.insert(address, value);
        }
    }

    /// Length of the dense region. Sparse cells are not counted.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if nothing has been loaded or written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.sparse.is_empty()
    }

    /// The dense region as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }
}
