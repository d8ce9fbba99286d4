//! The 3×5 symbol grid and its generator

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, WeightedSymbolPool};

pub const ROWS: usize = 3;
pub const COLS: usize = 5;

/// Grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Immutable symbol grid, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: [[Symbol; COLS]; ROWS],
}

impl Grid {
    pub fn from_rows(rows: [[Symbol; COLS]; ROWS]) -> Self {
        Self { rows }
    }

    /// Grid filled with a single symbol
    pub fn filled(symbol: Symbol) -> Self {
        Self {
            rows: [[symbol; COLS]; ROWS],
        }
    }

    /// Copy with one cell replaced
    pub fn with_cell(mut self, row: usize, col: usize, symbol: Symbol) -> Self {
        self.rows[row][col] = symbol;
        self
    }

    pub fn get(&self, row: usize, col: usize) -> Symbol {
        self.rows[row][col]
    }

    pub fn at(&self, cell: Cell) -> Symbol {
        self.rows[cell.row as usize][cell.col as usize]
    }

    pub fn rows(&self) -> &[[Symbol; COLS]; ROWS] {
        &self.rows
    }

    /// Symbols of one column, top to bottom
    pub fn column(&self, col: usize) -> [Symbol; ROWS] {
        [self.rows[0][col], self.rows[1][col], self.rows[2][col]]
    }

    /// Occurrences of a symbol anywhere on the grid
    pub fn count(&self, symbol: Symbol) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|s| **s == symbol)
            .count()
    }

    /// Occurrences of a symbol within a column range
    pub fn count_in_columns(&self, symbol: Symbol, cols: RangeInclusive<usize>) -> usize {
        cols.map(|c| self.column(c).iter().filter(|s| **s == symbol).count())
            .sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let codes: Vec<&str> = row.iter().map(Symbol::code).collect();
            write!(f, "{}", codes.join(" "))?;
        }
        Ok(())
    }
}

/// Draws grids from a weighted pool
///
/// Cells are independent draws, taken row-major so a seeded RNG always
/// reproduces the same grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridGenerator;

impl GridGenerator {
    pub fn generate<R: Rng + ?Sized>(pool: &WeightedSymbolPool, rng: &mut R) -> Grid {
        let mut rows = [[Symbol::Wrench; COLS]; ROWS];
        for row in rows.iter_mut() {
            for cell in row.iter_mut() {
                *cell = pool.sample(rng);
            }
        }
        Grid { rows }
    }
}
