//! Core data structures for the Inferoku sudoku inference engine.
//!
//! This crate provides the candidate-grid data model that the technique
//! library operates on:
//!
//! - **Basic types**: [`Digit`] (1-9), [`Position`] (row/column with
//!   derived band, stack, and box metadata), [`Unit`] (the 27 houses),
//!   [`Division`] (houses plus bands and stacks).
//! - **Bitmask sets**: [`DigitSet`] (a 9-bit candidate mask) and
//!   [`CellSet`] (an 81-bit position mask with precomputed structural
//!   masks), so membership, cardinality, and the set algebra are all
//!   single bitwise operations.
//! - **Grid state**: [`Cell`] (a position plus a candidate set) and
//!   [`Grid`] (the flat 81-cell array with row/column/box/band/stack
//!   views, generation-counted caches, automatic basic solve, text
//!   parsing and printing, and consistency checking).
//!
//! # Design
//!
//! Cells are owned once, in a flat row-major array; every view shares
//! that storage through position masks, so mutation through one view is
//! visible through all of them by construction. Candidate mutation goes
//! through [`Grid`] only, which keeps the elementary invariant — a
//! solved cell's value never remains in its peers — re-established after
//! every change.
//!
//! # Examples
//!
//! ```
//! use inferoku_core::{Digit, Grid};
//!
//! let grid = Grid::from_givens(
//!     "5________ _________ _________ _________ _________ \
//!      _________ _________ _________ _________",
//! )?;
//! assert_eq!(grid.cell(0, 0).value(), Some(Digit::D5));
//! assert!(!grid.cell(0, 1).contains(Digit::D5));
//! # Ok::<(), inferoku_core::ParseGridError>(())
//! ```

pub use self::{
    cell::Cell,
    cell_set::{CellSet, CellSetIter, PivotsWithFollowing},
    digit::Digit,
    digit_set::{DigitSet, DigitSetIter},
    grid::{ConsistencyError, Grid, ParseGridError},
    position::Position,
    unit::{Division, Unit},
};

mod cell;
mod cell_set;
mod digit;
mod digit_set;
mod grid;
mod position;
mod unit;
