//! Technique-based sudoku inference for the Inferoku engine.
//!
//! This crate applies a library of human-style deduction techniques to
//! an [`inferoku_core::Grid`] until the puzzle is solved or no further
//! progress is possible. There is no guessing and no backtracking: if
//! pure propagation stalls, the driver reports
//! [`RoundResult::NoChanges`] and leaves the most-reduced grid in place.
//!
//! # Architecture
//!
//! - The [`technique`] module holds one implementation of the
//!   [`Technique`] trait per inference rule, from hidden singles through
//!   swordfish, XY-chains, unique rectangles, and X-cycles.
//! - The [`Solver`] driver walks the technique list in order; the first
//!   technique that changes the grid ends the round, and the next round
//!   restarts from the top so cheap inferences always run first.
//! - The [`orderings`] module provides the combinatorial enumeration
//!   used by the X-cycle search.
//!
//! # Examples
//!
//! ```
//! use inferoku_core::Grid;
//! use inferoku_solver::{RoundResult, Solver};
//!
//! let mut grid = Grid::from_givens(
//!     "53_ _7_ ___
//!      6__ 195 ___
//!      _98 ___ _6_
//!      8__ _6_ __3
//!      4__ 8_3 __1
//!      7__ _2_ __6
//!      _6_ ___ 28_
//!      ___ 419 __5
//!      ___ _8_ _79",
//! )?;
//!
//! let solver = Solver::with_all_techniques();
//! assert_eq!(solver.solve(&mut grid), RoundResult::Solved);
//! # Ok::<(), inferoku_core::ParseGridError>(())
//! ```

pub use self::{
    error::SolverError,
    solver::{RoundResult, Solver},
    technique::{BoxedTechnique, Technique, all_techniques},
};

mod error;
pub mod orderings;
mod solver;
pub mod technique;
pub mod testing;
