use inferoku_core::{CellSet, Digit, DigitSet, Grid, Unit};

use crate::{
    SolverError,
    orderings::combinations,
    technique::{BoxedTechnique, Technique},
};

const NAME_TRIPLE: &str = "Hidden Triple";
const NAME_QUAD: &str = "Hidden Quad";

/// A technique that restricts cells using hidden sets of size 3 or 4.
///
/// A hidden set of size `n` occurs when `n` digits of a house fit, taken
/// together, into exactly `n` cells. Those cells must hold precisely
/// those digits, so every other candidate can be removed from them.
#[derive(Debug, Clone, Copy)]
pub struct HiddenSet {
    count: usize,
}

impl HiddenSet {
    /// Creates the size-3 variant (hidden triple).
    #[must_use]
    pub const fn triple() -> Self {
        Self { count: 3 }
    }

    /// Creates the size-4 variant (hidden quad).
    #[must_use]
    pub const fn quad() -> Self {
        Self { count: 4 }
    }
}

impl Technique for HiddenSet {
    fn name(&self) -> &'static str {
        match self.count {
            3 => NAME_TRIPLE,
            _ => NAME_QUAD,
        }
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for unit in Unit::ALL {
            let mut interesting: Vec<(Digit, CellSet)> = Vec::new();
            for digit in Digit::ALL {
                let Some(cells) = unsolved_digit_cells(grid, unit, digit) else {
                    continue;
                };
                if !cells.is_empty() && cells.len() <= self.count {
                    interesting.push((digit, cells));
                }
            }
            if interesting.len() < self.count {
                continue;
            }

            for combo in combinations(interesting.len(), self.count) {
                let mut union = CellSet::EMPTY;
                let mut digits = DigitSet::EMPTY;
                for &i in &combo {
                    let (digit, cells) = interesting[i];
                    union |= cells;
                    digits.insert(digit);
                }
                if union.len() != self.count {
                    continue;
                }
                let mut changed = false;
                for pos in union {
                    changed |= grid.restrict(pos, digits);
                }
                if changed {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Unsolved cells of the unit holding `digit`, or `None` when the digit
/// is already solved there.
fn unsolved_digit_cells(grid: &Grid, unit: Unit, digit: Digit) -> Option<CellSet> {
    let mut cells = CellSet::EMPTY;
    for pos in unit.positions() {
        let cell = grid.cell_at(pos);
        if !cell.contains(digit) {
            continue;
        }
        if cell.is_solved() {
            return None;
        }
        cells.insert(pos);
    }
    Some(cells)
}
