use inferoku_core::{CellSet, Digit, DigitSet, Grid, Unit};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Hidden Pair";

/// A technique that restricts cells using a hidden pair within a house.
///
/// A "hidden pair" occurs when two digits appear in the candidates of
/// exactly the same two cells of a house and nowhere else in it. Those
/// two cells must hold the pair, so every other candidate can be removed
/// from them.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenPair {}

impl HiddenPair {
    /// Creates a new `HiddenPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for HiddenPair {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for unit in Unit::ALL {
            let cells_by_digit = unsolved_digit_cells(grid, unit);
            let interesting: Vec<Digit> = Digit::ALL
                .into_iter()
                .filter(|digit| {
                    cells_by_digit[usize::from(digit.value() - 1)]
                        .is_some_and(|cells| cells.len() == 2)
                })
                .collect();

            for (i, &a) in interesting.iter().enumerate() {
                for &b in &interesting[i + 1..] {
                    let cells_a = cells_by_digit[usize::from(a.value() - 1)];
                    let cells_b = cells_by_digit[usize::from(b.value() - 1)];
                    if cells_a != cells_b {
                        continue;
                    }
                    let pair = DigitSet::from_elem(a) | DigitSet::from_elem(b);
                    let mut changed = false;
                    for pos in cells_a.unwrap_or(CellSet::EMPTY) {
                        changed |= grid.restrict(pos, pair);
                    }
                    if changed {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}

/// For each digit, the unsolved cells of the unit holding it; `None`
/// when the digit is already solved in the unit.
fn unsolved_digit_cells(grid: &Grid, unit: Unit) -> [Option<CellSet>; 9] {
    let mut cells_by_digit = [Some(CellSet::EMPTY); 9];
    for pos in unit.positions() {
        let cell = grid.cell_at(pos);
        if let Some(value) = cell.value() {
            cells_by_digit[usize::from(value.value() - 1)] = None;
        } else {
            for digit in cell.candidates() {
                if let Some(cells) = &mut cells_by_digit[usize::from(digit.value() - 1)] {
                    cells.insert(pos);
                }
            }
        }
    }
    cells_by_digit
}
