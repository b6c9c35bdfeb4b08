use inferoku_core::{CellSet, Digit, Grid, Position};
use tinyvec::ArrayVec;

use crate::{
    SolverError,
    orderings::combinations,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Swordfish";

/// A technique that removes candidates using a swordfish pattern.
///
/// The three-line generalization of the X-Wing: a digit is confined to
/// two or three cells in each of three rows (or columns), and those
/// cells fall into exactly three columns (or rows) altogether. The
/// digit's placements in the three base lines exhaust the three cover
/// lines, so it can be eliminated from the cover lines' other cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct Swordfish {}

impl Swordfish {
    /// Creates a new `Swordfish` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// Base lines holding the digit in two or three unsolved cells: the
/// candidate cells plus a bitmask of their cross-line indices.
type FishLines = ArrayVec<[(CellSet, u16); 9]>;

fn fish_lines(grid: &Grid, lines: &[CellSet; 9], cross: fn(Position) -> u8, digit: Digit) -> FishLines {
    let mut result = FishLines::new();
    for line in lines {
        let mut cells = CellSet::EMPTY;
        let mut cross_mask = 0u16;
        let mut solved = false;
        for cell in grid.cells_in(*line) {
            if !cell.contains(digit) {
                continue;
            }
            if cell.is_solved() {
                solved = true;
                break;
            }
            cells.insert(cell.position());
            cross_mask |= 1 << cross(cell.position());
        }
        if !solved && (2..=3).contains(&cells.len()) {
            result.push((cells, cross_mask));
        }
    }
    result
}

impl Technique for Swordfish {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for digit in Digit::ALL {
            for (base, cover, cross) in [
                (
                    &CellSet::ROWS,
                    &CellSet::COLUMNS,
                    Position::column as fn(Position) -> u8,
                ),
                (&CellSet::COLUMNS, &CellSet::ROWS, Position::row),
            ] {
                let lines = fish_lines(grid, base, cross, digit);
                if lines.len() < 3 {
                    continue;
                }
                for combo in combinations(lines.len(), 3) {
                    let mut sword_cells = CellSet::EMPTY;
                    let mut cross_mask = 0u16;
                    for &i in &combo {
                        sword_cells |= lines[i].0;
                        cross_mask |= lines[i].1;
                    }
                    if cross_mask.count_ones() != 3 {
                        continue;
                    }
                    let mut eliminate = CellSet::EMPTY;
                    for index in 0..9 {
                        if cross_mask & (1 << index) != 0 {
                            eliminate |= cover[index];
                        }
                    }
                    eliminate = eliminate.difference(sword_cells);
                    for &i in &combo {
                        // A base-line cell outside the sword never holds
                        // the digit, so excluding whole base lines is
                        // equivalent and cheaper than tracking cells.
                        eliminate = eliminate.difference(base_line_of(base, lines[i].0));
                    }
                    if grid.eliminate_in(eliminate, digit) {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}

fn base_line_of(base: &[CellSet; 9], cells: CellSet) -> CellSet {
    let Some(first) = cells.first() else {
        return CellSet::EMPTY;
    };
    *base
        .iter()
        .find(|line| line.contains(first))
        .unwrap_or(&CellSet::EMPTY)
}
