use inferoku_core::{CellSet, DigitSet, Division, Grid, Position};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Chute Remote Pair";

/// A technique built on two identical bi-value cells in a band or stack.
///
/// Take two cells with the same candidate pair inside one chute that do
/// not see each other. Exactly three chute cells are seen by neither of
/// them; counting which pair digits still appear in those three decides
/// the elimination:
///
/// - neither digit appears there: every cell seen by both pair cells —
///   including the in-box cells aligned with a pair cell along the
///   chute's cross lines — loses both digits;
/// - exactly one digit appears there: the cells seen by both pair cells
///   lose that digit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChuteRemotePair {}

impl ChuteRemotePair {
    /// Creates a new `ChuteRemotePair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn try_pair(
        grid: &mut Grid,
        chute: CellSet,
        cross: Division,
        a: Position,
        b: Position,
    ) -> bool {
        let pair = grid.candidates_at(a);
        let mut unseen = CellSet::EMPTY;
        let mut double_seen = CellSet::EMPTY;
        let mut double_elimination = CellSet::EMPTY;
        for pos in chute {
            if pos == a || pos == b {
                continue;
            }
            if !a.sees(pos) && !b.sees(pos) {
                unseen.insert(pos);
                continue;
            }
            if (pos.box_index() == a.box_index() && pos.aligned(a, cross))
                || (pos.box_index() == b.box_index() && pos.aligned(b, cross))
            {
                double_elimination.insert(pos);
            } else if a.sees(pos) && b.sees(pos) {
                double_seen.insert(pos);
                double_elimination.insert(pos);
            }
        }
        assert_eq!(unseen.len(), 3, "a chute pair leaves exactly three unseen cells");

        let mut witnessed = DigitSet::EMPTY;
        for pos in unseen {
            witnessed |= grid.candidates_at(pos) & pair;
        }
        if witnessed.len() == 2 {
            return false;
        }
        match witnessed.as_single() {
            Some(digit) => {
                let eligible: Vec<Position> = double_seen
                    .iter()
                    .filter(|&pos| {
                        let cell = grid.cell_at(pos);
                        !cell.is_solved() && cell.contains(digit)
                    })
                    .collect();
                if eligible.is_empty() {
                    return false;
                }
                for pos in eligible {
                    grid.eliminate(pos, digit);
                }
                true
            }
            None => {
                let eligible: Vec<Position> = double_elimination
                    .iter()
                    .filter(|&pos| {
                        let cell = grid.cell_at(pos);
                        !cell.is_solved() && !(cell.candidates() & pair).is_empty()
                    })
                    .collect();
                if eligible.is_empty() {
                    return false;
                }
                for pos in eligible {
                    grid.eliminate_set(pos, pair);
                }
                true
            }
        }
    }
}

impl Technique for ChuteRemotePair {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for i in 0..3 {
            for (chute, cross) in [
                (CellSet::BANDS[i], Division::Row),
                (CellSet::STACKS[i], Division::Column),
            ] {
                let bi_value = grid.bi_value_cells() & chute;
                for (a, following) in bi_value.pivots_with_following() {
                    let pair = grid.candidates_at(a);
                    if pair.len() != 2 {
                        continue;
                    }
                    for b in following {
                        if grid.candidates_at(b) != pair || a.sees(b) {
                            continue;
                        }
                        if Self::try_pair(grid, chute, cross, a, b) {
                            return Ok(true);
                        }
                    }
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use inferoku_core::Digit;

    use super::*;
    use crate::testing::TechniqueTester;

    fn restrict_to(grid: &mut Grid, pos: Position, digits: &[Digit]) {
        grid.restrict(pos, digits.iter().copied().collect::<DigitSet>());
    }

    /// Band 0 pair at (0,0) and (1,4); the unseen cells are the box-2
    /// cells of row 2.
    fn band_pair_grid() -> Grid {
        let mut grid = Grid::new();
        restrict_to(&mut grid, Position::new(0, 0), &[Digit::D1, Digit::D2]);
        restrict_to(&mut grid, Position::new(1, 4), &[Digit::D1, Digit::D2]);
        grid
    }

    #[test]
    fn test_both_digits_removed_when_unseen_cells_are_clean() {
        let mut grid = band_pair_grid();
        for pos in [Position::new(2, 6), Position::new(2, 7), Position::new(2, 8)] {
            grid.eliminate_set(pos, [Digit::D1, Digit::D2].into_iter().collect());
        }

        TechniqueTester::new(grid)
            .apply_once(&ChuteRemotePair::new())
            // Seen by both pair cells: row 0 in b's box, row 1 in a's box.
            .assert_removed_includes(Position::new(0, 4), [Digit::D1, Digit::D2])
            .assert_removed_includes(Position::new(1, 0), [Digit::D1, Digit::D2]);
    }

    #[test]
    fn test_single_witnessed_digit_is_removed_from_double_seen() {
        let mut grid = band_pair_grid();
        // Unseen cells keep D1 but lose D2.
        for pos in [Position::new(2, 6), Position::new(2, 7), Position::new(2, 8)] {
            grid.eliminate(pos, Digit::D2);
        }

        TechniqueTester::new(grid)
            .apply_once(&ChuteRemotePair::new())
            .assert_removed_includes(Position::new(0, 4), [Digit::D1])
            .assert_removed_includes(Position::new(1, 0), [Digit::D1]);
    }

    #[test]
    fn test_both_digits_witnessed_blocks_elimination() {
        let grid = band_pair_grid();
        TechniqueTester::new(grid)
            .assert_applies(&ChuteRemotePair::new(), false)
            .assert_no_change(Position::new(0, 4));
    }

    #[test]
    fn test_no_change_without_chute_pairs() {
        TechniqueTester::new(Grid::new())
            .assert_applies(&ChuteRemotePair::new(), false)
            .assert_no_change(Position::new(4, 4));
    }
}
