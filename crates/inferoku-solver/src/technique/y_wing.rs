use inferoku_core::{DigitSet, Grid};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Y-Wing";

/// A technique that removes candidates using a Y-Wing pattern.
///
/// A "Y-Wing" is three bi-value cells: a hinge `{X, Y}` that sees two
/// wings `{X, Z}` and `{Y, Z}`. Whichever way the hinge resolves, one of
/// the wings becomes `Z`, so `Z` can be removed from every cell that
/// sees both wings.
#[derive(Debug, Default, Clone, Copy)]
pub struct YWing {}

impl YWing {
    /// Creates a new `YWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for YWing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let bi_value = grid.bi_value_cells();
        for hinge in bi_value {
            let Some((x, y)) = grid.candidates_at(hinge).as_double() else {
                continue;
            };
            let hinge_digits = grid.candidates_at(hinge);
            let hinge_peers = hinge.peers() & bi_value;

            for wing1 in hinge_peers {
                let wing1_digits = grid.candidates_at(wing1);
                if !wing1_digits.contains(x) {
                    continue;
                }
                let Some(z) = wing1_digits.difference(hinge_digits).as_single() else {
                    continue;
                };
                let wing2_digits = DigitSet::from_elem(y) | DigitSet::from_elem(z);
                for wing2 in hinge_peers {
                    if wing2 == wing1 || grid.candidates_at(wing2) != wing2_digits {
                        continue;
                    }
                    let mut changed = false;
                    for pos in wing1.peers() & wing2.peers() {
                        if !grid.cell_at(pos).is_solved() {
                            changed |= grid.eliminate(pos, z);
                        }
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

#[cfg(test)]
mod tests {
    use inferoku_core::{Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    fn restrict_to(grid: &mut Grid, pos: Position, digits: &[Digit]) {
        grid.restrict(pos, digits.iter().copied().collect::<DigitSet>());
    }

    #[test]
    fn test_eliminates_shared_wing_candidate() {
        let mut grid = Grid::new();
        let hinge = Position::new(1, 1);
        let wing1 = Position::new(5, 1);
        let wing2 = Position::new(1, 5);
        restrict_to(&mut grid, hinge, &[Digit::D1, Digit::D2]);
        restrict_to(&mut grid, wing1, &[Digit::D1, Digit::D3]);
        restrict_to(&mut grid, wing2, &[Digit::D2, Digit::D3]);

        TechniqueTester::new(grid)
            .apply_once(&YWing::new())
            .assert_removed_includes(Position::new(5, 5), [Digit::D3])
            .assert_no_change(Position::new(1, 7));
    }

    #[test]
    fn test_no_change_without_y_wing() {
        TechniqueTester::new(Grid::new())
            .assert_applies(&YWing::new(), false)
            .assert_no_change(Position::new(0, 0));
    }

    #[test]
    fn test_wing_pair_without_shared_extra_does_not_fire() {
        let mut grid = Grid::new();
        restrict_to(&mut grid, Position::new(1, 1), &[Digit::D1, Digit::D2]);
        restrict_to(&mut grid, Position::new(5, 1), &[Digit::D1, Digit::D3]);
        restrict_to(&mut grid, Position::new(1, 5), &[Digit::D2, Digit::D4]);

        TechniqueTester::new(grid).assert_applies(&YWing::new(), false);
    }
}
