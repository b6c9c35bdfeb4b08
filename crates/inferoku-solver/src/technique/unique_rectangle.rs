use inferoku_core::{CellSet, Digit, DigitSet, Division, Grid, Position};

use crate::{
    SolverError,
    orderings::combinations,
    technique::{BoxedTechnique, Technique},
};

const NAME_UNIQUE: &str = "Unique Rectangle";
const NAME_HIDDEN: &str = "Hidden Unique Rectangle";

/// The type-1 unique-rectangle rule.
///
/// Four cells on two rows, two columns, and two boxes all holding the
/// same bi-value pair could swap the pair freely, giving the puzzle two
/// solutions. In a proper puzzle that deadly pattern is avoidable: when
/// three corners are bare bi-value cells, the fourth corner must escape
/// through one of its extra candidates, so both pair digits can be
/// removed from it.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueRectangle {}

impl UniqueRectangle {
    /// Creates a new `UniqueRectangle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for UniqueRectangle {
    fn name(&self) -> &'static str {
        NAME_UNIQUE
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let bi_value = grid.bi_value_cells();
        for (a, b) in digit_pairs() {
            let pair = DigitSet::from_elem(a) | DigitSet::from_elem(b);
            let corners: Vec<Position> = bi_value
                .iter()
                .filter(|&pos| grid.candidates_at(pos) == pair)
                .collect();
            if corners.len() < 3 {
                continue;
            }
            for combo in combinations(corners.len(), 3) {
                let triple: Vec<Position> = combo.iter().map(|&i| corners[i]).collect();
                let Some(extra) = fourth_corner(&triple) else {
                    continue;
                };
                if !grid.candidates_at(extra).is_superset(pair) {
                    continue;
                }
                grid.eliminate_set(extra, pair);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Returns the missing corner when the three cells span exactly two
/// rows, two columns, and two boxes.
fn fourth_corner(triple: &[Position]) -> Option<Position> {
    let rows = distinct(triple, Division::Row)?;
    let cols = distinct(triple, Division::Column)?;
    distinct(triple, Division::Box)?;

    let mut missing = None;
    for &row in &rows {
        for &col in &cols {
            let corner = Position::new(row, col);
            if triple.contains(&corner) {
                continue;
            }
            assert!(
                missing.is_none(),
                "three rectangle corners cannot miss two cells"
            );
            missing = Some(corner);
        }
    }
    missing
}

/// The two distinct indices of the cells along a division, or `None` if
/// there are not exactly two.
fn distinct(triple: &[Position], division: Division) -> Option<[u8; 2]> {
    let mut values: Vec<u8> = triple
        .iter()
        .map(|pos| pos.division_index(division))
        .collect();
    values.sort_unstable();
    values.dedup();
    match values[..] {
        [first, second] => Some([first, second]),
        _ => None,
    }
}

/// The type-1 hidden unique-rectangle rule.
///
/// One corner is a bare bi-value pair; the other three corners contain
/// the pair among other candidates. When the corner diagonal to the
/// bi-value cell is strongly linked on one pair digit to both of its
/// rectangle neighbors, that digit cannot leave the diagonal corner
/// without recreating the deadly pattern, so the *other* pair digit is
/// removed from it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenUniqueRectangle {}

impl HiddenUniqueRectangle {
    /// Creates a new `HiddenUniqueRectangle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for HiddenUniqueRectangle {
    fn name(&self) -> &'static str {
        NAME_HIDDEN
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for pair_pos in grid.bi_value_cells() {
            let pair = grid.candidates_at(pair_pos);
            let box_mates = CellSet::BOXES[usize::from(pair_pos.box_index())];
            for ceiling in box_mates {
                if ceiling == pair_pos || !grid.candidates_at(ceiling).is_superset(pair) {
                    continue;
                }
                // The ceiling neighbor must share a line with the pair
                // cell; the rectangle extends along the other axis.
                let (ceiling_div, wall_div) = if ceiling.row() == pair_pos.row() {
                    (Division::Row, Division::Column)
                } else if ceiling.column() == pair_pos.column() {
                    (Division::Column, Division::Row)
                } else {
                    continue;
                };
                let wall = wall_div.positions(pair_pos.division_index(wall_div));
                for floor1 in wall {
                    if floor1 == pair_pos
                        || floor1.box_index() == pair_pos.box_index()
                        || !grid.candidates_at(floor1).is_superset(pair)
                    {
                        continue;
                    }
                    let floor2 = match ceiling_div {
                        Division::Row => Position::new(floor1.row(), ceiling.column()),
                        _ => Position::new(ceiling.row(), floor1.column()),
                    };
                    assert_eq!(
                        floor2.box_index(),
                        floor1.box_index(),
                        "rectangle floor must stay in one box"
                    );
                    if !grid.candidates_at(floor2).is_superset(pair) {
                        continue;
                    }
                    for digit in pair {
                        if !grid.are_strongly_linked(floor2, floor1, digit)
                            || !grid.are_strongly_linked(floor2, ceiling, digit)
                        {
                            continue;
                        }
                        let other = pair.difference(DigitSet::from_elem(digit));
                        if grid.eliminate_set(floor2, other) {
                            return Ok(true);
                        }
                    }
                }
            }
        }
        Ok(false)
    }
}

fn digit_pairs() -> impl Iterator<Item = (Digit, Digit)> {
    (0..9).flat_map(|i| ((i + 1)..9).map(move |j| (Digit::ALL[i], Digit::ALL[j])))
}
