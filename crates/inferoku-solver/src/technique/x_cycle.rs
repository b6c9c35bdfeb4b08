use inferoku_core::{Cell, CellSet, Digit, Grid, Position};

use crate::{
    SolverError,
    orderings::{alternating_orderings, combinations},
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "X-Cycle";

/// The default cycle-length bounds, in cells.
const DEFAULT_MIN_LENGTH: usize = 5;
const DEFAULT_MAX_LENGTH: usize = 10;

/// A technique that removes or places a single digit using alternating
/// cycles over its strong links.
///
/// Cells along the cycle alternate ON and OFF for the digit; every
/// consecutive pair is either one of the chosen strong links or a weak
/// link (the cells see each other). Three cases apply, in order:
///
/// - **continuous loop** (even length): in any solution one alternation
///   class holds the digit, so cells outside the loop seeing both
///   classes lose it;
/// - **ON-ON discontinuity** (odd length, one cell shared by the first
///   and last strong link): turning the shared cell off forces it back
///   on around the cycle, so it is placed;
/// - **OFF-OFF discontinuity** (odd length, the discontinuity sits on a
///   cell outside the links): any external cell seeing both ends of the
///   link chain would force the chain into contradiction and loses the
///   digit.
///
/// Cycle lengths are bounded by the available strong-link cells and a
/// configurable window (5 to 10 cells by default).
#[derive(Debug, Clone, Copy)]
pub struct XCycle {
    min_length: usize,
    max_length: usize,
}

impl Default for XCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl XCycle {
    /// Creates a new `XCycle` technique with the default length bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Creates a new `XCycle` with custom cycle-length bounds.
    #[must_use]
    pub const fn with_length_bounds(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }
}

impl Technique for XCycle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for digit in Digit::ALL {
            let cells: CellSet = grid
                .cells(false)
                .filter(|cell| cell.contains(digit))
                .map(Cell::position)
                .collect();
            if cells.is_empty() {
                continue;
            }
            let links = grid.strong_links(digit);
            if links.is_empty() {
                continue;
            }
            let mut linked_cells = CellSet::EMPTY;
            for &(a, b) in &links {
                linked_cells.insert(a);
                linked_cells.insert(b);
            }
            let max_length = self
                .max_length
                .min(cells.len())
                .min(linked_cells.len() + 1);
            if max_length < self.min_length {
                continue;
            }

            if continuous_loops(grid, digit, cells, &links, self.min_length, max_length)
                || on_on_discontinuities(grid, digit, &links, self.min_length, max_length)
                || off_off_discontinuities(grid, digit, cells, &links, self.min_length, max_length)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Continuous nice loops: even length, all cells distinct, every group
/// boundary closed by a weak link.
fn continuous_loops(
    grid: &mut Grid,
    digit: Digit,
    cells: CellSet,
    links: &[(Position, Position)],
    min_length: usize,
    max_length: usize,
) -> bool {
    for cycle_length in (min_length..=max_length).filter(|len| len % 2 == 0) {
        for combo in combinations(links.len(), cycle_length / 2) {
            let groups = link_groups(links, &combo);
            let cycle_set = cell_union(&groups);
            if cycle_set.len() != cycle_length || !cross_connected(&groups) {
                continue;
            }
            for cycle in alternating_orderings(&groups) {
                let closed = (0..cycle_length).step_by(2).all(|i| {
                    let prev = if i == 0 { cycle[cycle_length - 1] } else { cycle[i - 1] };
                    cycle[i].inclusive_sees(prev)
                });
                if !closed {
                    continue;
                }
                let mut evens = Vec::new();
                let mut odds = Vec::new();
                for (i, &pos) in cycle.iter().enumerate() {
                    if i % 2 == 0 {
                        evens.push(pos);
                    } else {
                        odds.push(pos);
                    }
                }
                let eligible: Vec<Position> = cells
                    .difference(cycle_set)
                    .iter()
                    .filter(|&pos| sees_any(pos, &evens) && sees_any(pos, &odds))
                    .collect();
                if eligible.is_empty() {
                    continue;
                }
                for pos in eligible {
                    grid.eliminate(pos, digit);
                }
                return true;
            }
        }
    }
    false
}

/// ON-ON discontinuities: odd length, one cell shared between the first
/// and last strong link of the flattened cycle; that cell takes the digit.
fn on_on_discontinuities(
    grid: &mut Grid,
    digit: Digit,
    links: &[(Position, Position)],
    min_length: usize,
    max_length: usize,
) -> bool {
    for cycle_length in (min_length..=max_length).filter(|len| len % 2 == 1) {
        for combo in combinations(links.len(), cycle_length.div_ceil(2)) {
            let groups = link_groups(links, &combo);
            if cell_union(&groups).len() != cycle_length || !cross_connected(&groups) {
                continue;
            }
            for cycle in alternating_orderings(&groups) {
                if cycle[0] != cycle[cycle.len() - 1] {
                    continue;
                }
                let closed = (2..cycle_length)
                    .step_by(2)
                    .all(|i| cycle[i].inclusive_sees(cycle[i - 1]));
                if !closed {
                    continue;
                }
                grid.place(cycle[0], digit);
                return true;
            }
        }
    }
    false
}

/// OFF-OFF discontinuities: odd length with the discontinuity on a cell
/// outside the links; external cells seeing both chain ends lose the digit.
fn off_off_discontinuities(
    grid: &mut Grid,
    digit: Digit,
    cells: CellSet,
    links: &[(Position, Position)],
    min_length: usize,
    max_length: usize,
) -> bool {
    for cycle_length in (min_length..=max_length).filter(|len| len % 2 == 1) {
        for combo in combinations(links.len(), cycle_length / 2) {
            let groups = link_groups(links, &combo);
            let cycle_set = cell_union(&groups);
            if cycle_set.len() != cycle_length - 1 {
                continue;
            }
            for cycle in alternating_orderings(&groups) {
                let closed = (2..cycle.len())
                    .step_by(2)
                    .all(|i| cycle[i].inclusive_sees(cycle[i - 1]));
                if !closed {
                    continue;
                }
                let first = cycle[0];
                let last = cycle[cycle.len() - 1];
                let eligible: Vec<Position> = cells
                    .difference(cycle_set)
                    .iter()
                    .filter(|&pos| pos.sees(first) && pos.sees(last))
                    .collect();
                if eligible.is_empty() {
                    continue;
                }
                for pos in eligible {
                    grid.eliminate(pos, digit);
                }
                return true;
            }
        }
    }
    false
}

fn link_groups(links: &[(Position, Position)], combo: &[usize]) -> Vec<Vec<Position>> {
    combo
        .iter()
        .map(|&i| vec![links[i].0, links[i].1])
        .collect()
}

fn cell_union(groups: &[Vec<Position>]) -> CellSet {
    groups
        .iter()
        .flat_map(|group| group.iter().copied())
        .collect()
}

/// Every link endpoint must see an endpoint of some other chosen link,
/// or no ordering can close the cycle. This prunes most combinations
/// before the ordering enumeration.
fn cross_connected(groups: &[Vec<Position>]) -> bool {
    groups.iter().enumerate().all(|(i, group)| {
        group.iter().all(|&pos| {
            groups.iter().enumerate().any(|(j, other)| {
                j != i && other.iter().any(|&q| pos.inclusive_sees(q))
            })
        })
    })
}

fn sees_any(pos: Position, group: &[Position]) -> bool {
    group.iter().any(|&member| pos.inclusive_sees(member))
}
