use inferoku_core::{Cell, CellSet, Digit, DigitSet, Grid, Position};
use tinyvec::ArrayVec;

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "XY-Chain";

/// The default cap on chain length, in cells.
const DEFAULT_MAX_CHAIN: usize = 8;

/// The hard ceiling on chain length the search buffers support.
const MAX_CHAIN_CEILING: usize = 16;

/// A technique that removes candidates using chains of bi-value cells.
///
/// An XY-chain walks bi-value cells that see each other and share a
/// candidate, alternating "off X, on Y" along the way. When a valid
/// chain connects two cells sharing a candidate `z`, one endpoint must
/// be `z`, so `z` can be removed from every cell seeing both endpoints.
///
/// Two sub-cases, in the order they are tried:
///
/// - **closed** (the endpoints see each other): besides the endpoint
///   elimination, every strong link the chain crosses justifies removing
///   its digit from the cells that see both of the link's cells;
/// - **open** (the endpoints do not see each other): only the endpoint
///   elimination applies.
///
/// The chain length is bounded by the number of bi-value cells and by a
/// configurable cap (8 cells by default).
#[derive(Debug, Clone, Copy)]
pub struct XyChain {
    max_chain: usize,
}

impl Default for XyChain {
    fn default() -> Self {
        Self::new()
    }
}

impl XyChain {
    /// Creates a new `XyChain` technique with the default length cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_chain: DEFAULT_MAX_CHAIN,
        }
    }

    /// Creates a new `XyChain` with a custom chain-length cap (in cells).
    #[must_use]
    pub const fn with_max_chain(max_chain: usize) -> Self {
        let max_chain = if max_chain > MAX_CHAIN_CEILING {
            MAX_CHAIN_CEILING
        } else {
            max_chain
        };
        Self { max_chain }
    }
}

/// Endpoints with at least one shared candidate and at least one cell
/// that would be affected by an endpoint elimination.
struct Bookend {
    first: Position,
    last: Position,
    shared: DigitSet,
}

type Chain = ArrayVec<[u8; MAX_CHAIN_CEILING]>;

impl Technique for XyChain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let bi_value = grid.bi_value_cells();
        if bi_value.len() < 3 {
            return Ok(false);
        }
        let max_chain = self.max_chain.min(bi_value.len());

        let mut seen_bookends = Vec::new();
        let mut open_bookends = Vec::new();
        for (first, following) in bi_value.pivots_with_following() {
            for last in following {
                let shared = grid.candidates_at(first) & grid.candidates_at(last);
                if shared.is_empty() {
                    continue;
                }
                let has_eligible = (first.peers() & last.peers())
                    .iter()
                    .any(|pos| {
                        let cell = grid.cell_at(pos);
                        !cell.is_solved() && !(cell.candidates() & shared).is_empty()
                    });
                if !has_eligible {
                    continue;
                }
                let bookend = Bookend {
                    first,
                    last,
                    shared,
                };
                if first.inclusive_sees(last) {
                    seen_bookends.push(bookend);
                } else {
                    open_bookends.push(bookend);
                }
            }
        }

        for bookend in &seen_bookends {
            if search_chains(grid, bookend, bi_value, max_chain, &mut |grid, chain| {
                try_closed_chain(grid, bookend, chain)
            }) {
                return Ok(true);
            }
        }
        for bookend in &open_bookends {
            if search_chains(grid, bookend, bi_value, max_chain, &mut |grid, chain| {
                try_open_chain(grid, bookend, chain)
            }) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Depth-first enumeration of simple chains from `bookend.first` to
/// `bookend.last` over bi-value cells, where consecutive cells see each
/// other and share a candidate. Invokes `visit` on every complete chain
/// and stops as soon as a visit reports success.
fn search_chains(
    grid: &mut Grid,
    bookend: &Bookend,
    bi_value: CellSet,
    max_chain: usize,
    visit: &mut impl FnMut(&mut Grid, &[u8]) -> bool,
) -> bool {
    let mut chain = Chain::new();
    chain.push(bookend.first.index());
    let mut available: Vec<Position> = bi_value
        .iter()
        .filter(|&pos| pos != bookend.first)
        .collect();
    extend_chain(grid, bookend, &mut chain, &mut available, max_chain, visit)
}

fn extend_chain(
    grid: &mut Grid,
    bookend: &Bookend,
    chain: &mut Chain,
    available: &mut Vec<Position>,
    max_chain: usize,
    visit: &mut impl FnMut(&mut Grid, &[u8]) -> bool,
) -> bool {
    let Some(&last_index) = chain.last() else {
        return false;
    };
    let last = Position::from_index(last_index);
    if last == bookend.last {
        return chain.len() >= 3 && visit(grid, chain);
    }
    if chain.len() >= max_chain {
        return false;
    }
    for i in 0..available.len() {
        let next = available[i];
        if !next.inclusive_sees(last)
            || (grid.candidates_at(next) & grid.candidates_at(last)).is_empty()
        {
            continue;
        }
        available.swap_remove(i);
        chain.push(next.index());
        let found = extend_chain(grid, bookend, chain, available, max_chain, visit);
        chain.pop();
        let end = available.len();
        available.push(next);
        available.swap(i, end);
        if found {
            return true;
        }
    }
    false
}

/// Walks the alternation along a chain assuming the first cell is *not*
/// `candidate`. Returns the digit forced into the final cell, or `None`
/// when the alternation breaks.
///
/// `on_strong_link` is invoked for every strong link the chain crosses
/// with the link's digit and its two cells. A strong link places its
/// digit in one of the two cells no matter how the endpoints resolve,
/// which is what makes its eliminations safe to harvest.
fn walk_alternation(
    grid: &Grid,
    chain: &[u8],
    candidate: Digit,
    mut on_strong_link: impl FnMut(Digit, Position, Position),
) -> Option<Digit> {
    let first = Position::from_index(chain[0]);
    let mut on_value = other_candidate(grid, first, candidate)?;
    let mut off_value = candidate;

    let mut prev = first;
    for &index in &chain[1..] {
        let pos = Position::from_index(index);
        let candidates = grid.candidates_at(pos);
        if candidates.contains(on_value) {
            off_value = on_value;
            on_value = other_candidate(grid, pos, off_value)?;
        } else if candidates.contains(off_value)
            && grid.are_strongly_linked(prev, pos, off_value)
        {
            on_strong_link(off_value, prev, pos);
            on_value = off_value;
            off_value = other_candidate(grid, pos, on_value)?;
        } else {
            return None;
        }
        prev = pos;
    }
    Some(on_value)
}

/// The other candidate of a bi-value cell.
fn other_candidate(grid: &Grid, pos: Position, digit: Digit) -> Option<Digit> {
    grid.candidates_at(pos)
        .difference(DigitSet::from_elem(digit))
        .as_single()
}

fn endpoint_eliminations(
    grid: &Grid,
    bookend: &Bookend,
    chain: &[u8],
    candidate: Digit,
) -> Vec<Position> {
    (bookend.first.peers() & bookend.last.peers())
        .iter()
        .filter(|&pos| {
            let cell = grid.cell_at(pos);
            !cell.is_solved()
                && cell.contains(candidate)
                && !chain.contains(&pos.index())
        })
        .collect()
}

fn try_open_chain(grid: &mut Grid, bookend: &Bookend, chain: &[u8]) -> bool {
    for candidate in bookend.shared {
        let eligible = endpoint_eliminations(grid, bookend, chain, candidate);
        if eligible.is_empty() {
            continue;
        }
        let end = walk_alternation(grid, chain, candidate, |_, _, _| {});
        if end != Some(candidate) {
            continue;
        }
        for pos in eligible {
            grid.eliminate(pos, candidate);
        }
        return true;
    }
    false
}

fn try_closed_chain(grid: &mut Grid, bookend: &Bookend, chain: &[u8]) -> bool {
    for candidate in bookend.shared {
        let eligible = endpoint_eliminations(grid, bookend, chain, candidate);
        if eligible.is_empty() {
            continue;
        }
        // Unsolved cells outside the chain, for harvesting strong-link
        // eliminations.
        let outside: Vec<Position> = grid
            .cells(false)
            .map(Cell::position)
            .filter(|pos| !chain.contains(&pos.index()))
            .collect();
        let mut removals: Vec<(Digit, Vec<Position>)> = vec![(candidate, eligible)];
        let end = walk_alternation(grid, chain, candidate, |digit, a, b| {
            let cells: Vec<Position> = outside
                .iter()
                .copied()
                .filter(|&pos| {
                    grid.cell_at(pos).contains(digit)
                        && pos.inclusive_sees(a)
                        && pos.inclusive_sees(b)
                })
                .collect();
            if !cells.is_empty() {
                removals.push((digit, cells));
            }
        });
        if end != Some(candidate) {
            continue;
        }
        let mut changed = false;
        for (digit, cells) in removals {
            for pos in cells {
                changed |= grid.eliminate(pos, digit);
            }
        }
        if changed {
            return true;
        }
    }
    false
}
