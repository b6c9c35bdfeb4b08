//! Combinatorial enumeration helpers for the cycle searches.

/// Returns every flattening of `groups` obtained by permuting each group
/// internally and permuting the order of the groups.
///
/// For input groups `(g₁, g₂, …, gₙ)` the result holds `n! · ∏ |gᵢ|!`
/// sequences. Equal elements are not deduplicated, matching the plain
/// permutation count.
///
/// # Examples
///
/// ```
/// use inferoku_solver::orderings::alternating_orderings;
///
/// let groups = [vec!["a", "A"], vec!["b", "B"]];
/// let all = alternating_orderings(&groups);
/// assert_eq!(all.len(), 8);
/// assert!(all.contains(&vec!["B", "b", "a", "A"]));
/// ```
#[must_use]
pub fn alternating_orderings<T: Clone>(groups: &[Vec<T>]) -> Vec<Vec<T>> {
    let internal: Vec<Vec<Vec<T>>> = groups.iter().map(|g| permutations(g)).collect();
    let flat_len: usize = groups.iter().map(Vec::len).sum();

    let mut result = Vec::new();
    for group_order in permutations(&(0..groups.len()).collect::<Vec<_>>()) {
        let mut flattened = Vec::with_capacity(flat_len);
        fill(&internal, &group_order, &mut flattened, &mut result);
    }
    result
}

fn fill<T: Clone>(
    internal: &[Vec<Vec<T>>],
    group_order: &[usize],
    flattened: &mut Vec<T>,
    result: &mut Vec<Vec<T>>,
) {
    let Some((&group, rest)) = group_order.split_first() else {
        result.push(flattened.clone());
        return;
    };
    for ordering in &internal[group] {
        let len = flattened.len();
        flattened.extend(ordering.iter().cloned());
        fill(internal, rest, flattened, result);
        flattened.truncate(len);
    }
}

/// Returns all permutations of `items`, in no particular order.
#[must_use]
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let item = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, item.clone());
            result.push(tail);
        }
    }
    result
}

/// Returns every `k`-element index combination of `0..n`, ascending
/// within each combination.
#[must_use]
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    extend_combination(0, n, k, &mut current, &mut result);
    result
}

fn extend_combination(
    start: usize,
    n: usize,
    k: usize,
    current: &mut Vec<usize>,
    result: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    let needed = k - current.len();
    for i in start..=(n - needed) {
        current.push(i);
        extend_combination(i + 1, n, k, current, result);
        current.pop();
    }
}
