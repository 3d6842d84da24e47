//! A* search over 8-puzzle grids.
//!
//! Key choices:
//! - Binary heap frontier with lazy duplicate elimination (no decrease-key)
//! - FxHashSet of packed `u32` grid keys for the visited set
//! - Fixed-size successor arrays to avoid heap allocations in the hot loop
//! - Deterministic tie-breaking so expansion counts are reproducible

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use crate::error::SearchError;
use crate::grid::{Grid, GridKey};

/// Optional bounds on a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after this many frontier pops.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub const UNBOUNDED: SearchLimits = SearchLimits {
        max_expansions: None,
    };

    pub const fn with_max_expansions(limit: usize) -> Self {
        Self {
            max_expansions: Some(limit),
        }
    }
}

/// Result of a successful search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Number of moves on the optimal path.
    pub cost: u32,
    /// Frontier pops, including discarded duplicates and the goal pop.
    pub expanded: usize,
    /// Nodes pushed onto the frontier, including the start node.
    pub generated: usize,
}

/// A grid on the frontier together with its cost bookkeeping.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    grid: Grid,
    /// Moves taken from the start.
    g: u32,
    /// Heuristic estimate of moves remaining.
    h: u32,
    /// Insertion order, used only to break ties.
    sequence: usize,
}

impl SearchNode {
    #[inline]
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

impl Ord for SearchNode {
    /// Orders so that `BinaryHeap` (a max-heap) pops the smallest `f` first.
    ///
    /// Ties prefer the smaller `h`, then the earlier insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Finds the optimal move count from `start` to `goal`.
///
/// `heuristic` must be admissible for the cost to be optimal and consistent
/// for the visited-set short-circuit to be sound.
pub fn search<H>(start: &Grid, goal: &Grid, heuristic: H) -> Result<SearchOutcome, SearchError>
where
    H: Fn(&Grid, &Grid) -> u32,
{
    search_with_limits(start, goal, heuristic, SearchLimits::UNBOUNDED)
}

/// Like [`search`], but gives up once `limits` are exceeded.
pub fn search_with_limits<H>(
    start: &Grid,
    goal: &Grid,
    heuristic: H,
    limits: SearchLimits,
) -> Result<SearchOutcome, SearchError>
where
    H: Fn(&Grid, &Grid) -> u32,
{
    let mut frontier = BinaryHeap::new();
    let mut visited: FxHashSet<GridKey> = FxHashSet::default();
    let mut expanded = 0usize;
    let mut generated = 1usize;

    frontier.push(SearchNode {
        grid: *start,
        g: 0,
        h: heuristic(start, goal),
        sequence: 0,
    });

    while let Some(node) = frontier.pop() {
        if let Some(limit) = limits.max_expansions {
            if expanded >= limit {
                log::debug!("expansion limit {limit} reached, {generated} nodes generated");
                return Err(SearchError::ExpansionLimitReached { limit });
            }
        }
        expanded += 1;

        // lazy duplicate skip: a cheaper copy of this grid was already expanded
        if !visited.insert(node.grid.key()) {
            continue;
        }

        if node.grid == *goal {
            log::debug!(
                "goal reached: cost {}, {expanded} expanded, {generated} generated",
                node.g
            );
            return Ok(SearchOutcome {
                cost: node.g,
                expanded,
                generated,
            });
        }

        for next in &node.grid.successors() {
            if visited.contains(&next.key()) {
                continue;
            }
            frontier.push(SearchNode {
                grid: *next,
                g: node.g + 1,
                h: heuristic(next, goal),
                sequence: generated,
            });
            generated += 1;
        }
    }

    log::debug!("frontier exhausted after {expanded} expansions");
    Err(SearchError::NoSolutionFound { expanded })
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::generator::random_solvable_grid;
    use crate::grid::goal;
    use crate::heuristics::{hamming, manhattan, Heuristic};

    fn grid(rows: [[u8; 3]; 3]) -> Grid {
        Grid::new(rows).unwrap()
    }

    /// Uninformed breadth-first distance, independent of the A* machinery.
    fn bfs_distance(start: &Grid, goal: &Grid) -> Option<u32> {
        let mut distances: HashMap<Grid, u32> = HashMap::from([(*start, 0)]);
        let mut queue = VecDeque::from([*start]);

        while let Some(current) = queue.pop_front() {
            let distance = distances[&current];
            if current == *goal {
                return Some(distance);
            }
            for next in &current.successors() {
                if !distances.contains_key(next) {
                    distances.insert(*next, distance + 1);
                    queue.push_back(*next);
                }
            }
        }
        None
    }

    #[test]
    fn test_start_at_goal() {
        let outcome = search(&goal(), &goal(), hamming).unwrap();
        assert_eq!(outcome.cost, 0);
        assert_eq!(outcome.expanded, 1);
        assert_eq!(outcome.generated, 1);
    }

    #[test]
    fn test_single_move() {
        let start = grid([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        for heuristic in Heuristic::ALL {
            let outcome = search(&start, &goal(), heuristic.function()).unwrap();
            assert_eq!(outcome.cost, 1);
            assert_eq!(outcome.expanded, 2);
        }
    }

    #[test]
    fn test_fixture_hamming() {
        let start = grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        assert_eq!(bfs_distance(&start, &goal()), Some(14));

        let outcome = search(&start, &goal(), hamming).unwrap();
        assert_eq!(outcome.cost, 14);
        assert_eq!(outcome.expanded, 254);
    }

    #[test]
    fn test_fixture_manhattan() {
        let start = grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);

        let outcome = search(&start, &goal(), manhattan).unwrap();
        assert_eq!(outcome.cost, 14);
        assert_eq!(outcome.expanded, 90);
        assert!(outcome.generated >= outcome.expanded);
    }

    #[test]
    fn test_closure_heuristic() {
        let start = grid([[1, 2, 0], [3, 4, 5], [6, 7, 8]]);
        let outcome = search(&start, &goal(), |_: &Grid, _: &Grid| 0).unwrap();
        assert_eq!(outcome.cost, 2);
    }

    #[test]
    fn test_non_canonical_goal() {
        let target = grid([[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        let start = grid([[1, 2, 3], [4, 5, 6], [0, 7, 8]]);
        let outcome = search(&start, &target, manhattan).unwrap();
        assert_eq!(outcome.cost, 2);
    }

    #[test]
    fn test_unsolvable_exhausts_frontier() {
        let unsolvable = grid([[0, 2, 1], [3, 4, 5], [6, 7, 8]]);
        let error = search(&unsolvable, &goal(), manhattan).unwrap_err();

        match error {
            // half of the 9! permutations are reachable, each popped at least once
            SearchError::NoSolutionFound { expanded } => assert!(expanded >= 181_440),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_expansion_limit() {
        let start = grid([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let limits = SearchLimits::with_max_expansions(10);

        assert_eq!(
            search_with_limits(&start, &goal(), hamming, limits),
            Err(SearchError::ExpansionLimitReached { limit: 10 })
        );

        // a generous limit does not change the answer
        let outcome =
            search_with_limits(&start, &goal(), manhattan, SearchLimits::with_max_expansions(90))
                .unwrap();
        assert_eq!(outcome.expanded, 90);
    }

    #[test]
    fn test_matches_breadth_first_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5 {
            let start = random_solvable_grid(&mut rng);
            let expected = bfs_distance(&start, &goal());
            for heuristic in Heuristic::ALL {
                let outcome = search(&start, &goal(), heuristic.function()).unwrap();
                assert_eq!(Some(outcome.cost), expected, "{heuristic} on\n{start}");
            }
        }
    }

    #[test]
    fn test_manhattan_expands_no_more_than_hamming() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut manhattan_wins = 0;

        for _ in 0..100 {
            let start = random_solvable_grid(&mut rng);
            let by_hamming = search(&start, &goal(), hamming).unwrap();
            let by_manhattan = search(&start, &goal(), manhattan).unwrap();

            assert_eq!(by_hamming.cost, by_manhattan.cost, "costs differ for\n{start}");
            if by_manhattan.expanded <= by_hamming.expanded {
                manhattan_wins += 1;
            }
        }

        assert!(manhattan_wins >= 50, "manhattan won only {manhattan_wins} of 100");
    }

    #[test]
    fn test_node_ordering() {
        let node = |g, h, sequence| SearchNode {
            grid: goal(),
            g,
            h,
            sequence,
        };
        let mut heap = BinaryHeap::from([node(3, 4, 0), node(5, 1, 1), node(2, 4, 2), node(1, 6, 3)]);

        // f = 7, 6, 6, 7: lowest f first, then lower h, then earlier insertion
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.sequence)).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }
}
