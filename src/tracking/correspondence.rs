use itertools::Itertools;
use nalgebra::DMatrix;
use std::time::{Duration, Instant};
use tracing::{trace, warn};

use super::{Dissimilarity, TrackingError};
use crate::math::assignment;

/// Cost of leaving an object without a counterpart. Any real pair costs strictly less.
pub const UNMATCHED_COST: f64 = 1.0;

/// Deadline checks happen once per this many permutations.
const BUDGET_CHECK_INTERVAL: usize = 256;

/// Wall-clock allowance for the exhaustive search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self { time_limit: None }
    }

    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
        }
    }
}

/// How the pairing of old and new objects is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Tries every permutation of the padded old list, in lexicographic order of old indices.
    /// The first permutation reaching the minimum wins ties. O(n!) time; optimal unless the
    /// budget runs out, in which case the best permutation seen so far is returned.
    Exhaustive(SearchBudget),
    /// Hungarian algorithm on the padded cost matrix. O(n³) time, always optimal.
    Hungarian,
}

impl MatchStrategy {
    pub fn exhaustive() -> Self {
        Self::Exhaustive(SearchBudget::unlimited())
    }
}

/// One-to-one pairing of an old and a new list, padded with `None` to equal length.
///
/// Pairs are ordered by position in the padded new list. Every object of either list appears in
/// exactly one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondence<T> {
    pairs: Vec<(Option<T>, Option<T>)>,
    total_error: f64,
    optimal: bool,
}

impl<T> Correspondence<T> {
    pub fn pairs(&self) -> &[(Option<T>, Option<T>)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(Option<T>, Option<T>)> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of the transformed pair costs, see [calculate_error].
    pub fn total_error(&self) -> f64 {
        self.total_error
    }

    /// `false` only when a search budget expired before every candidate was tried.
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }
}

/// Index form of a correspondence: `old_for_new[k]` is the padded old index paired with the
/// padded new index `k`. Indices past the end of a list stand for padding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Matching {
    pub old_for_new: Vec<usize>,
    pub total_error: f64,
    pub optimal: bool,
}

/// Cost of a single pair: `tanh` of the dissimilarity for two objects, [UNMATCHED_COST] when
/// either side is missing.
pub fn pair_cost<T, D>(old: Option<&T>, new: Option<&T>, dissimilarity: &D) -> f64
where
    D: Dissimilarity<T> + ?Sized,
{
    match (old, new) {
        (Some(old), Some(new)) => dissimilarity.dissimilarity(old, new).tanh(),
        _ => UNMATCHED_COST,
    }
}

/// Total error of a pairing: the sum of [pair_cost] over all pairs.
pub fn calculate_error<T, D>(pairing: &[(Option<T>, Option<T>)], dissimilarity: &D) -> f64
where
    D: Dissimilarity<T> + ?Sized,
{
    pairing
        .iter()
        .map(|(old, new)| pair_cost(old.as_ref(), new.as_ref(), dissimilarity))
        .sum()
}

/// Padded square matrix of pair costs, rows indexed by old objects and columns by new ones.
pub(crate) fn cost_matrix<T, D>(
    old: &[T],
    new: &[T],
    dissimilarity: &D,
) -> Result<DMatrix<f64>, TrackingError>
where
    D: Dissimilarity<T> + ?Sized,
{
    let n = old.len().max(new.len());
    let mut cost = DMatrix::from_element(n, n, UNMATCHED_COST);
    for (i, old_object) in old.iter().enumerate() {
        for (j, new_object) in new.iter().enumerate() {
            let score = dissimilarity.dissimilarity(old_object, new_object);
            if !score.is_finite() {
                return Err(TrackingError::NonFiniteScore {
                    old: i,
                    new: j,
                    score,
                });
            }
            cost[(i, j)] = score.tanh();
        }
    }
    Ok(cost)
}

fn matching_error(cost: &DMatrix<f64>, old_for_new: &[usize]) -> f64 {
    old_for_new
        .iter()
        .enumerate()
        .map(|(new, &old)| cost[(old, new)])
        .sum()
}

fn exhaustive_search(cost: &DMatrix<f64>, budget: &SearchBudget) -> Matching {
    let n = cost.nrows();
    let deadline = budget.time_limit.map(|limit| Instant::now() + limit);

    let mut permutations = (0..n).permutations(n);
    let Some(first) = permutations.next() else {
        return Matching {
            old_for_new: Vec::new(),
            total_error: 0.0,
            optimal: true,
        };
    };
    let mut best_error = matching_error(cost, &first);
    let mut best = first;

    for (checked, candidate) in permutations.enumerate() {
        if let Some(deadline) = deadline {
            if (checked + 1) % BUDGET_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                warn!(
                    size = n,
                    checked = checked + 1,
                    "search budget expired, returning best correspondence so far"
                );
                return Matching {
                    old_for_new: best,
                    total_error: best_error,
                    optimal: false,
                };
            }
        }

        let error = matching_error(cost, &candidate);
        if error < best_error {
            best_error = error;
            best = candidate;
        }
    }

    Matching {
        old_for_new: best,
        total_error: best_error,
        optimal: true,
    }
}

fn hungarian_search(cost: &DMatrix<f64>) -> Result<Matching, TrackingError> {
    let new_for_old = assignment::solve(cost)?;
    let mut old_for_new = vec![0; new_for_old.len()];
    for (old, &new) in new_for_old.iter().enumerate() {
        old_for_new[new] = old;
    }
    let total_error = matching_error(cost, &old_for_new);

    Ok(Matching {
        old_for_new,
        total_error,
        optimal: true,
    })
}

pub(crate) fn find_matching<T, D>(
    old: &[T],
    new: &[T],
    dissimilarity: &D,
    strategy: &MatchStrategy,
) -> Result<Matching, TrackingError>
where
    D: Dissimilarity<T> + ?Sized,
{
    let cost = cost_matrix(old, new, dissimilarity)?;
    trace!(old = old.len(), new = new.len(), ?strategy, "searching correspondence");

    match strategy {
        MatchStrategy::Exhaustive(budget) => Ok(exhaustive_search(&cost, budget)),
        MatchStrategy::Hungarian => hungarian_search(&cost),
    }
}

/// Best correspondence between `old` and `new` under `strategy`.
pub fn best_correspondence<T, D>(
    old: &[T],
    new: &[T],
    dissimilarity: &D,
    strategy: &MatchStrategy,
) -> Result<Correspondence<T>, TrackingError>
where
    T: Clone,
    D: Dissimilarity<T> + ?Sized,
{
    let matching = find_matching(old, new, dissimilarity, strategy)?;
    let pairs = matching
        .old_for_new
        .iter()
        .enumerate()
        .map(|(k, &i)| (old.get(i).cloned(), new.get(k).cloned()))
        .collect();

    Ok(Correspondence {
        pairs,
        total_error: matching.total_error,
        optimal: matching.optimal,
    })
}

/// Pairing of `old` and `new` with the lowest [calculate_error], found by trying every
/// permutation of the padded old list.
pub fn get_best_correspondence<T, D>(
    old: &[T],
    new: &[T],
    dissimilarity: &D,
) -> Result<Correspondence<T>, TrackingError>
where
    T: Clone,
    D: Dissimilarity<T> + ?Sized,
{
    best_correspondence(old, new, dissimilarity, &MatchStrategy::exhaustive())
}
