//! Minimum-cost perfect matching on square cost matrices.

use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AssignmentError {
    #[error("Cost matrix must be square, got {0}x{1}")]
    NotSquare(usize, usize),

    #[error("Cost matrix contains a non-finite value at ({0}, {1})")]
    NonFinite(usize, usize),
}

/// Solves the linear assignment problem with the shortest augmenting path form of the Hungarian
/// algorithm (Kuhn-Munkres with row and column potentials), in O(n³).
///
/// Returns `assignment` where `assignment[row]` is the column matched to `row`. The matching
/// minimizes `sum(cost[(row, assignment[row])])` exactly.
///
/// Rows are inserted in ascending order and columns are scanned in ascending order; on ties the
/// lowest column reached first is kept, which makes the result deterministic.
pub fn solve(cost: &DMatrix<f64>) -> Result<Vec<usize>, AssignmentError> {
    let (rows, cols) = cost.shape();
    if rows != cols {
        return Err(AssignmentError::NotSquare(rows, cols));
    }
    for i in 0..rows {
        for j in 0..cols {
            if !cost[(i, j)].is_finite() {
                return Err(AssignmentError::NonFinite(i, j));
            }
        }
    }

    let n = rows;
    // 1-based bookkeeping; index 0 is the virtual source column.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut matched_row = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        matched_row[0] = row;
        let mut j0 = 0;
        let mut min_slack = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = matched_row[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let slack = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[matched_row[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            j0 = j1;
            if matched_row[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the source.
        loop {
            let j1 = way[j0];
            matched_row[j0] = matched_row[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=n {
        assignment[matched_row[j] - 1] = j - 1;
    }
    Ok(assignment)
}

/// Total cost of `assignment` on `cost`, summed in row order.
pub fn assignment_cost(cost: &DMatrix<f64>, assignment: &[usize]) -> f64 {
    assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| cost[(row, col)])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use itertools::Itertools;

    fn brute_force_minimum(cost: &DMatrix<f64>) -> f64 {
        let n = cost.nrows();
        (0..n)
            .permutations(n)
            .map(|perm| assignment_cost(cost, &perm))
            .fold(f64::INFINITY, f64::min)
    }

    /// Small deterministic generator so the tests need no extra dependency.
    fn pseudo_random_matrix(n: usize, seed: u64) -> DMatrix<f64> {
        let mut state = seed;
        DMatrix::from_fn(n, n, |_, _| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (1u64 << 31) as f64) * 4.0 - 1.0
        })
    }

    #[test]
    fn test_empty() {
        let cost = DMatrix::<f64>::zeros(0, 0);
        assert_eq!(solve(&cost), Ok(vec![]));
    }

    #[test]
    fn test_single() {
        let cost = DMatrix::from_row_slice(1, 1, &[3.5]);
        assert_eq!(solve(&cost), Ok(vec![0]));
    }

    #[test]
    fn test_known_assignment() {
        let cost = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 3.0, 2.0, 0.0, 5.0, 3.0, 2.0, 2.0]);
        let assignment = solve(&cost).unwrap();
        assert_eq!(assignment, vec![1, 0, 2]);
        assert_relative_eq!(assignment_cost(&cost, &assignment), 5.0);
    }

    #[test]
    fn test_negative_costs() {
        let cost = DMatrix::from_row_slice(2, 2, &[-1.0, 0.5, 0.2, -0.9]);
        let assignment = solve(&cost).unwrap();
        assert_eq!(assignment, vec![0, 1]);
    }

    #[test]
    fn test_matches_brute_force() {
        for (n, seed) in [(2, 1), (3, 7), (4, 42), (5, 1234), (6, 99)] {
            let cost = pseudo_random_matrix(n, seed);
            let assignment = solve(&cost).unwrap();

            let mut cols = assignment.clone();
            cols.sort_unstable();
            assert_eq!(cols, (0..n).collect::<Vec<_>>());

            assert_relative_eq!(
                assignment_cost(&cost, &assignment),
                brute_force_minimum(&cost),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_not_square() {
        let cost = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(solve(&cost), Err(AssignmentError::NotSquare(2, 3)));
    }

    #[test]
    fn test_non_finite() {
        let cost = DMatrix::from_row_slice(2, 2, &[0.0, f64::NAN, 1.0, 1.0]);
        assert_eq!(solve(&cost), Err(AssignmentError::NonFinite(0, 1)));
    }
}
