//! Rank-order mapping between sequences.
//!
//! Imposing a reference distribution onto a candidate keeps the candidate's
//! relative ordering and swaps its values for the sorted reference values.
//! Ties in the candidate are broken by position (stable sort), so the mapping
//! is fully determined by its inputs.

use crate::errors::{SurrogateError, SurrogateResult};
use crate::math_utils::sorted_copy;

/// Indices of `sequence` in ascending value order, ties by index.
fn sort_order(sequence: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sequence.len()).collect();
    order.sort_by(|&a, &b| sequence[a].total_cmp(&sequence[b]));
    order
}

/// Rank of every position in `sequence` (0 for the smallest value).
///
/// Equal values get increasing ranks in order of appearance.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::rank_order::rank_of;
///
/// assert_eq!(rank_of(&[0.3, -1.0, 0.3, 2.0]), vec![1, 0, 2, 3]);
/// ```
pub fn rank_of(sequence: &[f64]) -> Vec<usize> {
    let mut ranks = vec![0; sequence.len()];
    for (rank, index) in sort_order(sequence).into_iter().enumerate() {
        ranks[index] = rank;
    }
    ranks
}

/// Place `sorted_reference[ranks[i]]` at every position `i`.
///
/// `ranks` must be a permutation of `0..sorted_reference.len()`, as produced
/// by [`rank_of`].
pub fn impose_ranks(ranks: &[usize], sorted_reference: &[f64]) -> SurrogateResult<Vec<f64>> {
    if ranks.len() != sorted_reference.len() {
        return Err(SurrogateError::LengthMismatch {
            expected: sorted_reference.len(),
            actual: ranks.len(),
            operation: "rank imposition".to_string(),
        });
    }
    ranks
        .iter()
        .map(|&rank| {
            sorted_reference
                .get(rank)
                .copied()
                .ok_or_else(|| SurrogateError::InvalidParameter {
                    parameter: "rank".to_string(),
                    value: rank as f64,
                    constraint: format!("< {}", sorted_reference.len()),
                })
        })
        .collect()
}

/// Reorder the values of `reference` to follow the rank order of `candidate`.
///
/// The result is a permutation of `reference` in which position `i` holds the
/// reference value whose rank equals the rank of `candidate[i]`.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::rank_order::impose_distribution;
///
/// let out = impose_distribution(&[0.2, -5.0, 9.0], &[10.0, 30.0, 20.0]).unwrap();
/// assert_eq!(out, vec![20.0, 10.0, 30.0]);
/// ```
pub fn impose_distribution(candidate: &[f64], reference: &[f64]) -> SurrogateResult<Vec<f64>> {
    RankOrderMapper::new(reference).apply(candidate)
}

/// Reusable mapper holding a pre-sorted reference distribution.
///
/// Iterative refinement imposes the same reference many times; sorting it
/// once up front keeps each application at a single sort of the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOrderMapper {
    sorted_reference: Vec<f64>,
}

impl RankOrderMapper {
    /// Build a mapper for the value distribution of `reference`.
    pub fn new(reference: &[f64]) -> Self {
        Self {
            sorted_reference: sorted_copy(reference),
        }
    }

    /// Reference values in ascending order.
    pub fn sorted_reference(&self) -> &[f64] {
        &self.sorted_reference
    }

    /// Impose the reference distribution onto `candidate`.
    pub fn apply(&self, candidate: &[f64]) -> SurrogateResult<Vec<f64>> {
        if candidate.len() != self.sorted_reference.len() {
            return Err(SurrogateError::LengthMismatch {
                expected: self.sorted_reference.len(),
                actual: candidate.len(),
                operation: "rank-order mapping".to_string(),
            });
        }

        let mut result = vec![0.0; candidate.len()];
        for (rank, index) in sort_order(candidate).into_iter().enumerate() {
            result[index] = self.sorted_reference[rank];
        }
        Ok(result)
    }
}
