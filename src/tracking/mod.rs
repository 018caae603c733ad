//! Identity correspondence between the objects of consecutive time steps.

pub mod correspondence;
pub mod dissimilarity;
pub mod identity;
pub mod tracker;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::math::AssignmentError;
use thiserror::Error;

pub use correspondence::{
    best_correspondence, calculate_error, get_best_correspondence, pair_cost, Correspondence,
    MatchStrategy, SearchBudget, UNMATCHED_COST,
};
pub use dissimilarity::Dissimilarity;
pub use identity::{Identity, IdentityMap};
pub use tracker::{Tracker, TrackerConfig};
pub use transition::{transition, transition_with};

#[derive(Debug, Error, PartialEq)]
pub enum TrackingError {
    #[error("Dissimilarity of old object {old} and new object {new} is not finite: {score}")]
    NonFiniteScore { old: usize, new: usize, score: f64 },

    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}
