use nalgebra as na;
use std::cmp::Ordering;
use tracing::debug;

use super::distance::{fit_error, GeometryError};
use super::planar::{standardize, Ellipse};

/// Fewest contour points an ellipse fit is trusted with.
pub const MIN_CONTOUR_POINTS: usize = 5;

/// Filtering applied by [select_best_fits].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSelection<F: na::RealField + Copy> {
    /// Fits whose minor axis is not strictly greater than this are dropped
    pub min_minor_axis: F,
    /// Maximum number of fits kept
    pub limit: usize,
}

impl<F: na::RealField + Copy> Default for FitSelection<F> {
    fn default() -> Self {
        Self {
            min_minor_axis: F::zero(),
            limit: 5,
        }
    }
}

impl<F: na::RealField + Copy> FitSelection<F> {
    pub fn with_min_minor_axis(mut self, min_minor_axis: F) -> Self {
        self.min_minor_axis = min_minor_axis;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Picks the best ellipse fits of a frame.
///
/// Each candidate is an ellipse together with the contour it was fitted to. Candidates with
/// fewer than [MIN_CONTOUR_POINTS] points or a too small minor axis are dropped, the rest are
/// ordered by ascending [fit_error] (stable on ties) and truncated to `selection.limit`.
pub fn select_best_fits<F: na::RealField + Copy>(
    candidates: &[(Ellipse<F>, Vec<na::Point2<F>>)],
    selection: &FitSelection<F>,
) -> Result<Vec<Ellipse<F>>, GeometryError> {
    let mut scored = candidates
        .iter()
        .filter(|(ellipse, contour)| {
            contour.len() >= MIN_CONTOUR_POINTS
                && standardize(ellipse).axes.1 > selection.min_minor_axis
        })
        .map(|(ellipse, contour)| Ok((fit_error(ellipse, contour)?, *ellipse)))
        .collect::<Result<Vec<_>, GeometryError>>()?;

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.truncate(selection.limit);

    debug!(
        candidates = candidates.len(),
        kept = scored.len(),
        "selected ellipse fits"
    );

    Ok(scored.into_iter().map(|(_, ellipse)| ellipse).collect())
}
