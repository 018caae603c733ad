use nalgebra as na;

use super::planar::{standardize, Ellipse};
use crate::tracking::Dissimilarity;

/// Weights of the three terms of [ellipse_difference].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceWeights<F: na::RealField + Copy> {
    /// Weight on the displacement of the centers
    pub displacement: F,
    /// Weight on the log of the area ratio
    pub area: F,
    /// Weight on the difference in angle, in degrees
    pub rotation: F,
}

impl<F: na::RealField + Copy> DifferenceWeights<F> {
    pub fn new(displacement: F, area: F, rotation: F) -> Self {
        Self {
            displacement,
            area,
            rotation,
        }
    }

    pub fn with_displacement(mut self, displacement: F) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn with_area(mut self, area: F) -> Self {
        self.area = area;
        self
    }

    pub fn with_rotation(mut self, rotation: F) -> Self {
        self.rotation = rotation;
        self
    }
}

impl<F: na::RealField + Copy> Default for DifferenceWeights<F> {
    fn default() -> Self {
        Self::new(F::one(), F::one(), F::one())
    }
}

/// Directional dissimilarity between two ellipses.
///
/// Both ellipses are standardized, then
/// `displacement * |c1 - c2| + area * ln(area1 / area2) + rotation * |angle1 - angle2|`.
///
/// This is not a metric: the area term changes sign when the arguments are swapped, so the
/// result can be negative.
pub fn ellipse_difference<F: na::RealField + Copy>(
    ellipse_1: &Ellipse<F>,
    ellipse_2: &Ellipse<F>,
    weights: &DifferenceWeights<F>,
) -> F {
    let e1 = standardize(ellipse_1);
    let e2 = standardize(ellipse_2);

    let displacement = na::distance(&e1.center, &e2.center);
    let size_change = ((e1.axes.0 * e1.axes.1) / (e2.axes.0 * e2.axes.1)).ln();
    let rotation = (e1.angle_deg - e2.angle_deg).abs();

    weights.displacement * displacement + weights.area * size_change + weights.rotation * rotation
}

/// [ellipse_difference] as a tracking dissimilarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseDifference<F: na::RealField + Copy> {
    pub weights: DifferenceWeights<F>,
}

impl<F: na::RealField + Copy> EllipseDifference<F> {
    pub fn new(weights: DifferenceWeights<F>) -> Self {
        Self { weights }
    }
}

impl<F: na::RealField + Copy> Default for EllipseDifference<F> {
    fn default() -> Self {
        Self::new(DifferenceWeights::default())
    }
}

impl<F: na::RealField + Copy> Dissimilarity<Ellipse<F>> for EllipseDifference<F> {
    fn dissimilarity(&self, old: &Ellipse<F>, new: &Ellipse<F>) -> f64 {
        ellipse_difference(old, new, &self.weights).to_subset_unchecked()
    }
}
