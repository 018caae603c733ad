//! Closest point and distance between a point and an ellipse boundary.
//!
//! The search follows Eberly, "Distance from a Point to an Ellipse, an Ellipsoid, or a
//! Hyperellipsoid" [1]: the problem is reduced to a first-quadrant point and an axis-aligned
//! ellipse centered at the origin, where the closest point is parameterized by the root of a
//! monotone function.
//!
//! [1] http://www.geometrictools.com/Documentation/DistancePointEllipseEllipsoid.pdf

use nalgebra as na;
use thiserror::Error;

use super::planar::{standardize, Ellipse};
use crate::math::{bisect, BisectionOptions, RootError};

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Closest point search failed: {0}")]
    Root(#[from] RootError),
}

/// Closest point on an axis-aligned ellipse centered at the origin to a first-quadrant point.
///
/// `point` must satisfy `point.0 >= 0` and `point.1 >= 0`; `semi_axes` must be ordered
/// `semi_axes.0 >= semi_axes.1 > 0`. Off-axis points are solved in the normalized form
/// `z = y / e`, where the root is searched for in `s = t / e1²`.
pub fn closest_point_on_reduced_ellipse<F: na::RealField + Copy>(
    point: (F, F),
    semi_axes: (F, F),
    options: &BisectionOptions,
) -> Result<(F, F), GeometryError> {
    let (y0, y1) = point;
    let (e0, e1) = semi_axes;
    let zero = F::zero();
    let one = F::one();
    debug_assert!(y0 >= zero && y1 >= zero, "point must lie in the first quadrant");
    debug_assert!(e0 >= e1 && e1 > zero, "semi-axes must be ordered and non-degenerate");

    // Rotating a point that lies on an axis leaves rounding noise in the other coordinate.
    // Anything this close to an axis is treated as lying on it.
    let on_axis = F::default_epsilon().sqrt();

    if y1 > e1 * on_axis {
        if y0 > e0 * on_axis {
            let z0 = y0 / e0;
            let z1 = y1 / e1;
            let ratio = e0 / e1;
            let r0 = ratio * ratio;
            let n0 = r0 * z0;

            let level = z0 * z0 + z1 * z1 - one;
            if level == zero {
                return Ok((y0, y1));
            }

            let g = |s: F| {
                let q0 = n0 / (s + r0);
                let q1 = z1 / (s + one);
                q0 * q0 + q1 * q1 - one
            };
            let lower = z1 - one;
            let upper = if level < zero {
                zero
            } else {
                n0.hypot(z1) - one
            };

            // g is decreasing on the bracket; rounding can put an endpoint on the wrong side.
            let s = if g(lower) <= zero {
                lower
            } else if g(upper) >= zero {
                upper
            } else {
                bisect(g, lower, upper, options)?
            };
            return Ok((r0 * y0 / (s + r0), y1 / (s + one)));
        }
        return Ok((zero, e1));
    }

    let e0_sq = e0 * e0;
    let focal_sq = e0_sq - e1 * e1;
    if y0 < focal_sq / e0 {
        let x0 = e0_sq * y0 / focal_sq;
        let ratio = x0 / e0;
        let x1 = e1 * (one - ratio * ratio).sqrt();
        Ok((x0, x1))
    } else {
        Ok((e0, zero))
    }
}

/// Returns the point on the boundary of `ellipse` closest to `point`.
///
/// The ellipse must have a strictly positive minor axis, see [Ellipse::validate].
pub fn closest_point_on_ellipse<F: na::RealField + Copy>(
    point: &na::Point2<F>,
    ellipse: &Ellipse<F>,
) -> Result<na::Point2<F>, GeometryError> {
    closest_point_on_ellipse_with(point, ellipse, &BisectionOptions::machine_precision())
}

/// [closest_point_on_ellipse] with explicit root finding tolerances.
pub fn closest_point_on_ellipse_with<F: na::RealField + Copy>(
    point: &na::Point2<F>,
    ellipse: &Ellipse<F>,
    options: &BisectionOptions,
) -> Result<na::Point2<F>, GeometryError> {
    let standard = standardize(ellipse);
    let rotation = na::Rotation2::new(standard.rotation());

    // Center the ellipse at the origin and align its major axis with x.
    let local = rotation.inverse_transform_vector(&(point - standard.center));
    let (y0, y1) = (local.x, local.y);

    let (x0, x1) = closest_point_on_reduced_ellipse(
        (y0.abs(), y1.abs()),
        (standard.semi_major(), standard.semi_minor()),
        options,
    )?;

    let x0 = if y0 < F::zero() { -x0 } else { x0 };
    let x1 = if y1 < F::zero() { -x1 } else { x1 };

    Ok(standard.center + rotation * na::Vector2::new(x0, x1))
}

/// Euclidean distance from `point` to the boundary of `ellipse`.
pub fn point_to_ellipse_distance<F: na::RealField + Copy>(
    point: &na::Point2<F>,
    ellipse: &Ellipse<F>,
) -> Result<F, GeometryError> {
    let closest = closest_point_on_ellipse(point, ellipse)?;
    Ok(na::distance(point, &closest))
}

/// Sum of the distances of `points` to the boundary of `ellipse`.
///
/// Lower is a better fit. An empty point set has zero error.
pub fn fit_error<F: na::RealField + Copy>(
    ellipse: &Ellipse<F>,
    points: &[na::Point2<F>],
) -> Result<F, GeometryError> {
    points.iter().try_fold(F::zero(), |acc, point| {
        Ok(acc + point_to_ellipse_distance(point, ellipse)?)
    })
}
