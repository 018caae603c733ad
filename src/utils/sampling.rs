use nalgebra as na;

use crate::geom::ellipse::{standardize, Ellipse};

/// Samples `num_points` evenly spaced (in the parametric angle) points on the boundary of
/// `ellipse`, starting at the positive end of the major axis.
pub fn sample_boundary<F: na::RealField + Copy>(
    ellipse: &Ellipse<F>,
    num_points: usize,
) -> Vec<na::Point2<F>> {
    let standard = standardize(ellipse);
    let rotation = na::Rotation2::new(standard.rotation());
    let (a, b) = (standard.semi_major(), standard.semi_minor());

    (0..num_points)
        .map(|i| {
            let t = na::convert::<f64, F>(i as f64 * 2.0 / num_points as f64) * F::pi();
            let (sin_t, cos_t) = t.sin_cos();
            standard.center + rotation * na::Vector2::new(a * cos_t, b * sin_t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_aligned_samples() {
        let ellipse = Ellipse::from_parameters(1.0, 2.0, 4.0, 2.0, 0.0);
        let points = sample_boundary(&ellipse, 4);

        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[0], na::Point2::new(3.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(points[1], na::Point2::new(1.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(points[2], na::Point2::new(-1.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(points[3], na::Point2::new(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotated_samples() {
        // Swapped axes turn the major axis to the vertical.
        let ellipse = Ellipse::from_parameters(0.0, 0.0, 2.0, 6.0, 0.0);
        let points = sample_boundary(&ellipse, 2);

        assert_relative_eq!(points[0], na::Point2::new(0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(points[1], na::Point2::new(0.0, -3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_no_samples() {
        let ellipse = Ellipse::from_parameters(0.0, 0.0, 2.0, 1.0, 0.0);
        assert!(sample_boundary(&ellipse, 0).is_empty());
    }
}
