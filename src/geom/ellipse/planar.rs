use nalgebra as na;
use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EllipseError {
    #[error("Ellipse parameters must be finite")]
    NonFinite,

    #[error("Axis lengths must be positive, got ({0}, {1})")]
    NonPositiveAxes(f64, f64),
}

/// An ellipse in a 2D plane as reported by a detector: center, the two full axis lengths in any
/// order and a rotation in degrees.
///
/// Not canonical: swapping the axes and adding 90° describes the same ellipse, as does any
/// multiple of 180° added to the angle. Use [standardize] before comparing ellipses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse<F: na::RealField + Copy> {
    /// Center coordinates
    pub center: na::Point2<F>,
    /// Full axis lengths, in any order
    pub axes: (F, F),
    /// Rotation in degrees
    pub angle_deg: F,
}

impl<F: na::RealField + Copy> Ellipse<F> {
    pub fn new(center: na::Point2<F>, axes: (F, F), angle_deg: F) -> Self {
        Self {
            center,
            axes,
            angle_deg,
        }
    }

    pub fn from_parameters(x: F, y: F, axis_0: F, axis_1: F, angle_deg: F) -> Self {
        Self::new(na::Point2::new(x, y), (axis_0, axis_1), angle_deg)
    }

    /// Checks the preconditions of the distance functions: finite parameters and strictly
    /// positive axes.
    pub fn validate(&self) -> Result<(), EllipseError> {
        let (a, b) = self.axes;
        let finite = [self.center.x, self.center.y, a, b, self.angle_deg]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(EllipseError::NonFinite);
        }
        if a <= F::zero() || b <= F::zero() {
            return Err(EllipseError::NonPositiveAxes(
                a.to_subset_unchecked(),
                b.to_subset_unchecked(),
            ));
        }
        Ok(())
    }

    pub fn standardize(&self) -> StandardEllipse<F> {
        standardize(self)
    }
}

/// An [Ellipse] in canonical form: `axes.0 >= axes.1` and `0 <= angle_deg < 180`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardEllipse<F: na::RealField + Copy>(Ellipse<F>);

impl<F: na::RealField + Copy> StandardEllipse<F> {
    /// Half of the major axis
    pub fn semi_major(&self) -> F {
        self.0.axes.0 / na::convert::<f64, F>(2.0)
    }

    /// Half of the minor axis
    pub fn semi_minor(&self) -> F {
        self.0.axes.1 / na::convert::<f64, F>(2.0)
    }

    /// Rotation in radians
    pub fn rotation(&self) -> F {
        self.0.angle_deg * F::pi() / na::convert::<f64, F>(180.0)
    }

    pub fn into_inner(self) -> Ellipse<F> {
        self.0
    }
}

impl<F: na::RealField + Copy> Deref for StandardEllipse<F> {
    type Target = Ellipse<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: na::RealField + Copy> AsRef<Ellipse<F>> for StandardEllipse<F> {
    fn as_ref(&self) -> &Ellipse<F> {
        &self.0
    }
}

impl<F: na::RealField + Copy> From<StandardEllipse<F>> for Ellipse<F> {
    fn from(standard: StandardEllipse<F>) -> Self {
        standard.0
    }
}

/// Puts an ellipse in canonical form.
///
/// If the axes are not in descending order they are swapped and 90° is added to the angle; the
/// angle is then reduced into `[0, 180)`.
pub fn standardize<F: na::RealField + Copy>(ellipse: &Ellipse<F>) -> StandardEllipse<F> {
    let (a, b) = ellipse.axes;
    let (axes, angle) = if a < b {
        ((b, a), ellipse.angle_deg + na::convert::<f64, F>(90.0))
    } else {
        ((a, b), ellipse.angle_deg)
    };

    let half_turn: F = na::convert::<f64, F>(180.0);
    let mut angle = angle % half_turn;
    if angle < F::zero() {
        angle += half_turn;
    }
    // -tiny + 180 rounds to 180
    if angle >= half_turn {
        angle = F::zero();
    }

    StandardEllipse(Ellipse::new(ellipse.center, axes, angle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use approx::assert_relative_eq;

    fn reference() -> Ellipse<f64> {
        Ellipse::from_parameters(128.0, 128.0, 30.0, 20.0, 0.0)
    }

    #[test]
    fn test_standardize_no_change() {
        let ellipse = reference();
        assert_eq!(*standardize(&ellipse), ellipse);
    }

    #[test]
    fn test_standardize_switch_axes() {
        let ellipse = Ellipse::from_parameters(126.0, 124.0, 22.0, 31.0, 1.0 - 90.0);
        let expected = Ellipse::from_parameters(126.0, 124.0, 31.0, 22.0, 1.0);
        assert_eq!(*standardize(&ellipse), expected);
    }

    #[test]
    fn test_standardize_negative_degrees() {
        let ellipse = Ellipse::from_parameters(126.0, 124.0, 31.0, 22.0, 1.0 - 180.0);
        let expected = Ellipse::from_parameters(126.0, 124.0, 31.0, 22.0, 1.0);
        assert_eq!(*standardize(&ellipse), expected);
    }

    #[test]
    fn test_standardize_equivalent_ellipses() {
        let swapped = Ellipse::from_parameters(126.0, 124.0, 22.0, 31.0, -89.0);
        let plain = Ellipse::from_parameters(126.0, 124.0, 31.0, 22.0, 1.0);
        assert_eq!(standardize(&swapped), standardize(&plain));
    }

    #[test]
    fn test_standardize_idempotent() {
        let ellipses = [
            reference(),
            Ellipse::from_parameters(0.0, 0.0, 10.0, 40.0, 725.0),
            Ellipse::from_parameters(-3.0, 2.0, 5.0, 5.0, -360.0),
            Ellipse::from_parameters(1.0, 1.0, 2.0, 3.0, -1e-20),
            Ellipse::from_parameters(1.0, 1.0, 3.0, 2.0, 179.999),
        ];
        for ellipse in ellipses {
            let once = standardize(&ellipse);
            let twice = standardize(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_standardize_angle_range() {
        for step in -40..40 {
            let angle = step as f64 * 23.5;
            let standard = standardize(&Ellipse::from_parameters(0.0, 0.0, 4.0, 9.0, angle));
            assert!(standard.axes.0 >= standard.axes.1);
            assert!((0.0..180.0).contains(&standard.angle_deg), "{}", angle);
        }
    }

    #[test]
    fn test_standard_accessors() {
        let standard = Ellipse::from_parameters(0.0, 0.0, 20.0, 30.0, 0.0).standardize();
        assert_relative_eq!(standard.semi_major(), 15.0);
        assert_relative_eq!(standard.semi_minor(), 10.0);
        assert_relative_eq!(standard.rotation(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_validate() -> Result<()> {
        reference().validate()?;

        let flat = Ellipse::from_parameters(0.0, 0.0, 10.0, 0.0, 0.0);
        assert_eq!(flat.validate(), Err(EllipseError::NonPositiveAxes(10.0, 0.0)));

        let nan = Ellipse::from_parameters(f64::NAN, 0.0, 10.0, 5.0, 0.0);
        assert_eq!(nan.validate(), Err(EllipseError::NonFinite));

        Ok(())
    }

    #[test]
    fn test_f32_standardize() {
        let ellipse = Ellipse::<f32>::from_parameters(0.0, 0.0, 2.0, 3.0, -45.0);
        let standard = standardize(&ellipse);
        assert_relative_eq!(standard.axes.0, 3.0f32);
        assert_relative_eq!(standard.angle_deg, 45.0f32);
    }
}
