pub mod difference;
pub mod distance;
pub mod fit;
pub mod planar;

pub use difference::{ellipse_difference, DifferenceWeights, EllipseDifference};
pub use distance::{
    closest_point_on_ellipse, closest_point_on_ellipse_with, fit_error,
    point_to_ellipse_distance, GeometryError,
};
pub use fit::{select_best_fits, FitSelection};
pub use planar::{standardize, Ellipse, EllipseError, StandardEllipse};
