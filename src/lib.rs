mod error;
pub mod geom;
pub mod math;
pub mod tracking;
pub mod utils;

pub use error::Error;
pub use geom::ellipse::{
    closest_point_on_ellipse, ellipse_difference, fit_error, point_to_ellipse_distance,
    select_best_fits, standardize, DifferenceWeights, Ellipse, EllipseDifference, FitSelection,
    StandardEllipse,
};
pub use tracking::{
    get_best_correspondence, transition, Correspondence, Dissimilarity, Identity, IdentityMap,
    MatchStrategy, Tracker, TrackerConfig,
};
