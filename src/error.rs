use crate::geom::ellipse::{EllipseError, GeometryError};
use crate::math::RootError;
use crate::tracking::TrackingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Root(#[from] RootError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Ellipse(#[from] EllipseError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
