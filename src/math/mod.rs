pub mod assignment;
pub mod root;

pub use assignment::AssignmentError;
pub use root::{bisect, BisectionOptions, RootError};
