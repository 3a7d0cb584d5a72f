//! Time-domain signal operations on sample arrays

pub mod ops;
pub mod resample;
pub mod rotation;

pub use ops::{differentiate, integrate, smooth};
pub use resample::{resample_components, ResamplePath, Resampled};
pub use rotation::{rotate_horizontals, RotatedPair};
