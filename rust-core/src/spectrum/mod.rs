//! Fourier amplitude spectra and Konno-Ohmachi smoothing

pub mod fft;
pub mod windowing;
pub mod analysis;
pub mod smoothing;

pub use fft::FftEngine;
pub use windowing::apply_window;
pub use analysis::{fft_points_for, AmplitudeSpectrum, FasConfig, FasResult, SpectralAnalyzer};
pub use smoothing::{
    calculate_smoothed_eas, ko98_smooth, smoothed_eas, KonnoOhmachiSmoother, SmoothedEas, EAS_B_EXP,
};
