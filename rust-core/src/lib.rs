//! Seismogram Core - ground-motion signal processing and spectral analysis
//!
//! Three-component time series with unit conversion, resampling, rotation and
//! tapering, plus Fourier amplitude spectra with Konno-Ohmachi smoothing.
//! Python bindings are available behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod filters;
pub mod io;
pub mod signal;
pub mod spectrum;
pub mod timeseries;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{ProcessingError, Result};
pub use filters::{TaperEdge, WindowType};
pub use io::BbpWriteOptions;
pub use spectrum::{
    AmplitudeSpectrum, FasConfig, FasResult, KonnoOhmachiSmoother, SmoothedEas, SpectralAnalyzer,
};
pub use timeseries::{DataType, Orientation, Timeseries, Units, VerticalSign};
