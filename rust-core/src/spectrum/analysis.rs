//! Fourier amplitude spectrum of a three-component record
//!
//! Each component is transformed at `fft_points` points, scaled by `dt`,
//! restricted to the `[fmin, fmax]` band and smoothed with the three-point
//! boxcar from [`crate::signal::smooth`].

use super::fft::FftEngine;
use super::windowing::apply_window;
use crate::error::{ProcessingError, Result};
use crate::filters::windows::WindowType;
use crate::signal::smooth;
use crate::timeseries::Timeseries;
use serde::{Deserialize, Serialize};

/// Spectrum configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FasConfig {
    /// FFT length; `None` picks the next power of two above the sample count
    pub fft_points: Option<usize>,

    /// Lowest frequency kept (Hz)
    pub fmin: f64,

    /// Highest frequency kept (Hz)
    pub fmax: f64,

    /// Boxcar smoothing factor, only 3 gives unit-gain weights
    pub smooth_factor: usize,

    /// Window applied before the FFT
    pub window_type: WindowType,
}

impl Default for FasConfig {
    fn default() -> Self {
        Self {
            fft_points: None,
            fmin: 0.0,
            fmax: 50.0,
            smooth_factor: 3,
            window_type: WindowType::Rectangular,
        }
    }
}

/// Smallest power of two strictly greater than `samples`
pub fn fft_points_for(samples: usize) -> usize {
    1 << (usize::BITS - samples.leading_zeros())
}

/// Amplitude spectrum of one component on its frequency grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeSpectrum {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

/// Band-limited FAS of all three components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FasResult {
    pub frequencies: Vec<f64>,
    pub fas_h1: Vec<f64>,
    pub fas_h2: Vec<f64>,
    pub fas_v: Vec<f64>,
}

impl FasResult {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// First horizontal as a standalone spectrum
    pub fn h1_spectrum(&self) -> AmplitudeSpectrum {
        AmplitudeSpectrum {
            frequencies: self.frequencies.clone(),
            amplitudes: self.fas_h1.clone(),
        }
    }

    /// Second horizontal as a standalone spectrum
    pub fn h2_spectrum(&self) -> AmplitudeSpectrum {
        AmplitudeSpectrum {
            frequencies: self.frequencies.clone(),
            amplitudes: self.fas_h2.clone(),
        }
    }
}

/// Computes band-limited Fourier amplitude spectra
pub struct SpectralAnalyzer {
    config: FasConfig,
    fft_engine: Option<FftEngine>,
}

impl SpectralAnalyzer {
    /// Create new spectral analyzer
    ///
    /// With a fixed `fft_points` the FFT is planned here and reused for every
    /// record; otherwise it is planned per record.
    pub fn new(config: FasConfig) -> Result<Self> {
        if config.smooth_factor < 2 {
            return Err(ProcessingError::InvalidArgument(format!(
                "smoothing factor must be at least 2, got {}",
                config.smooth_factor
            )));
        }
        if !config.fmin.is_finite() || !config.fmax.is_finite() || config.fmin < 0.0 {
            return Err(ProcessingError::InvalidArgument(format!(
                "invalid frequency band [{}, {}]",
                config.fmin, config.fmax
            )));
        }
        let fft_engine = config.fft_points.map(FftEngine::new).transpose()?;

        Ok(Self { config, fft_engine })
    }

    /// Get current configuration
    pub fn config(&self) -> &FasConfig {
        &self.config
    }

    fn engine_for(&mut self, samples: usize) -> Result<&mut FftEngine> {
        let points = self.config.fft_points.unwrap_or_else(|| fft_points_for(samples));
        let replan = self
            .fft_engine
            .as_ref()
            .map_or(true, |engine| engine.fft_size() != points);
        if replan {
            tracing::trace!(points, "planning FFT");
            self.fft_engine = Some(FftEngine::new(points)?);
        }
        self.fft_engine
            .as_mut()
            .ok_or_else(|| ProcessingError::InvalidState("FFT engine missing".into()))
    }

    /// Band-limited, smoothed FAS of one component
    fn component(&mut self, data: &[f64], dt: f64, band: (usize, usize)) -> Result<Vec<f64>> {
        let windowed = apply_window(data, self.config.window_type);
        let magnitude = self.engine_for(data.len())?.full_magnitude(&windowed)?;

        let mut amplitudes: Vec<f64> = magnitude[band.0..band.1].iter().map(|m| m * dt).collect();
        smooth(&mut amplitudes, self.config.smooth_factor)?;
        Ok(amplitudes)
    }

    /// FAS of h1, h2 and v for a record
    ///
    /// Fails with `NumericDegenerate` when the band selects no bins.
    pub fn fas(&mut self, timeseries: &Timeseries) -> Result<FasResult> {
        let dt = timeseries.dt();
        let samples = timeseries.h1().len();
        let points = self.config.fft_points.unwrap_or_else(|| fft_points_for(samples));

        let sample_rate = 1.0 / dt;
        let delta_f = sample_rate / points as f64;
        let start = (self.config.fmin / delta_f) as usize;
        let end = ((self.config.fmax / delta_f) as usize + 1).min(points);
        if start >= end {
            return Err(ProcessingError::NumericDegenerate(format!(
                "frequency band [{}, {}] Hz selects no FFT bins",
                self.config.fmin, self.config.fmax
            )));
        }

        let frequencies = (start..end)
            .map(|k| sample_rate * k as f64 / points as f64)
            .collect();
        let band = (start, end);
        let result = FasResult {
            frequencies,
            fas_h1: self.component(timeseries.h1(), dt, band)?,
            fas_h2: self.component(timeseries.h2(), dt, band)?,
            fas_v: self.component(timeseries.v(), dt, band)?,
        };

        tracing::debug!(
            station = timeseries.station_name(),
            points,
            bins = result.len(),
            "computed FAS"
        );
        Ok(result)
    }
}
