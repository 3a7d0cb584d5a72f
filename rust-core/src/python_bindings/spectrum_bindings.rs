//! Python bindings for spectral smoothing

use crate::filters::WindowType;
use crate::spectrum::smoothing::{self, EAS_B_EXP};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Konno-Ohmachi smoothing of an amplitude spectrum
///
/// Args:
///     frequencies: Frequency grid (Hz)
///     amplitudes: Amplitudes on that grid
///     delta_freq: Grid step (Hz)
///     b_exp: Bandwidth coefficient (default 188.5)
#[pyfunction]
#[pyo3(signature = (frequencies, amplitudes, delta_freq, b_exp=EAS_B_EXP))]
pub fn ko98_smooth<'py>(
    py: Python<'py>,
    frequencies: PyReadonlyArray1<f64>,
    amplitudes: PyReadonlyArray1<f64>,
    delta_freq: f64,
    b_exp: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let freqs = frequencies.as_array().to_vec();
    let amps = amplitudes.as_array().to_vec();
    let smoothed = smoothing::ko98_smooth(&freqs, &amps, delta_freq, b_exp)?;
    Ok(PyArray1::from_vec(py, smoothed))
}

/// EAS of two horizontal spectra and its smoothed version
///
/// Returns:
///     Tuple (eas, smoothed_eas) as numpy arrays
#[pyfunction]
pub fn calculate_smoothed_eas<'py>(
    py: Python<'py>,
    frequencies: PyReadonlyArray1<f64>,
    h1: PyReadonlyArray1<f64>,
    h2: PyReadonlyArray1<f64>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let (eas, smoothed) = smoothing::calculate_smoothed_eas(
        &frequencies.as_array().to_vec(),
        &h1.as_array().to_vec(),
        &h2.as_array().to_vec(),
    )?;
    Ok((PyArray1::from_vec(py, eas), PyArray1::from_vec(py, smoothed)))
}
