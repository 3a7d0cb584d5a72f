//! Konno-Ohmachi spectral smoothing and the effective amplitude spectrum
//!
//! Konno & Ohmachi (1998), BSSA 88-1, pp. 228-241. The kernel around a
//! centre frequency `fc` is `(sin(b·log10(f/fc)) / (b·log10(f/fc)))^4`, so
//! the window has constant width on a log-frequency axis.

use super::analysis::{AmplitudeSpectrum, FasResult};
use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};

/// Bandwidth coefficient used for the EAS
pub const EAS_B_EXP: f64 = 188.5;

/// Kernel weight of frequency `f` around centre `fc`
fn ko_weight(b_exp: f64, f: f64, fc: f64) -> f64 {
    let x = b_exp * (f / fc).log10();
    if x == 0.0 {
        1.0
    } else {
        (x.sin() / x).powi(4)
    }
}

/// Smooth `amplitudes` with the Konno-Ohmachi kernel
///
/// For each index the kernel is summed over the bins between
/// `freq / 10^(2.5/b)` and `freq · 10^(2.5/b)`, with index bounds taken
/// from `delta_freq`. The first point and zero frequencies are copied
/// through. A zero frequency inside a window also copies that point
/// through unsmoothed.
pub fn ko98_smooth(frequencies: &[f64], amplitudes: &[f64], delta_freq: f64, b_exp: f64) -> Result<Vec<f64>> {
    let n = frequencies.len();
    if amplitudes.len() != n {
        return Err(ProcessingError::InvalidArgument(format!(
            "{} frequencies but {} amplitudes",
            n,
            amplitudes.len()
        )));
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    if !delta_freq.is_finite() || delta_freq <= 0.0 {
        return Err(ProcessingError::NumericDegenerate(format!(
            "frequency step must be positive, got {}",
            delta_freq
        )));
    }

    let fratio = 10f64.powf(2.5 / b_exp);
    let mut smoothed = vec![0.0; n];
    smoothed[0] = amplitudes[0];

    for index in 1..n {
        let freq = frequencies[index];
        if freq == 0.0 {
            smoothed[index] = amplitudes[index];
            continue;
        }

        let mut index1 = (freq / fratio / delta_freq) as usize;
        let index2 = ((freq * fratio / delta_freq + 1.0) as usize).min(n);
        if index1 <= 1 {
            index1 = 0;
        }
        if index1 >= index2 {
            continue;
        }

        let window = &frequencies[index1..index2];
        if window
            .iter()
            .enumerate()
            .any(|(offset, &f)| f == 0.0 && index1 + offset != index)
        {
            smoothed[index] = amplitudes[index];
            continue;
        }

        let (weighted, total) = (index1..index2).fold((0.0, 0.0), |(a1, a2), j| {
            let w = if j == index {
                1.0
            } else {
                ko_weight(b_exp, frequencies[j], freq)
            };
            (a1 + w * amplitudes[j], a2 + w)
        });
        smoothed[index] = weighted / total;
    }

    Ok(smoothed)
}

/// Konno-Ohmachi smoother with a fixed bandwidth coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KonnoOhmachiSmoother {
    pub b_exp: f64,
}

impl Default for KonnoOhmachiSmoother {
    fn default() -> Self {
        Self { b_exp: EAS_B_EXP }
    }
}

impl KonnoOhmachiSmoother {
    pub fn new(b_exp: f64) -> Self {
        Self { b_exp }
    }

    /// Smooth a spectrum, taking the frequency step from its first two bins
    pub fn smooth(&self, spectrum: &AmplitudeSpectrum) -> Result<Vec<f64>> {
        let delta_freq = frequency_step(&spectrum.frequencies)?;
        ko98_smooth(&spectrum.frequencies, &spectrum.amplitudes, delta_freq, self.b_exp)
    }
}

fn frequency_step(frequencies: &[f64]) -> Result<f64> {
    match frequencies {
        [first, second, ..] => Ok(second - first),
        _ => Err(ProcessingError::NumericDegenerate(format!(
            "need at least two frequencies to derive the step, got {}",
            frequencies.len()
        ))),
    }
}

/// Root-mean-square of two horizontal spectra and its smoothed version
///
/// Smoothing always uses `b = 188.5`.
pub fn calculate_smoothed_eas(frequencies: &[f64], h1: &[f64], h2: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if h1.len() != frequencies.len() || h2.len() != frequencies.len() {
        return Err(ProcessingError::InvalidArgument(format!(
            "spectra lengths differ: {} frequencies, {} and {} amplitudes",
            frequencies.len(),
            h1.len(),
            h2.len()
        )));
    }

    let eas: Vec<f64> = h1
        .iter()
        .zip(h2.iter())
        .map(|(a, b)| (0.5 * (a * a + b * b)).sqrt())
        .collect();
    let smoothed = ko98_smooth(frequencies, &eas, frequency_step(frequencies)?, EAS_B_EXP)?;
    Ok((eas, smoothed))
}

/// EAS record derived from two horizontal spectra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedEas {
    pub frequencies: Vec<f64>,
    pub fas_h1: Vec<f64>,
    pub fas_h2: Vec<f64>,
    pub eas: Vec<f64>,
    pub smoothed_eas: Vec<f64>,
}

impl SmoothedEas {
    /// EAS from the two horizontals of one FAS result
    pub fn from_fas(fas: &FasResult) -> Result<Self> {
        let (eas, smoothed_eas) = calculate_smoothed_eas(&fas.frequencies, &fas.fas_h1, &fas.fas_h2)?;
        Ok(Self {
            frequencies: fas.frequencies.clone(),
            fas_h1: fas.fas_h1.clone(),
            fas_h2: fas.fas_h2.clone(),
            eas,
            smoothed_eas,
        })
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// EAS from two independently computed spectra sharing a frequency grid
pub fn smoothed_eas(h1: &AmplitudeSpectrum, h2: &AmplitudeSpectrum) -> Result<SmoothedEas> {
    if h1.frequencies != h2.frequencies {
        return Err(ProcessingError::InvalidArgument(
            "horizontal spectra must share the same frequency grid".into(),
        ));
    }

    let (eas, smoothed_eas) = calculate_smoothed_eas(&h1.frequencies, &h1.amplitudes, &h2.amplitudes)?;
    Ok(SmoothedEas {
        frequencies: h1.frequencies.clone(),
        fas_h1: h1.amplitudes.clone(),
        fas_h2: h2.amplitudes.clone(),
        eas,
        smoothed_eas,
    })
}
