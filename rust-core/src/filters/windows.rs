//! Window functions for FIR design, spectral analysis and edge tapering

use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Shape parameter of the Kaiser window used for edge tapers
pub const TAPER_KAISER_BETA: f64 = 14.0;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Rectangular window (no windowing)
    #[default]
    Rectangular,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length == 1 {
        return vec![1.0];
    }

    let m = length as f64;
    let mut window = Vec::with_capacity(length);

    match window_type {
        WindowType::Hann => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                window.push(0.5 - 0.5 * angle.cos());
            }
        }

        WindowType::Hamming => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                window.push(0.54 - 0.46 * angle.cos());
            }
        }

        WindowType::Blackman => {
            for n in 0..length {
                let angle1 = 2.0 * PI * n as f64 / (m - 1.0);
                let angle2 = 4.0 * PI * n as f64 / (m - 1.0);
                window.push(0.42 - 0.5 * angle1.cos() + 0.08 * angle2.cos());
            }
        }

        WindowType::Rectangular => {
            window.resize(length, 1.0);
        }
    }

    window
}

/// Kaiser window of `length` samples
///
/// w[n] = I0(β·sqrt(1 - (2n/(M-1) - 1)²)) / I0(β)
pub fn kaiser_window(length: usize, beta: f64) -> Vec<f64> {
    if length == 0 {
        return Vec::new();
    }
    if length == 1 {
        return vec![1.0];
    }

    let half = (length - 1) as f64 / 2.0;
    let i0_beta = bessel_i0(beta);

    (0..length)
        .map(|n| {
            let x = (n as f64 - half) / half;
            let arg = beta * (1.0 - x * x).max(0.0).sqrt();
            bessel_i0(arg) / i0_beta
        })
        .collect()
}

/// Modified Bessel function of the first kind, order 0.
///
/// Power series Σ ((x/2)^k / k!)², summed until the terms stop contributing.
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..500 {
        let factor = half / k as f64;
        term *= factor * factor;
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}

/// Which edge(s) of a record a taper is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaperEdge {
    Front,
    End,
    All,
}

impl fmt::Display for TaperEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaperEdge::Front => f.write_str("front"),
            TaperEdge::End => f.write_str("end"),
            TaperEdge::All => f.write_str("all"),
        }
    }
}

impl FromStr for TaperEdge {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "front" => Ok(TaperEdge::Front),
            "end" => Ok(TaperEdge::End),
            "all" => Ok(TaperEdge::All),
            other => Err(ProcessingError::InvalidArgument(format!(
                "unknown taper edge '{}', expected front, end or all",
                other
            ))),
        }
    }
}

/// Build an edge taper of exactly `samples` points
///
/// A Kaiser window of 2m+1 points (β = 14) is split at its peak: the rising
/// half goes to the front, the falling half to the end, and the rest of the
/// record is filled with ones.
///
/// Short records cannot hold the requested half-width; the result is then
/// padded with a single trailing one, or replaced by an all-ones window of
/// the right length. The returned window always has `samples` points.
pub fn taper(edge: TaperEdge, m: usize, samples: usize) -> Vec<f64> {
    let kaiser = kaiser_window(2 * m + 1, TAPER_KAISER_BETA);

    let assembled = match edge {
        TaperEdge::Front => samples.checked_sub(m + 1).map(|ones| {
            let mut window = kaiser[..=m].to_vec();
            window.resize(m + 1 + ones, 1.0);
            window
        }),
        TaperEdge::End => samples.checked_sub(m + 1).map(|ones| {
            let mut window = vec![1.0; ones];
            window.extend_from_slice(&kaiser[m + 1..]);
            window
        }),
        TaperEdge::All => samples.checked_sub(2 * m + 1).map(|ones| {
            let mut window = kaiser[..=m].to_vec();
            window.resize(m + 1 + ones, 1.0);
            window.extend_from_slice(&kaiser[m + 1..]);
            window
        }),
    };

    let mut window = match assembled {
        Some(window) => window,
        None => {
            tracing::warn!(
                half_width = m,
                samples,
                "taper half-width does not fit in record, using all-ones window"
            );
            return vec![1.0; samples];
        }
    };

    if window.len() < samples {
        window.push(1.0);
    }

    if window.len() != samples {
        tracing::warn!(
            window_len = window.len(),
            samples,
            "taper and data lengths differ, using all-ones window"
        );
        window = vec![1.0; samples];
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 161;

        let hann = generate_window(WindowType::Hann, length);
        let hamming = generate_window(WindowType::Hamming, length);
        let blackman = generate_window(WindowType::Blackman, length);

        assert_eq!(hann.len(), length);
        assert_eq!(hamming.len(), length);
        assert_eq!(blackman.len(), length);

        // Symmetric about the center
        assert!((hann[0] - hann[length - 1]).abs() < 1e-10);
        assert!((hamming[0] - hamming[length - 1]).abs() < 1e-10);
        assert!((blackman[0] - blackman[length - 1]).abs() < 1e-10);

        let center = length / 2;
        assert!((hann[center] - 1.0).abs() < 1e-10);
        assert!((hamming[center] - 1.0).abs() < 1e-10);
        assert!((blackman[center] - 1.0).abs() < 1e-10);

        // Hamming should have non-zero endpoints (0.08)
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);
    }

    #[test]
    fn test_rectangular_window() {
        let window = generate_window(WindowType::Rectangular, 100);
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_bessel_i0_reference_values() {
        assert!((bessel_i0(0.0) - 1.0).abs() < 1e-15);
        assert!((bessel_i0(1.0) - 1.2660658777520082).abs() < 1e-12);
        let rel = (bessel_i0(14.0) - 129_418.562_700_648_6).abs() / 129_418.562_700_648_6;
        assert!(rel < 1e-9, "relative error {}", rel);
    }

    #[test]
    fn test_kaiser_window_shape() {
        let window = kaiser_window(21, TAPER_KAISER_BETA);
        assert_eq!(window.len(), 21);
        assert!((window[10] - 1.0).abs() < 1e-12);
        for i in 0..10 {
            assert!((window[i] - window[20 - i]).abs() < 1e-12);
            assert!(window[i] < window[i + 1]);
        }
        // β = 14 drives the endpoints to 1/I0(14)
        assert!(window[0] < 1e-5);

        assert_eq!(kaiser_window(1, 14.0), vec![1.0]);
        assert!(kaiser_window(0, 14.0).is_empty());
    }

    #[test]
    fn test_taper_front() {
        let window = taper(TaperEdge::Front, 10, 100);
        assert_eq!(window.len(), 100);
        assert!(window[0] < 1e-5);
        assert!((window[10] - 1.0).abs() < 1e-12);
        assert!(window[11..].iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_taper_end_pads_trailing_one() {
        // Ones + falling half only covers samples-1 points; the last point is padded with 1
        let window = taper(TaperEdge::End, 10, 100);
        assert_eq!(window.len(), 100);
        assert!(window[..89].iter().all(|&w| w == 1.0));
        assert!(window[89] < 1.0);
        assert!(window[98] < 1e-5);
        assert_eq!(window[99], 1.0);
    }

    #[test]
    fn test_taper_all() {
        let window = taper(TaperEdge::All, 5, 50);
        assert_eq!(window.len(), 50);
        assert!(window[0] < 1e-5);
        assert!(window[49] < 1e-5);
        assert!(window[6..44].iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_taper_zero_half_width() {
        let window = taper(TaperEdge::Front, 0, 10);
        assert_eq!(window, vec![1.0; 10]);
    }

    #[test]
    fn test_taper_length_mismatch_recovers() {
        // Half-width larger than the record: all-ones of the requested length
        let window = taper(TaperEdge::All, 20, 30);
        assert_eq!(window, vec![1.0; 30]);

        let window = taper(TaperEdge::Front, 50, 10);
        assert_eq!(window, vec![1.0; 10]);

        let window = taper(TaperEdge::End, 9, 10);
        assert_eq!(window.len(), 10);

        assert!(taper(TaperEdge::End, 3, 0).is_empty());
    }

    #[test]
    fn test_taper_edge_parse() {
        assert_eq!("front".parse::<TaperEdge>().unwrap(), TaperEdge::Front);
        assert_eq!("END".parse::<TaperEdge>().unwrap(), TaperEdge::End);
        assert_eq!("all".parse::<TaperEdge>().unwrap(), TaperEdge::All);
        assert!("middle".parse::<TaperEdge>().is_err());
        assert_eq!(TaperEdge::End.to_string(), "end");
    }
}
