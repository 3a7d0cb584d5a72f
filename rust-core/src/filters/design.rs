//! Lowpass FIR design using the windowing method
//!
//! Used for the anti-aliasing stage of integer decimation.

use super::windows::{generate_window, WindowType};
use std::f64::consts::PI;

/// Taps per unit of decimation factor for the anti-aliasing filter
pub const DECIMATION_TAPS_PER_FACTOR: usize = 30;

/// Design a lowpass FIR filter of `num_taps` coefficients
///
/// # Arguments
/// * `cutoff` - Cutoff frequency (normalized, units of π rad/sample, 1.0 = Nyquist)
/// * `num_taps` - Filter length M (odd lengths give a Type I linear-phase filter)
/// * `window_type` - Window applied to the ideal sinc response
///
/// # Returns
/// Coefficients h[n] for n = 0..M-1, scaled to unit DC gain
pub fn design_lowpass_fir(cutoff: f64, num_taps: usize, window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, num_taps);
    let wc_rad = cutoff * PI;

    let center = num_taps.saturating_sub(1) as f64 / 2.0;
    let mut h: Vec<f64> = (0..num_taps)
        .map(|n| {
            let n_shifted = n as f64 - center;
            let h_ideal = if n_shifted.abs() < 1e-10 {
                wc_rad / PI
            } else {
                (wc_rad * n_shifted).sin() / (PI * n_shifted)
            };
            h_ideal * window[n]
        })
        .collect();

    let dc_gain: f64 = h.iter().sum();
    if dc_gain.abs() > f64::EPSILON {
        for coeff in h.iter_mut() {
            *coeff /= dc_gain;
        }
    }

    h
}

/// Anti-aliasing filter for decimation by `factor`
///
/// Hamming-windowed lowpass of `30·factor + 1` taps with cutoff at the new
/// Nyquist frequency (1/factor).
pub fn decimation_filter(factor: usize) -> Vec<f64> {
    let factor = factor.max(1);
    design_lowpass_fir(
        1.0 / factor as f64,
        DECIMATION_TAPS_PER_FACTOR * factor + 1,
        WindowType::Hamming,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    /// |H(e^jω)| at normalized frequencies (units of π)
    fn magnitude_response(h: &[f64], frequencies: &[f64]) -> Vec<f64> {
        frequencies
            .iter()
            .map(|&omega| {
                let omega_rad = omega * PI;
                h.iter()
                    .enumerate()
                    .fold(Complex64::new(0.0, 0.0), |acc, (n, &h_n)| {
                        let phase = -(omega_rad * n as f64);
                        acc + h_n * Complex64::new(phase.cos(), phase.sin())
                    })
                    .norm()
            })
            .collect()
    }

    #[test]
    fn test_lowpass_design() {
        let h = design_lowpass_fir(0.5, 61, WindowType::Hamming);
        assert_eq!(h.len(), 61);

        for i in 0..h.len() / 2 {
            assert!((h[i] - h[h.len() - 1 - i]).abs() < 1e-12);
        }

        let sum: f64 = h.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decimation_filter_response() {
        let h = decimation_filter(4);
        assert_eq!(h.len(), 121);

        let response = magnitude_response(&h, &[0.0, 0.05, 0.5, 0.8]);
        assert!((response[0] - 1.0).abs() < 1e-9);
        assert!((response[1] - 1.0).abs() < 0.01);
        // Stopband above the new Nyquist (0.25)
        assert!(response[2] < 0.01);
        assert!(response[3] < 0.01);
    }

    #[test]
    fn test_single_tap_filter() {
        let h = decimation_filter(0);
        assert_eq!(h.len(), 31);
        let h = design_lowpass_fir(1.0, 1, WindowType::Hamming);
        assert_eq!(h, vec![1.0]);
    }
}
