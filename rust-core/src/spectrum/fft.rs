//! FFT engine using realfft for real-valued records

use crate::error::{ProcessingError, Result};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of points, at least 1)
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size == 0 {
            return Err(ProcessingError::InvalidArgument(
                "FFT size must be at least 1".into(),
            ));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Ok(Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        })
    }

    /// Magnitude of the one-sided spectrum, bins `0..=fft_size/2`
    ///
    /// Signals shorter than the FFT size are zero-padded, longer ones are
    /// truncated.
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| ProcessingError::NumericDegenerate(format!("FFT failed: {}", e)))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    /// Magnitude of all `fft_size` bins
    ///
    /// Bins above Nyquist mirror the one-sided half, since |X[N-k]| = |X[k]|
    /// for real input.
    pub fn full_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let half = self.compute_magnitude(signal)?;
        let mut full = Vec::with_capacity(self.fft_size);
        full.extend_from_slice(&half);
        for k in half.len()..self.fft_size {
            full.push(half[self.fft_size - k]);
        }
        Ok(full)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}
