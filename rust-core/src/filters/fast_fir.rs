//! FFT-based fast convolution for long FIR filters
//!
//! Implements overlap-add method with frequency-domain multiplication
//! Complexity: O(N log N) vs O(N*M) for time-domain

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT-based FIR filter for long impulse responses
/// Uses overlap-add with FFT convolution: O(N log N) instead of O(N*M)
pub struct FastFirFilter {
    /// Filter coefficients in frequency domain
    h_fft: Vec<Complex<f64>>,

    /// FFT size (power of 2, >= block_size + filter_length - 1)
    fft_size: usize,

    /// Block size for input
    block_size: usize,

    /// Filter length
    filter_length: usize,

    /// Tail of the running convolution not yet emitted
    overlap: Vec<f64>,

    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,

    /// Reusable buffer
    buffer: Vec<Complex<f64>>,
}

impl FastFirFilter {
    /// Create new FFT-based filter
    ///
    /// # Arguments
    /// * `coefficients` - Filter coefficients h[n] (at least one)
    /// * `block_size` - Input block size (e.g., 1024)
    pub fn new(coefficients: Vec<f64>, block_size: usize) -> Self {
        let filter_length = coefficients.len().max(1);
        let block_size = block_size.max(1);

        let fft_size = (block_size + filter_length - 1).next_power_of_two();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let ifft = planner.plan_fft_inverse(fft_size);

        // Transform filter coefficients to frequency domain
        let mut h_fft = vec![Complex::new(0.0, 0.0); fft_size];
        for (slot, &coeff) in h_fft.iter_mut().zip(coefficients.iter()) {
            *slot = Complex::new(coeff, 0.0);
        }
        fft.process(&mut h_fft);

        Self {
            h_fft,
            fft_size,
            block_size,
            filter_length,
            overlap: vec![0.0; filter_length - 1],
            fft,
            ifft,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    /// Process block using FFT-based overlap-add
    ///
    /// Input longer than `block_size` is truncated to `block_size`.
    /// Returns the causal filter output, same length as the (truncated) input.
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        let n = input.len().min(self.block_size);

        for (slot, &x) in self.buffer.iter_mut().zip(input[..n].iter()) {
            *slot = Complex::new(x, 0.0);
        }
        self.buffer[n..].fill(Complex::new(0.0, 0.0));

        self.fft.process(&mut self.buffer);
        for (x, h) in self.buffer.iter_mut().zip(self.h_fft.iter()) {
            *x = *x * *h;
        }
        self.ifft.process(&mut self.buffer);

        let scale = 1.0 / self.fft_size as f64;
        let tail_len = self.filter_length - 1;

        let output: Vec<f64> = (0..n)
            .map(|i| {
                let carried = self.overlap.get(i).copied().unwrap_or(0.0);
                self.buffer[i].re * scale + carried
            })
            .collect();

        // The convolution tail of this block plus any older tail not yet emitted
        let next_overlap: Vec<f64> = (0..tail_len)
            .map(|i| {
                let carried = self.overlap.get(n + i).copied().unwrap_or(0.0);
                self.buffer[n + i].re * scale + carried
            })
            .collect();
        self.overlap = next_overlap;

        output
    }

    /// Filter a whole record without phase shift
    ///
    /// Runs the record through the filter block by block, flushes the tail
    /// with zeros, and drops the first `(M-1)/2` outputs so output sample `i`
    /// is centered on input sample `i`. The record is treated as zero outside
    /// its bounds. Filter state is reset before and after.
    pub fn filter_zero_phase(&mut self, input: &[f64]) -> Vec<f64> {
        self.reset();
        let delay = (self.filter_length - 1) / 2;

        let mut full = Vec::with_capacity(input.len() + delay);
        for block in input.chunks(self.block_size) {
            full.extend(self.process_block(block));
        }
        let flush = vec![0.0; delay];
        for block in flush.chunks(self.block_size) {
            full.extend(self.process_block(block));
        }
        self.reset();

        full.drain(..delay.min(full.len()));
        full.truncate(input.len());
        full
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.overlap.fill(0.0);
    }

    /// Get filter length
    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    /// Get block size
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}
