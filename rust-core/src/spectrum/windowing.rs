//! Windowing applied to a record before its FFT

use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal; the rectangular window returns the input unchanged
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    if window_type == WindowType::Rectangular || signal.is_empty() {
        return signal.to_vec();
    }

    let window = generate_window(window_type, signal.len());
    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}
