//! Sample-array operations: integration, differentiation and boxcar smoothing

use crate::error::{ProcessingError, Result};

/// Cumulative trapezoidal integral of `data` sampled at `dt`
///
/// Output has the input's length. Every sample carries an extra offset of
/// `data[0]*dt/2`, so the first output is `data[0]*dt/2` rather than zero.
pub fn integrate(data: &[f64], dt: f64) -> Vec<f64> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };
    let offset = first * dt / 2.0;

    let mut output = Vec::with_capacity(data.len());
    let mut running = 0.0;
    output.push(offset);
    for pair in data.windows(2) {
        running += (pair[0] + pair[1]) * dt / 2.0;
        output.push(running + offset);
    }
    output
}

/// First difference of `data` divided by `dt`
///
/// A zero is assumed before the first sample, so `output[0] = data[0]/dt`
/// and the output has the input's length.
pub fn differentiate(data: &[f64], dt: f64) -> Vec<f64> {
    let mut previous = 0.0;
    data.iter()
        .map(|&x| {
            let slope = (x - previous) / dt;
            previous = x;
            slope
        })
        .collect()
}

/// Three-point smoothing in place, weights `{c, 0.5, c}` with `c = 0.5/(factor-1)`
///
/// Points are updated in order, so each point sees its already-smoothed left
/// neighbour. Endpoints are left untouched. The weights only sum to one for
/// `factor == 3`; other factors scale the interior.
pub fn smooth(data: &mut [f64], factor: usize) -> Result<()> {
    if factor < 2 {
        return Err(ProcessingError::NumericDegenerate(format!(
            "smoothing factor must be at least 2, got {}",
            factor
        )));
    }

    let c = 0.5 / (factor - 1) as f64;
    for i in 1..data.len().saturating_sub(1) {
        data[i] = 0.5 * data[i] + c * data[i - 1] + c * data[i + 1];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_constant() {
        let data = vec![1.0; 5];
        let output = integrate(&data, 0.01);

        let expected = [0.005, 0.015, 0.025, 0.035, 0.045];
        assert_eq!(output.len(), 5);
        for (y, e) in output.iter().zip(expected.iter()) {
            assert!((y - e).abs() < 1e-15);
        }
    }

    #[test]
    fn test_integrate_ramp() {
        // ∫ t dt with t = [0, 1, 2, 3] and dt = 1 -> [0, 0.5, 2, 4.5]
        let output = integrate(&[0.0, 1.0, 2.0, 3.0], 1.0);
        assert_eq!(output, vec![0.0, 0.5, 2.0, 4.5]);
    }

    #[test]
    fn test_integrate_empty() {
        assert!(integrate(&[], 0.1).is_empty());
    }

    #[test]
    fn test_differentiate() {
        let output = differentiate(&[2.0, 4.0, 4.0, 1.0], 0.5);
        assert_eq!(output, vec![4.0, 4.0, 0.0, -6.0]);
    }

    #[test]
    fn test_integrate_then_differentiate_averages_neighbours() {
        let data: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin()).collect();
        let dt = 0.02;
        let recovered = differentiate(&integrate(&data, dt), dt);

        assert!((recovered[0] - data[0] / 2.0).abs() < 1e-12);
        for i in 1..data.len() {
            let midpoint = (data[i - 1] + data[i]) / 2.0;
            assert!((recovered[i] - midpoint).abs() < 1e-9);
        }
    }

    #[test]
    fn test_smooth_factor_three() {
        let mut data = vec![0.0, 4.0, 0.0, 4.0];
        smooth(&mut data, 3).unwrap();

        // data[1] = 0.5*4 + 0.25*0 + 0.25*0 = 2
        // data[2] = 0.5*0 + 0.25*2 + 0.25*4 = 1.5 (uses the smoothed data[1])
        assert_eq!(data, vec![0.0, 2.0, 1.5, 4.0]);
    }

    #[test]
    fn test_smooth_preserves_constant() {
        let mut data = vec![7.0; 10];
        smooth(&mut data, 3).unwrap();
        assert!(data.iter().all(|&x| (x - 7.0).abs() < 1e-12));
    }

    #[test]
    fn test_smooth_short_and_invalid() {
        let mut short = vec![1.0, 2.0];
        smooth(&mut short, 3).unwrap();
        assert_eq!(short, vec![1.0, 2.0]);

        let mut data = vec![1.0; 4];
        assert!(matches!(smooth(&mut data, 1), Err(ProcessingError::NumericDegenerate(_))));
    }
}
