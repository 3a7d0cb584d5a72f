//! Sample-interval changes: integer decimation and sinc reconstruction

use crate::error::{ProcessingError, Result};
use crate::filters::{decimation_filter, FastFirFilter};
use ndarray::{Array1, Array2};
use std::f64::consts::PI;

/// Block size for the overlap-add anti-aliasing filter
const DECIMATION_BLOCK_SIZE: usize = 4096;

/// How a record will be brought to the new sample interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplePath {
    /// Anti-aliased integer downsampling by the given factor
    Decimate(usize),
    /// Dense sinc reconstruction onto the new time grid
    Sinc,
}

/// Pick the resampling path, `None` when `new_dt` already equals `dt`
///
/// The decimation path is only taken when the caller asks for it and
/// `new_dt` is an exact multiple of `dt`.
pub fn select_path(dt: f64, new_dt: f64, fast: bool) -> Result<Option<ResamplePath>> {
    if new_dt == dt {
        return Ok(None);
    }
    if !new_dt.is_finite() || new_dt <= 0.0 {
        return Err(ProcessingError::InvalidArgument(format!(
            "new sample interval must be positive, got {}",
            new_dt
        )));
    }

    if fast && new_dt % dt == 0.0 {
        let factor = (new_dt / dt).floor() as usize;
        if factor >= 2 {
            return Ok(Some(ResamplePath::Decimate(factor)));
        }
    }
    Ok(Some(ResamplePath::Sinc))
}

/// Normalized sinc: sin(πx)/(πx), 1 at the origin
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Zero-phase lowpass filter then keep every `factor`-th sample
///
/// Output length is `ceil(len/factor)`. Only meaningful for integer
/// downsampling.
pub fn decimate(data: &[f64], factor: usize) -> Vec<f64> {
    if factor <= 1 {
        return data.to_vec();
    }

    let mut filter = FastFirFilter::new(decimation_filter(factor), DECIMATION_BLOCK_SIZE);
    filter
        .filter_zero_phase(data)
        .into_iter()
        .step_by(factor)
        .collect()
}

/// New time grid `0, new_dt, 2·new_dt, ...` covering `samples·old_dt` seconds
pub fn sinc_time_axis(samples: usize, old_dt: f64, new_dt: f64) -> Vec<f64> {
    let count = ((samples as f64 * old_dt) / new_dt).ceil().max(0.0) as usize;
    (0..count).map(|i| i as f64 * new_dt).collect()
}

/// Dense `old × new` matrix of `sinc((t_new - t_old)/old_dt)`
///
/// Memory is O(N·M); nothing is chunked.
pub fn sinc_matrix(old_times: &[f64], new_times: &[f64], old_dt: f64) -> Array2<f64> {
    Array2::from_shape_fn((old_times.len(), new_times.len()), |(i, j)| {
        sinc((new_times[j] - old_times[i]) / old_dt)
    })
}

/// Project one component onto the new grid through a sinc matrix
pub fn sinc_project(data: &[f64], matrix: &Array2<f64>) -> Result<Vec<f64>> {
    if data.len() != matrix.nrows() {
        return Err(ProcessingError::InvalidState(format!(
            "component has {} samples but the time axis has {}",
            data.len(),
            matrix.nrows()
        )));
    }
    Ok(Array1::from(data.to_vec()).dot(matrix).to_vec())
}

/// A record brought to a new sample interval
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub time: Vec<f64>,
    pub h1: Vec<f64>,
    pub h2: Vec<f64>,
    pub v: Vec<f64>,
}

/// Resample the three components of a record
///
/// Returns `None` when nothing needs to change. The time axis of the result
/// always starts at zero and steps by `new_dt`.
pub fn resample_components(
    time: &[f64],
    components: [&[f64]; 3],
    dt: f64,
    new_dt: f64,
    fast: bool,
) -> Result<Option<Resampled>> {
    let Some(path) = select_path(dt, new_dt, fast)? else {
        return Ok(None);
    };

    let [h1, h2, v] = components;
    let resampled = match path {
        ResamplePath::Decimate(factor) => {
            tracing::debug!(factor, "decimating record");
            let h1 = decimate(h1, factor);
            let h2 = decimate(h2, factor);
            let v = decimate(v, factor);
            let time = (0..h1.len()).map(|i| i as f64 * new_dt).collect();
            Resampled { time, h1, h2, v }
        }
        ResamplePath::Sinc => {
            let new_time = sinc_time_axis(time.len(), dt, new_dt);
            tracing::debug!(
                rows = time.len(),
                columns = new_time.len(),
                "building sinc interpolation matrix"
            );
            let matrix = sinc_matrix(time, &new_time, dt);
            Resampled {
                h1: sinc_project(h1, &matrix)?,
                h2: sinc_project(h2, &matrix)?,
                v: sinc_project(v, &matrix)?,
                time: new_time,
            }
        }
    };

    Ok(Some(resampled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_axis(samples: usize, dt: f64) -> Vec<f64> {
        (0..samples).map(|i| i as f64 * dt).collect()
    }

    #[test]
    fn test_select_path() {
        assert_eq!(select_path(0.01, 0.01, true).unwrap(), None);
        assert_eq!(select_path(0.01, 0.02, true).unwrap(), Some(ResamplePath::Decimate(2)));
        assert_eq!(select_path(0.01, 0.02, false).unwrap(), Some(ResamplePath::Sinc));
        assert_eq!(select_path(0.02, 0.01, true).unwrap(), Some(ResamplePath::Sinc));
        assert_eq!(select_path(0.01, 0.025, true).unwrap(), Some(ResamplePath::Sinc));
        assert!(matches!(
            select_path(0.01, -0.02, false),
            Err(ProcessingError::InvalidArgument(_))
        ));
        assert!(select_path(0.01, f64::NAN, false).is_err());
    }

    #[test]
    fn test_sinc_values() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-15);
        assert!(sinc(-3.0).abs() < 1e-15);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-15);
    }

    #[test]
    fn test_sinc_time_axis_matches_arange() {
        let axis = sinc_time_axis(10, 0.1, 0.25);
        // arange(0, 1.0, 0.25) -> 4 points
        assert_eq!(axis, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(sinc_time_axis(100, 0.01, 0.005).len(), 200);
    }

    #[test]
    fn test_sinc_identity_grid() {
        let old = time_axis(16, 0.1);
        let matrix = sinc_matrix(&old, &old, 0.1);
        let data: Vec<f64> = (0..16).map(|i| (i as f64).cos()).collect();
        let projected = sinc_project(&data, &matrix).unwrap();
        for (a, b) in data.iter().zip(projected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sinc_upsample_keeps_original_samples() {
        let dt = 0.02;
        let old = time_axis(50, dt);
        let data: Vec<f64> = old.iter().map(|t| (2.0 * PI * 1.5 * t).sin()).collect();

        let new_time = sinc_time_axis(old.len(), dt, dt / 2.0);
        assert_eq!(new_time.len(), 100);
        let matrix = sinc_matrix(&old, &new_time, dt);
        let projected = sinc_project(&data, &matrix).unwrap();

        // Every other new point lands on an old sample
        for i in 0..50 {
            assert!((projected[2 * i] - data[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sinc_project_shape_mismatch() {
        let old = time_axis(4, 0.1);
        let matrix = sinc_matrix(&old, &old, 0.1);
        assert!(matches!(
            sinc_project(&[1.0, 2.0], &matrix),
            Err(ProcessingError::InvalidState(_))
        ));
    }

    #[test]
    fn test_decimate_length_and_level() {
        let data = vec![2.0; 1001];
        let output = decimate(&data, 4);
        assert_eq!(output.len(), 251);
        // Away from the zero-padded edges a constant passes unchanged
        for &y in &output[40..210] {
            assert!((y - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decimate_removes_aliasing_tone() {
        // 0.45 cycles/sample would alias after decimation by 4
        let data: Vec<f64> = (0..2000).map(|n| (2.0 * PI * 0.45 * n as f64).sin()).collect();
        let output = decimate(&data, 4);
        let interior_peak = output[100..400].iter().fold(0.0_f64, |acc, &y| acc.max(y.abs()));
        assert!(interior_peak < 0.01, "residual {}", interior_peak);
    }

    #[test]
    fn test_resample_components_paths() {
        let dt = 0.01;
        let time = time_axis(200, dt);
        let h1 = vec![1.0; 200];
        let h2 = vec![0.5; 200];
        let v = vec![0.0; 200];

        assert!(resample_components(&time, [h1.as_slice(), h2.as_slice(), v.as_slice()], dt, dt, false)
            .unwrap()
            .is_none());

        let fast = resample_components(&time, [h1.as_slice(), h2.as_slice(), v.as_slice()], dt, 0.02, true)
            .unwrap()
            .unwrap();
        assert_eq!(fast.h1.len(), 100);
        assert_eq!(fast.time.len(), 100);
        assert!((fast.time[1] - 0.02).abs() < 1e-15);

        let general = resample_components(&time, [h1.as_slice(), h2.as_slice(), v.as_slice()], dt, 0.02, false)
            .unwrap()
            .unwrap();
        assert_eq!(general.time.len(), 100);
        assert_eq!(general.h1.len(), 100);
        assert_eq!(general.v, vec![0.0; 100]);
    }
}
