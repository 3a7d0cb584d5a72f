//! Three-component ground-motion record and the operations applied to it
//!
//! A [`Timeseries`] owns four equally sampled arrays (time, h1, h2, v) plus
//! the metadata that travels with them. Every mutating operation computes its
//! new arrays first and only commits them when nothing failed, so an error
//! always leaves the record as it was. Each committed operation appends a
//! line to the history log.

pub mod units;

pub use units::{DataType, Orientation, Units, VerticalSign};

use crate::error::{ProcessingError, Result};
use crate::filters::{taper, TaperEdge};
use crate::signal::{self, rotation};
use crate::spectrum::{FasConfig, FasResult, SpectralAnalyzer};
use serde::Serialize;

/// Three-component seismogram with metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeseries {
    time: Vec<f64>,
    h1: Vec<f64>,
    h2: Vec<f64>,
    v: Vec<f64>,
    dt: f64,
    data_type: DataType,
    orientation: Orientation,
    station_name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    padding: usize,
    history: Vec<String>,
}

/// `0, dt, 2·dt, ...` with exactly `samples` points
pub(crate) fn time_axis(samples: usize, dt: f64) -> Vec<f64> {
    (0..samples).map(|i| i as f64 * dt).collect()
}

fn scaled(data: &[f64], window: &[f64]) -> Vec<f64> {
    data.iter().zip(window.iter()).map(|(x, w)| x * w).collect()
}

impl Timeseries {
    /// Build a record from its four arrays
    ///
    /// `dt` is taken from the first two time values. The data type follows
    /// from `units`. Orientation defaults to north, east, up.
    ///
    /// Components whose lengths differ from `time` are accepted with a
    /// warning. Such a record can be rotated, which truncates it, but
    /// resampling, tapering, cutting, padding and writing fail with
    /// `InvalidState` until it is aligned.
    pub fn new(time: Vec<f64>, h1: Vec<f64>, h2: Vec<f64>, v: Vec<f64>, units: Units) -> Result<Self> {
        if time.len() < 2 {
            return Err(ProcessingError::InvalidArgument(format!(
                "need at least two time samples to derive dt, got {}",
                time.len()
            )));
        }
        let dt = time[1] - time[0];
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ProcessingError::InvalidArgument(format!(
                "time samples must increase, got dt = {}",
                dt
            )));
        }
        if h1.len() != time.len() || h2.len() != time.len() || v.len() != time.len() {
            tracing::warn!(
                time = time.len(),
                h1 = h1.len(),
                h2 = h2.len(),
                v = v.len(),
                "component lengths differ"
            );
        }

        Ok(Self {
            time,
            h1,
            h2,
            v,
            dt,
            data_type: DataType::from_units(units),
            orientation: Orientation::default(),
            station_name: String::from("NoName"),
            latitude: None,
            longitude: None,
            padding: 0,
            history: Vec::new(),
        })
    }

    /// Build a record from a `[time, h1, h2, v]` bundle and a units string
    pub fn from_data(data: Vec<Vec<f64>>, units: Option<&str>) -> Result<Self> {
        let count = data.len();
        let Ok([time, h1, h2, v]) = <[Vec<f64>; 4]>::try_from(data) else {
            return Err(ProcessingError::InvalidArgument(format!(
                "data needs exactly 4 components, got {}",
                count
            )));
        };
        let units = units
            .ok_or_else(|| ProcessingError::InvalidArgument("units must be provided".into()))?
            .parse()?;
        Self::new(time, h1, h2, v, units)
    }

    pub fn with_station(mut self, station_name: impl Into<String>) -> Self {
        self.station_name = station_name.into();
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Replace the orientation
    ///
    /// Any orientation is accepted here; [`Timeseries::rotate`] is what
    /// enforces orthogonality.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn h1(&self) -> &[f64] {
        &self.h1
    }

    pub fn h2(&self) -> &[f64] {
        &self.h2
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn units(&self) -> Units {
        self.data_type.units()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Zeros appended by [`Timeseries::append_zeros`], in samples
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Transformations applied so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of time samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// `time`, `h1`, `h2` and `v` all have the same length
    pub fn is_aligned(&self) -> bool {
        let samples = self.time.len();
        self.h1.len() == samples && self.h2.len() == samples && self.v.len() == samples
    }

    /// `InvalidState` unless the four arrays share one length
    pub(crate) fn ensure_aligned(&self, operation: &str) -> Result<()> {
        if self.is_aligned() {
            return Ok(());
        }
        Err(ProcessingError::InvalidState(format!(
            "cannot {} a record with lengths time={} h1={} h2={} v={}",
            operation,
            self.time.len(),
            self.h1.len(),
            self.h2.len(),
            self.v.len()
        )))
    }

    pub(crate) fn set_padding(&mut self, padding: usize) {
        self.padding = padding;
    }

    pub(crate) fn record(&mut self, entry: String) {
        tracing::debug!(station = %self.station_name, "{}", entry);
        self.history.push(entry);
    }

    /// Integrate all components once: acceleration to velocity to displacement
    pub fn integrate(&mut self) -> Result<()> {
        let from = self.data_type;
        let to = from.integrated().ok_or_else(|| {
            ProcessingError::InvalidState("cannot integrate displacement timeseries".into())
        })?;

        self.h1 = signal::integrate(&self.h1, self.dt);
        self.h2 = signal::integrate(&self.h2, self.dt);
        self.v = signal::integrate(&self.v, self.dt);
        self.data_type = to;
        self.record(format!("Integrated timeseries {} --> {}", from, to));
        Ok(())
    }

    /// Differentiate all components once: displacement to velocity to acceleration
    pub fn differentiate(&mut self) -> Result<()> {
        let from = self.data_type;
        let to = from.differentiated().ok_or_else(|| {
            ProcessingError::InvalidState("cannot differentiate acceleration timeseries".into())
        })?;

        self.h1 = signal::differentiate(&self.h1, self.dt);
        self.h2 = signal::differentiate(&self.h2, self.dt);
        self.v = signal::differentiate(&self.v, self.dt);
        self.data_type = to;
        self.record(format!("Differentiated timeseries {} --> {}", from, to));
        Ok(())
    }

    /// Integrate or differentiate until the record holds `target`
    pub fn convert_to(&mut self, target: DataType) -> Result<()> {
        fn order(data_type: DataType) -> u8 {
            match data_type {
                DataType::Acceleration => 0,
                DataType::Velocity => 1,
                DataType::Displacement => 2,
            }
        }

        while self.data_type != target {
            if order(self.data_type) < order(target) {
                self.integrate()?;
            } else {
                self.differentiate()?;
            }
        }
        Ok(())
    }

    pub fn convert_to_acc(&mut self) -> Result<()> {
        self.convert_to(DataType::Acceleration)
    }

    pub fn convert_to_vel(&mut self) -> Result<()> {
        self.convert_to(DataType::Velocity)
    }

    pub fn convert_to_dis(&mut self) -> Result<()> {
        self.convert_to(DataType::Displacement)
    }

    /// Rotate the horizontals by `angle_deg` degrees
    ///
    /// `None`, 0 and 360 leave the record untouched. When the four arrays
    /// differ in length they are all cut to one less than the shortest.
    pub fn rotate(&mut self, angle_deg: Option<f64>) -> Result<()> {
        let Some(angle) = rotation::validate_angle(angle_deg)? else {
            return Ok(());
        };

        let lengths = [self.time.len(), self.h1.len(), self.h2.len(), self.v.len()];
        let shortest = lengths.iter().copied().min().unwrap_or(0);
        let keep = if lengths.iter().any(|&len| len != shortest) {
            let keep = shortest.saturating_sub(1);
            tracing::warn!(?lengths, keep, "component lengths differ, truncating before rotation");
            keep
        } else {
            shortest
        };

        let rotated = rotation::rotate_horizontals(
            &self.h1[..keep],
            &self.h2[..keep],
            self.orientation,
            angle,
        )?;

        self.time.truncate(keep);
        self.v.truncate(keep);
        self.h1 = rotated.h1;
        self.h2 = rotated.h2;
        self.orientation = rotated.orientation;
        self.record(format!("Rotated timeseries {:3.2} degrees", angle));
        Ok(())
    }

    /// Bring the record to a new sample interval
    ///
    /// With `fast` set and `new_dt` an integer multiple of `dt`, components
    /// are decimated; otherwise they are rebuilt by sinc interpolation over
    /// a dense matrix. Only use `fast` for downsampling.
    pub fn resample(&mut self, new_dt: f64, fast: bool) -> Result<()> {
        self.ensure_aligned("resample")?;
        let old_dt = self.dt;
        let Some(resampled) = signal::resample_components(
            &self.time,
            [self.h1.as_slice(), self.h2.as_slice(), self.v.as_slice()],
            old_dt,
            new_dt,
            fast,
        )?
        else {
            return Ok(());
        };

        self.time = resampled.time;
        self.h1 = resampled.h1;
        self.h2 = resampled.h2;
        self.v = resampled.v;
        self.dt = new_dt;
        self.record(format!(
            "Interpolated timeseries dt {:3.2} --> {:3.2}",
            old_dt, new_dt
        ));
        Ok(())
    }

    /// Multiply every component by an edge taper of half-width `m`
    pub fn apply_taper(&mut self, edge: TaperEdge, m: usize) -> Result<()> {
        self.ensure_aligned("taper")?;
        let window = taper(edge, m, self.h1.len());
        self.h1 = scaled(&self.h1, &window);
        self.h2 = scaled(&self.h2, &window);
        self.v = scaled(&self.v, &window);
        self.record(format!("Applied {} taper, m={}", edge, m));
        Ok(())
    }

    fn samples_for(&self, seconds: f64) -> Result<usize> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ProcessingError::InvalidArgument(format!(
                "duration must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        Ok((seconds / self.dt) as usize)
    }

    /// Drop `seconds` worth of samples from one edge, then taper that edge
    pub fn cut(&mut self, edge: TaperEdge, seconds: f64, m: usize) -> Result<()> {
        self.ensure_aligned("cut")?;
        if edge == TaperEdge::All {
            return Err(ProcessingError::InvalidArgument(
                "cut needs a single edge, front or end".into(),
            ));
        }
        let num = self.samples_for(seconds)?;
        if num >= self.h1.len() {
            return Err(ProcessingError::NumericDegenerate(format!(
                "cannot cut {} samples from a record of {}",
                num,
                self.h1.len()
            )));
        }
        if num == 0 {
            return Ok(());
        }

        let remaining = self.h1.len() - num;
        let window = taper(edge, m, remaining);
        let cut = |data: &[f64]| -> Vec<f64> {
            let kept = match edge {
                TaperEdge::Front => data.get(num..).unwrap_or(&[]),
                _ => &data[..data.len().saturating_sub(num)],
            };
            scaled(kept, &window)
        };

        self.h1 = cut(&self.h1);
        self.h2 = cut(&self.h2);
        self.v = cut(&self.v);
        self.time = time_axis(self.h1.len(), self.dt);
        self.record(format!("Cut {} samples from {}", num, edge));
        Ok(())
    }

    /// Taper one edge, then pad it with `seconds` worth of zeros
    ///
    /// `m == 0` skips the taper.
    pub fn append_zeros(&mut self, edge: TaperEdge, seconds: f64, m: usize) -> Result<()> {
        self.ensure_aligned("pad")?;
        if edge == TaperEdge::All {
            return Err(ProcessingError::InvalidArgument(
                "zeros can only be appended at the front or the end".into(),
            ));
        }
        let num = self.samples_for(seconds)?;

        let window = if m != 0 {
            taper(edge, m, self.h1.len())
        } else {
            vec![1.0; self.h1.len()]
        };
        let zeros = vec![0.0; num];
        let padded = |data: &[f64]| -> Vec<f64> {
            let tapered = scaled(data, &window);
            match edge {
                TaperEdge::Front => [zeros.as_slice(), &tapered].concat(),
                _ => [tapered.as_slice(), &zeros].concat(),
            }
        };

        self.h1 = padded(&self.h1);
        self.h2 = padded(&self.h2);
        self.v = padded(&self.v);
        self.time = time_axis(self.h1.len(), self.dt);
        self.padding += num;
        self.record(format!("Appended {} zeros at {}", num, edge));
        Ok(())
    }

    /// Fourier amplitude spectrum of all three components
    pub fn fas(&self, config: &FasConfig) -> Result<FasResult> {
        SpectralAnalyzer::new(config.clone())?.fas(self)
    }
}
