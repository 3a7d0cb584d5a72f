//! Python bindings for the Timeseries record

use super::spectrum_bindings::PyWindowType;
use crate::filters::TaperEdge;
use crate::io::{load_bbp, save_bbp, BbpWriteOptions};
use crate::spectrum::FasConfig;
use crate::timeseries::{DataType, Orientation, Timeseries, Units};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

/// Three-component seismogram exposed to Python
#[pyclass(name = "Timeseries")]
#[derive(Clone)]
pub struct PyTimeseries {
    inner: Timeseries,
}

#[pymethods]
impl PyTimeseries {
    /// Create a record from numpy arrays
    ///
    /// Args:
    ///     time, h1, h2, v: Sample arrays
    ///     units: "cm", "cm/s" or "cm/s/s"
    ///     station_name: Station identifier
    ///     orientation: Tuple (azimuth_h1, azimuth_h2, "up" | "down")
    ///     latitude, longitude: Station location
    #[new]
    #[pyo3(signature = (time, h1, h2, v, units, station_name="NoName", orientation=None, latitude=None, longitude=None))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        time: PyReadonlyArray1<f64>,
        h1: PyReadonlyArray1<f64>,
        h2: PyReadonlyArray1<f64>,
        v: PyReadonlyArray1<f64>,
        units: &str,
        station_name: &str,
        orientation: Option<(f64, f64, String)>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> PyResult<Self> {
        let units: Units = units.parse()?;
        let mut inner = Timeseries::new(
            time.as_array().to_vec(),
            h1.as_array().to_vec(),
            h2.as_array().to_vec(),
            v.as_array().to_vec(),
            units,
        )?
        .with_station(station_name);

        if let Some((az1, az2, vertical)) = orientation {
            inner = inner.with_orientation(Orientation::new(az1, az2, vertical.parse()?));
        }
        if let (Some(lat), Some(lon)) = (latitude, longitude) {
            inner = inner.with_location(lat, lon);
        }
        Ok(Self { inner })
    }

    /// Read a BBP file
    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        Ok(Self {
            inner: load_bbp(path)?,
        })
    }

    /// Write a BBP file
    #[pyo3(signature = (path, long_headers=false, write_history=false))]
    fn save(&self, path: &str, long_headers: bool, write_history: bool) -> PyResult<()> {
        let options = BbpWriteOptions {
            long_headers,
            write_history,
        };
        save_bbp(&self.inner, path, options)?;
        Ok(())
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn integrate(&mut self) -> PyResult<()> {
        Ok(self.inner.integrate()?)
    }

    fn differentiate(&mut self) -> PyResult<()> {
        Ok(self.inner.differentiate()?)
    }

    /// Integrate or differentiate to "acc", "vel" or "dis"
    fn convert_to(&mut self, data_type: &str) -> PyResult<()> {
        let target: DataType = data_type.parse()?;
        Ok(self.inner.convert_to(target)?)
    }

    fn convert_to_acc(&mut self) -> PyResult<()> {
        Ok(self.inner.convert_to_acc()?)
    }

    fn convert_to_vel(&mut self) -> PyResult<()> {
        Ok(self.inner.convert_to_vel()?)
    }

    fn convert_to_dis(&mut self) -> PyResult<()> {
        Ok(self.inner.convert_to_dis()?)
    }

    /// Rotate the horizontals by `angle` degrees (0 to 360)
    #[pyo3(signature = (angle=None))]
    fn rotate(&mut self, angle: Option<f64>) -> PyResult<()> {
        Ok(self.inner.rotate(angle)?)
    }

    /// Change the sample interval
    ///
    /// Args:
    ///     new_dt: New sample interval (s)
    ///     fast: Decimate when new_dt is an integer multiple of dt
    #[pyo3(signature = (new_dt, fast=false))]
    fn resample(&mut self, new_dt: f64, fast: bool) -> PyResult<()> {
        Ok(self.inner.resample(new_dt, fast)?)
    }

    /// Apply a Kaiser edge taper ("front", "end" or "all")
    fn taper(&mut self, edge: &str, m: usize) -> PyResult<()> {
        let edge: TaperEdge = edge.parse()?;
        Ok(self.inner.apply_taper(edge, m)?)
    }

    fn cut(&mut self, edge: &str, seconds: f64, m: usize) -> PyResult<()> {
        let edge: TaperEdge = edge.parse()?;
        Ok(self.inner.cut(edge, seconds, m)?)
    }

    fn append_zeros(&mut self, edge: &str, seconds: f64, m: usize) -> PyResult<()> {
        let edge: TaperEdge = edge.parse()?;
        Ok(self.inner.append_zeros(edge, seconds, m)?)
    }

    /// Fourier amplitude spectrum
    ///
    /// Returns:
    ///     Tuple (frequencies, fas_h1, fas_h2, fas_v) as numpy arrays
    #[pyo3(signature = (fft_points=None, fmin=0.0, fmax=50.0, smooth_factor=3, window_type=PyWindowType::Rectangular))]
    #[allow(clippy::type_complexity)]
    fn fas<'py>(
        &self,
        py: Python<'py>,
        fft_points: Option<usize>,
        fmin: f64,
        fmax: f64,
        smooth_factor: usize,
        window_type: PyWindowType,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let config = FasConfig {
            fft_points,
            fmin,
            fmax,
            smooth_factor,
            window_type: window_type.into(),
        };
        let fas = self.inner.fas(&config)?;
        Ok((
            PyArray1::from_vec(py, fas.frequencies),
            PyArray1::from_vec(py, fas.fas_h1),
            PyArray1::from_vec(py, fas.fas_h2),
            PyArray1::from_vec(py, fas.fas_v),
        ))
    }

    #[getter]
    fn time<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.inner.time())
    }

    #[getter]
    fn h1<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.inner.h1())
    }

    #[getter]
    fn h2<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.inner.h2())
    }

    #[getter]
    fn v<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.inner.v())
    }

    #[getter]
    fn dt(&self) -> f64 {
        self.inner.dt()
    }

    #[getter]
    fn units(&self) -> &'static str {
        self.inner.units().as_str()
    }

    #[getter]
    fn data_type(&self) -> &'static str {
        self.inner.data_type().short_name()
    }

    #[getter]
    fn orientation(&self) -> (f64, f64, String) {
        let orientation = self.inner.orientation();
        (
            orientation.h1_azimuth,
            orientation.h2_azimuth,
            orientation.vertical.to_string(),
        )
    }

    #[getter]
    fn station_name(&self) -> String {
        self.inner.station_name().to_string()
    }

    #[getter]
    fn padding(&self) -> usize {
        self.inner.padding()
    }

    #[getter]
    fn history(&self) -> Vec<String> {
        self.inner.history().to_vec()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Timeseries(station='{}', samples={}, dt={}, units='{}')",
            self.inner.station_name(),
            self.inner.len(),
            self.inner.dt(),
            self.inner.units()
        )
    }
}
