//! PyO3 bindings for Python integration

use crate::error::ProcessingError;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

mod spectrum_bindings;
mod timeseries_bindings;

impl From<ProcessingError> for PyErr {
    fn from(err: ProcessingError) -> Self {
        match &err {
            ProcessingError::InvalidArgument(_) => PyValueError::new_err(err.to_string()),
            ProcessingError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn seismogram_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<timeseries_bindings::PyTimeseries>()?;
    m.add_class::<spectrum_bindings::PyWindowType>()?;

    m.add_function(wrap_pyfunction!(spectrum_bindings::ko98_smooth, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::calculate_smoothed_eas, m)?)?;

    Ok(())
}
