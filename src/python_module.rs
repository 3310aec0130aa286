//! Python bindings for sha-bloom using PyO3

use crate::{BloomError, Filter};
use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(e: BloomError) -> PyErr {
    match e {
        BloomError::HashFailure(_) => PyRuntimeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Python wrapper for Filter
#[pyclass(name = "Filter")]
struct PyFilter {
    inner: Filter,
}

#[pymethods]
impl PyFilter {
    #[new]
    fn new(capacity: u32, probability: f64) -> PyResult<Self> {
        let filter = Filter::new(capacity, probability).map_err(to_py_err)?;
        Ok(PyFilter { inner: filter })
    }

    fn add(&mut self, element: &[u8]) -> PyResult<()> {
        self.inner.add(element).map_err(to_py_err)
    }

    fn has(&self, element: &[u8]) -> PyResult<bool> {
        self.inner.has(element).map_err(to_py_err)
    }

    fn __contains__(&self, element: &[u8]) -> PyResult<bool> {
        self.has(element)
    }

    #[getter]
    fn capacity(&self) -> u32 {
        self.inner.capacity()
    }

    #[getter]
    fn probability(&self) -> f64 {
        self.inner.false_positive_probability()
    }

    #[getter]
    fn bit_len(&self) -> u64 {
        self.inner.bit_len()
    }

    #[getter]
    fn hash_count(&self) -> u8 {
        self.inner.hash_count()
    }

    fn array<'py>(&self, py: Python<'py>) -> &'py PyArray1<u64> {
        self.inner.bitstore().to_vec().into_pyarray(py)
    }

    fn mem_bytes(&self) -> usize {
        self.inner.bitstore().len() * 8
    }

    fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }

    fn stats(&self) -> String {
        self.inner.stats().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Filter(capacity={}, probability={}, bit_len={}, hash_count={})",
            self.inner.capacity(),
            self.inner.false_positive_probability(),
            self.inner.bit_len(),
            self.inner.hash_count()
        )
    }
}

/// Python module definition
#[pymodule]
fn sha_bloom(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyFilter>()?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
