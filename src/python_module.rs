//! Python bindings for bloomer using PyO3

use crate::BloomFilter;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Python wrapper for BloomFilter
#[pyclass(name = "BloomFilter")]
struct PyBloomFilter {
    inner: BloomFilter,
}

/// Keys accepted from Python: an int, a str, or a list of ints
#[derive(FromPyObject)]
enum PyKey {
    Int(i64),
    Text(String),
    Tokens(Vec<Option<u64>>),
}

impl PyKey {
    fn with_input<R>(&self, f: impl FnOnce(crate::Input<'_>) -> R) -> R {
        match self {
            PyKey::Int(value) => f(crate::Input::from(*value)),
            PyKey::Text(text) => f(crate::Input::Text(text)),
            PyKey::Tokens(tokens) => f(crate::Input::Tokens(tokens)),
        }
    }
}

#[pymethods]
impl PyBloomFilter {
    #[new]
    fn new(n: f64, fp: f64) -> PyResult<Self> {
        let filter = BloomFilter::new(n, fp).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBloomFilter { inner: filter })
    }

    fn add(&mut self, key: PyKey) -> bool {
        key.with_input(|input| self.inner.add(input))
    }

    fn test(&self, key: PyKey) -> bool {
        key.with_input(|input| self.inner.test(input))
    }

    fn encode_base64(&self) -> String {
        self.inner.encode_base64()
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn m(&self) -> usize {
        self.inner.m()
    }

    #[getter]
    fn k(&self) -> usize {
        self.inner.k()
    }

    fn load_factor(&self) -> f64 {
        self.inner.load_factor()
    }

    fn stats(&self) -> String {
        self.inner.stats().to_string()
    }

    fn __repr__(&self) -> String {
        format!("BloomFilter(m={}, k={})", self.inner.m(), self.inner.k())
    }
}

/// Python module definition
#[pymodule]
fn bloomer(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyBloomFilter>()?;

    m.add("__version__", "0.1.0")?;

    Ok(())
}
