use numpy::{Element, PyReadonlyArray1};
use pyo3::prelude::*;

use phenology_core::PhenologyError;

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py, T: Element>(arr: &'py PyReadonlyArray1<'py, T>) -> PyResult<&'py [T]> {
    arr.as_slice().map_err(|_| {
        pyo3::exceptions::PyValueError::new_err("array must be C-contiguous")
    })
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py, T: Element>(
    arr: &'py PyReadonlyArray1<'py, T>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [T]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name, expected_len, slice.len()
        )));
    }
    Ok(slice)
}

/// Narrow integer array values, failing on the first one out of range.
pub fn narrowed<S, T>(values: &[S], name: &str) -> PyResult<Vec<T>>
where
    S: Copy + std::fmt::Display,
    T: TryFrom<S>,
{
    values
        .iter()
        .map(|&v| {
            T::try_from(v).map_err(|_| {
                pyo3::exceptions::PyValueError::new_err(format!("{} value {} is out of range", name, v))
            })
        })
        .collect()
}

/// Optional column as floats, NaN where unset.
pub fn nan_filled<T: Copy + Into<f64>>(column: &[Option<T>]) -> Vec<f64> {
    column
        .iter()
        .map(|v| v.map_or(f64::NAN, Into::into))
        .collect()
}

pub fn to_py_err(e: PhenologyError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}
