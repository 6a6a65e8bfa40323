use std::collections::HashMap;

use chrono::NaiveDate;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{checked_slice, contiguous_slice, nan_filled, narrowed, to_py_err};

use phenology_core::apsim_wheat::params::{EmergenceParams, Parameters};
use phenology_core::apsim_wheat::records::DailyTable;
use phenology_core::apsim_wheat::run::{self as accumulator, AccumulatorConfig};
use phenology_core::daylength;
use phenology_core::stages::Stage;
use phenology_core::traits::ModelParams;
use phenology_core::{simulate, RunConfig, StageDivisors, WeatherSeries};

// ---------------------------------------------------------------------------
// Argument conversion
// ---------------------------------------------------------------------------

fn parse_date(value: &str, name: &str) -> PyResult<NaiveDate> {
    value.parse::<NaiveDate>().map_err(|e| {
        pyo3::exceptions::PyValueError::new_err(format!("{} must be YYYY-MM-DD: {}", name, e))
    })
}

fn parameters(params: &PyReadonlyArray1<'_, f64>) -> PyResult<Parameters> {
    let p_slice = checked_slice(params, Parameters::N_PARAMS, "params")?;
    Parameters::from_array(p_slice).map_err(to_py_err)
}

fn weather(
    year: &PyReadonlyArray1<'_, i64>,
    day: &PyReadonlyArray1<'_, i64>,
    t_max: &PyReadonlyArray1<'_, f64>,
    t_min: &PyReadonlyArray1<'_, f64>,
) -> PyResult<WeatherSeries> {
    let year_slice = contiguous_slice(year)?;
    let n = year_slice.len();
    let day_slice = checked_slice(day, n, "day")?;
    let t_max_slice = checked_slice(t_max, n, "t_max")?;
    let t_min_slice = checked_slice(t_min, n, "t_min")?;

    let years: Vec<i32> = narrowed(year_slice, "year")?;
    let days: Vec<u32> = narrowed(day_slice, "day")?;
    WeatherSeries::from_columns(&years, &days, t_max_slice, t_min_slice).map_err(to_py_err)
}

fn emergence(
    h_snow: Option<f64>,
    d_seed: Option<f64>,
    t_lag: Option<f64>,
    r_e: Option<f64>,
) -> EmergenceParams {
    let defaults = EmergenceParams::default();
    EmergenceParams {
        h_snow: h_snow.unwrap_or(defaults.h_snow),
        d_seed: d_seed.unwrap_or(defaults.d_seed),
        t_lag: t_lag.unwrap_or(defaults.t_lag),
        r_e: r_e.unwrap_or(defaults.r_e),
    }
}

fn divisors(mapping: Option<HashMap<String, f64>>) -> PyResult<StageDivisors> {
    match mapping {
        Some(m) => StageDivisors::from_pairs(m.iter().map(|(k, v)| (k.as_str(), *v)))
            .map_err(to_py_err),
        None => Ok(StageDivisors::default()),
    }
}

// ---------------------------------------------------------------------------
// Output conversion
// ---------------------------------------------------------------------------

/// Write the accumulator columns into `dict` in export order.
fn daily_into_dict<'py>(py: Python<'py>, dict: &Bound<'py, PyDict>, daily: DailyTable) -> PyResult<()> {
    let dates: Vec<String> = daily.date.iter().map(|d| d.to_string()).collect();
    let emergence_date = nan_filled(&daily.emergence_date);

    dict.set_item("Date", dates)?;
    dict.set_item("Year", PyArray1::from_vec(py, daily.year))?;
    dict.set_item("Month", PyArray1::from_vec(py, daily.month))?;
    dict.set_item("Day", PyArray1::from_vec(py, daily.day))?;
    float_columns_into_dict!(
        py, dict, daily,
        "T_max" => max_temp,
        "T_min" => min_temp,
        "L_p" => day_length,
        "Photoperiod factor (f_D)" => photoperiod_factor,
        "Crown temperature (T_c)" => crown_temperature,
        "Total vernalisation (V)" => vernalisation,
        "Vernalisation factor (f_V)" => vernalisation_factor,
        "delta_TT" => delta_tt,
        "Cumulative_TT" => cumulative_tt,
        "Emergence_threshold" => emergence_threshold,
    );
    dict.set_item("Emergence_date", PyArray1::from_vec(py, emergence_date))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Python functions
// ---------------------------------------------------------------------------

/// Simulate one sowing and detect its stage dates.
///
/// Returns a dict of columns keyed by their exported names. Stage columns,
/// `TT_prime` and `Parameter_set` are floats with NaN where unset.
#[pyfunction]
#[pyo3(
    name = "run",
    signature = (
        params, year, day, t_max, t_min, latitude, sowing_date,
        divisors=None, h_snow=None, d_seed=None, t_lag=None, r_e=None, parameter_set=None
    )
)]
#[allow(clippy::too_many_arguments)]
fn apsim_wheat_run<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    year: PyReadonlyArray1<'py, i64>,
    day: PyReadonlyArray1<'py, i64>,
    t_max: PyReadonlyArray1<'py, f64>,
    t_min: PyReadonlyArray1<'py, f64>,
    latitude: f64,
    sowing_date: &str,
    divisors: Option<HashMap<String, f64>>,
    h_snow: Option<f64>,
    d_seed: Option<f64>,
    t_lag: Option<f64>,
    r_e: Option<f64>,
    parameter_set: Option<u32>,
) -> PyResult<Bound<'py, PyDict>> {
    let weather = weather(&year, &day, &t_max, &t_min)?;
    let config = RunConfig {
        parameters: parameters(&params)?,
        sowing_date: parse_date(sowing_date, "sowing_date")?,
        emergence: emergence(h_snow, d_seed, t_lag, r_e),
        divisors: self::divisors(divisors)?,
        parameter_set,
    };

    let table = simulate(&config, weather.as_slice(), latitude);
    let n = table.len();
    let stage_columns: Vec<(&str, Vec<f64>)> = Stage::ALL[1..]
        .iter()
        .map(|&s| (s.column_name(), nan_filled(table.column(s))))
        .collect();
    let tt_prime = nan_filled(&table.tt_prime);
    let tag = table.parameter_set.map_or(f64::NAN, f64::from);

    let dict = PyDict::new(py);
    daily_into_dict(py, &dict, table.daily)?;
    for (name, column) in stage_columns {
        dict.set_item(name, PyArray1::from_vec(py, column))?;
    }
    dict.set_item("TT_prime", PyArray1::from_vec(py, tt_prime))?;
    dict.set_item("Parameter_set", PyArray1::from_vec(py, vec![tag; n]))?;
    Ok(dict)
}

/// Run the accumulator only, without stage detection.
#[pyfunction]
#[pyo3(
    name = "accumulate",
    signature = (
        params, year, day, t_max, t_min, latitude, sowing_date,
        h_snow=None, d_seed=None, t_lag=None, r_e=None
    )
)]
#[allow(clippy::too_many_arguments)]
fn apsim_wheat_accumulate<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    year: PyReadonlyArray1<'py, i64>,
    day: PyReadonlyArray1<'py, i64>,
    t_max: PyReadonlyArray1<'py, f64>,
    t_min: PyReadonlyArray1<'py, f64>,
    latitude: f64,
    sowing_date: &str,
    h_snow: Option<f64>,
    d_seed: Option<f64>,
    t_lag: Option<f64>,
    r_e: Option<f64>,
) -> PyResult<Bound<'py, PyDict>> {
    let weather = weather(&year, &day, &t_max, &t_min)?;
    let config = AccumulatorConfig::new(
        parameters(&params)?,
        parse_date(sowing_date, "sowing_date")?,
        latitude,
    )
    .with_emergence(emergence(h_snow, d_seed, t_lag, r_e));

    let daily = accumulator::run(&config, weather.as_slice(), None);

    let dict = PyDict::new(py);
    daily_into_dict(py, &dict, daily)?;
    Ok(dict)
}

/// Day length [h] including civil twilight for a day-of-year and latitude.
#[pyfunction]
#[pyo3(name = "day_length")]
fn apsim_wheat_day_length(day_of_year: u32, latitude: f64) -> f64 {
    daylength::day_length_for_doy(day_of_year, latitude)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "apsim_wheat")?;
    m.add_function(wrap_pyfunction!(apsim_wheat_run, &m)?)?;
    m.add_function(wrap_pyfunction!(apsim_wheat_accumulate, &m)?)?;
    m.add_function(wrap_pyfunction!(apsim_wheat_day_length, &m)?)?;
    m.add("DIVISOR_NAMES", StageDivisors::PARAM_NAMES.to_vec())?;
    parent.add_submodule(&m)?;
    Ok(())
}
