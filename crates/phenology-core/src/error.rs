use thiserror::Error;

/// Errors raised while validating configuration or weather input.
///
/// The simulation itself never fails: unreached stages are reported as
/// absent values, not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhenologyError {
    #[error("weather series is empty")]
    EmptyWeather,

    #[error("{field} is NaN at row {row}")]
    NanTemperature { field: &'static str, row: usize },

    #[error("dates must be strictly increasing: row {row} ({current}) does not follow {previous}")]
    NonIncreasingDates {
        row: usize,
        previous: chrono::NaiveDate,
        current: chrono::NaiveDate,
    },

    #[error("day {day} of year {year} is not a representable date")]
    InvalidDayOfYear { year: i32, day: u32 },

    #[error("{name} has {got} elements, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("expected {expected} parameters, got {got}")]
    ParameterCount { expected: usize, got: usize },

    #[error("{name} = {value} is out of bounds [{min}, {max}]")]
    OutOfBounds {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("missing stage divisor `{0}`")]
    MissingDivisor(&'static str),

    #[error("unknown stage divisor `{0}`")]
    UnknownDivisor(String),
}
