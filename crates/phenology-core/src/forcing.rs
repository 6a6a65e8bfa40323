use chrono::{Datelike, Days, NaiveDate};

use crate::error::PhenologyError;

/// One day of site weather.
///
/// `year` is the year column as supplied; `date` is the calendar date the
/// row stands for. They differ only when a day-of-year past the end of the
/// year rolls into the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherDay {
    pub year: i32,
    pub date: NaiveDate,
    /// Daily maximum air temperature [C].
    pub max_temp: f64,
    /// Daily minimum air temperature [C].
    pub min_temp: f64,
}

impl WeatherDay {
    /// Weather for an explicit calendar date.
    pub fn new(date: NaiveDate, max_temp: f64, min_temp: f64) -> Self {
        Self {
            year: date.year(),
            date,
            max_temp,
            min_temp,
        }
    }

    /// Weather keyed by year and 1-based day-of-year.
    ///
    /// The date is January 1st plus `day - 1` days, so day 366 of a
    /// non-leap year is January 1st of the following year.
    pub fn from_year_day(
        year: i32,
        day: u32,
        max_temp: f64,
        min_temp: f64,
    ) -> Result<Self, PhenologyError> {
        let invalid = PhenologyError::InvalidDayOfYear { year, day };
        if day == 0 {
            return Err(invalid);
        }
        let date = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|jan1| jan1.checked_add_days(Days::new(u64::from(day - 1))))
            .ok_or(invalid)?;
        Ok(Self {
            year,
            date,
            max_temp,
            min_temp,
        })
    }

    /// 1-based day-of-year of `date`.
    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }
}

/// Validated weather series for a single site.
///
/// Rows are non-empty, NaN-free and strictly increasing in date.
/// The accumulator itself accepts any slice; this type is for callers that
/// want the ordering contract checked up front.
#[derive(Debug, Clone)]
pub struct WeatherSeries {
    days: Vec<WeatherDay>,
}

impl WeatherSeries {
    /// Create a new series with validation.
    ///
    /// Validates:
    /// - at least one row
    /// - no NaN in max or min temperature
    /// - dates strictly increasing
    pub fn new(days: Vec<WeatherDay>) -> Result<Self, PhenologyError> {
        if days.is_empty() {
            return Err(PhenologyError::EmptyWeather);
        }
        for (row, d) in days.iter().enumerate() {
            if d.max_temp.is_nan() {
                return Err(PhenologyError::NanTemperature {
                    field: "max_temp",
                    row,
                });
            }
            if d.min_temp.is_nan() {
                return Err(PhenologyError::NanTemperature {
                    field: "min_temp",
                    row,
                });
            }
        }
        for (row, pair) in days.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(PhenologyError::NonIncreasingDates {
                    row: row + 1,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }
        Ok(Self { days })
    }

    /// Build a series from parallel year / day-of-year / temperature columns.
    pub fn from_columns(
        year: &[i32],
        day: &[u32],
        max_temp: &[f64],
        min_temp: &[f64],
    ) -> Result<Self, PhenologyError> {
        let n = year.len();
        for (name, got) in [
            ("day", day.len()),
            ("max_temp", max_temp.len()),
            ("min_temp", min_temp.len()),
        ] {
            if got != n {
                return Err(PhenologyError::LengthMismatch {
                    name,
                    expected: n,
                    got,
                });
            }
        }
        let days = (0..n)
            .map(|i| WeatherDay::from_year_day(year[i], day[i], max_temp[i], min_temp[i]))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }

    pub fn as_slice(&self) -> &[WeatherDay] {
        &self.days
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- WeatherDay --

    #[test]
    fn year_day_maps_to_calendar_date() {
        let w = WeatherDay::from_year_day(1976, 310, 15.0, 3.0).unwrap();
        assert_eq!(w.date, date(1976, 11, 5));
        assert_eq!(w.day_of_year(), 310);
        assert_eq!(w.year, 1976);
    }

    #[test]
    fn day_366_of_non_leap_year_rolls_over() {
        let w = WeatherDay::from_year_day(1977, 366, 5.0, -2.0).unwrap();
        assert_eq!(w.date, date(1978, 1, 1));
        assert_eq!(w.year, 1977);
        assert_eq!(w.day_of_year(), 1);
    }

    #[test]
    fn day_zero_is_rejected() {
        assert_eq!(
            WeatherDay::from_year_day(1976, 0, 5.0, 1.0),
            Err(PhenologyError::InvalidDayOfYear { year: 1976, day: 0 })
        );
    }

    // -- WeatherSeries validation --

    #[test]
    fn valid_series() {
        let s = WeatherSeries::from_columns(
            &[1976, 1976, 1976],
            &[310, 311, 312],
            &[15.0, 14.0, 12.0],
            &[3.0, 2.0, 1.0],
        )
        .unwrap();
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.as_slice()[2].date, date(1976, 11, 7));
    }

    #[test]
    fn rejects_empty_series() {
        assert_eq!(
            WeatherSeries::new(vec![]).unwrap_err(),
            PhenologyError::EmptyWeather
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = WeatherSeries::from_columns(&[1976, 1976], &[1, 2], &[1.0], &[0.0, 0.0])
            .unwrap_err();
        assert!(matches!(
            err,
            PhenologyError::LengthMismatch { name: "max_temp", expected: 2, got: 1 }
        ));
    }

    #[test]
    fn rejects_nan_temperature() {
        let days = vec![
            WeatherDay::new(date(1976, 11, 5), 10.0, 1.0),
            WeatherDay::new(date(1976, 11, 6), 10.0, f64::NAN),
        ];
        let err = WeatherSeries::new(days).unwrap_err();
        assert_eq!(
            err,
            PhenologyError::NanTemperature { field: "min_temp", row: 1 }
        );
    }

    #[test]
    fn rejects_unordered_dates() {
        let days = vec![
            WeatherDay::new(date(1976, 11, 6), 10.0, 1.0),
            WeatherDay::new(date(1976, 11, 5), 10.0, 1.0),
        ];
        assert!(matches!(
            WeatherSeries::new(days),
            Err(PhenologyError::NonIncreasingDates { row: 1, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let days = vec![
            WeatherDay::new(date(1976, 11, 5), 10.0, 1.0),
            WeatherDay::new(date(1976, 11, 5), 11.0, 2.0),
        ];
        assert!(WeatherSeries::new(days).is_err());
    }
}
