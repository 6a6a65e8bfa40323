//! Astronomical day length.
//!
//! Day length including civil twilight, from a sinusoidal approximation of
//! solar declination keyed to day-of-year.

use chrono::{Datelike, NaiveDate};

use crate::numeric::round3;

/// Sun depression below the horizon that still counts as daylight [deg].
pub const TWILIGHT_ANGLE: f64 = 6.0;

/// Amplitude of the declination approximation [deg].
pub const MAX_DECLINATION: f64 = 23.44;

/// Day-of-year of the spring equinox in the declination approximation.
pub const EQUINOX_DOY: f64 = 81.0;

/// Solar declination [deg] for a 1-based day-of-year.
pub fn solar_declination(day_of_year: u32) -> f64 {
    let angle = 360.0 / 365.0 * (f64::from(day_of_year) - EQUINOX_DOY);
    MAX_DECLINATION * angle.to_radians().sin()
}

/// Hours of daylight at `latitude` (degrees, north positive) on `date`,
/// rounded to 3 decimals.
///
/// The cosine of the hour angle is clamped to [-1, 1]. During polar day or
/// polar night this saturates silently to 24 h or 0 h instead of failing.
pub fn day_length(date: NaiveDate, latitude: f64) -> f64 {
    day_length_for_doy(date.ordinal(), latitude)
}

/// [`day_length`] keyed by day-of-year.
pub fn day_length_for_doy(day_of_year: u32, latitude: f64) -> f64 {
    let lat = latitude.to_radians();
    let decl = solar_declination(day_of_year).to_radians();
    let twilight = TWILIGHT_ANGLE.to_radians();

    let cos_hour_angle =
        ((-twilight).sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());
    let hour_angle = cos_hour_angle.clamp(-1.0, 1.0).acos();

    round3(2.0 * hour_angle.to_degrees() / 15.0)
}
