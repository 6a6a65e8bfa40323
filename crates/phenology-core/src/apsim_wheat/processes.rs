/// APSIM wheat phenology process functions.
///
/// Pure functions for crown temperature, thermal time, photoperiod and
/// vernalisation. Every returned quantity is rounded to 3 decimals.
use super::constants::{
    CROWN_BASE_SLOPE, CROWN_SNOW_CURVATURE, CROWN_SNOW_OFFSET, CROWN_SNOW_PIVOT, DEVERN_CEILING,
    DEVERN_RATE, PHOTOPERIOD_OPTIMUM, PHOTOPERIOD_SLOPE, TT_BASE, TT_MAXIMUM, TT_OPTIMUM,
    VERN_AMPLITUDE_COEF, VERN_AMPLITUDE_INTERCEPT, VERN_COLD_INTERCEPT, VERN_COLD_SLOPE,
    VERN_FACTOR_OFFSET, VERN_FACTOR_SLOPE, VERN_MAX_TEMP, VERN_MIN_TEMP, VERN_RANGE_OFFSET,
    VERN_SATURATION,
};
use crate::numeric::round3;

/// Crown temperature for a single air temperature extreme.
///
/// Non-negative temperatures pass through; sub-zero temperatures are pulled
/// toward 2C by an insulation term that depends on snow depth `h_snow`.
pub fn crown_temperature_extreme(air_temp: f64, h_snow: f64) -> f64 {
    if air_temp >= 0.0 {
        round3(air_temp)
    } else {
        let slope = CROWN_BASE_SLOPE + CROWN_SNOW_CURVATURE * (h_snow - CROWN_SNOW_PIVOT).powi(2);
        round3(CROWN_SNOW_OFFSET + air_temp * slope)
    }
}

/// Daily crown temperature: mean of the adjusted max and min.
pub fn crown_temperature(max_temp: f64, min_temp: f64, h_snow: f64) -> f64 {
    let t_cmax = crown_temperature_extreme(max_temp, h_snow);
    let t_cmin = crown_temperature_extreme(min_temp, h_snow);
    round3((t_cmax + t_cmin) / 2.0)
}

/// Daily thermal time from crown temperature.
///
/// Piecewise linear: 0 up to 0C, equal to `t_c` up to 26C, falling linearly
/// back to 0 at 34C, and 0 beyond.
pub fn daily_thermal_time(t_c: f64) -> f64 {
    if t_c > TT_BASE && t_c <= TT_OPTIMUM {
        round3(t_c)
    } else if t_c > TT_OPTIMUM && t_c <= TT_MAXIMUM {
        round3((TT_MAXIMUM - t_c) * TT_OPTIMUM / (TT_MAXIMUM - TT_OPTIMUM))
    } else {
        0.0
    }
}

/// Photoperiod factor `1 - 0.002 * rp * (20 - day_length)^2`.
///
/// Not clamped: long departures from 20 h with a high `rp` go negative.
pub fn photoperiod_factor(day_length: f64, rp: f64) -> f64 {
    round3(1.0 - PHOTOPERIOD_SLOPE * rp * (PHOTOPERIOD_OPTIMUM - day_length).powi(2))
}

/// Daily vernalisation gained from cold exposure.
///
/// Only on days with max below 30C and min below 15C; the smaller of a
/// cold-saturation curve and a diurnal-amplitude curve governs.
pub fn vernalisation_increment(t_c: f64, max_temp: f64, min_temp: f64) -> f64 {
    if max_temp < VERN_MAX_TEMP && min_temp < VERN_MIN_TEMP {
        let cold = VERN_COLD_INTERCEPT - VERN_COLD_SLOPE * t_c;
        let amplitude = VERN_AMPLITUDE_INTERCEPT
            + VERN_AMPLITUDE_COEF * (t_c / (max_temp - min_temp + VERN_RANGE_OFFSET).powi(2));
        round3(cold.min(amplitude))
    } else {
        0.0
    }
}

/// Daily vernalisation lost to heat.
///
/// Only above 30C and while `vernalisation` is still below 10; never more
/// than the vernalisation currently held.
pub fn devernalisation(max_temp: f64, vernalisation: f64) -> f64 {
    if max_temp > VERN_MAX_TEMP && vernalisation < DEVERN_CEILING {
        round3((DEVERN_RATE * (max_temp - VERN_MAX_TEMP)).min(vernalisation))
    } else {
        0.0
    }
}

/// Apply one day of vernalisation and devernalisation to `vernalisation`.
pub fn update_vernalisation(vernalisation: f64, t_c: f64, max_temp: f64, min_temp: f64) -> f64 {
    let gained = vernalisation_increment(t_c, max_temp, min_temp);
    let lost = devernalisation(max_temp, vernalisation);
    round3(vernalisation + gained - lost)
}

/// Vernalisation factor `1 - (0.0054545 * rv + 0.0003) * (50 - V)`.
pub fn vernalisation_factor(vernalisation: f64, rv: f64) -> f64 {
    round3(1.0 - (VERN_FACTOR_SLOPE * rv + VERN_FACTOR_OFFSET) * (VERN_SATURATION - vernalisation))
}
