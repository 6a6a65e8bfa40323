//! APSIM wheat phenology numerical constants.
//!
//! Fixed coefficients of the crown temperature, thermal time, photoperiod and
//! vernalisation responses, plus the parameter contract.

// -- Crown temperature --

/// Crown temperature that sub-zero air temperatures are pulled toward [C].
pub const CROWN_SNOW_OFFSET: f64 = 2.0;

/// Base insulation slope for sub-zero air temperatures [-].
pub const CROWN_BASE_SLOPE: f64 = 0.4;

/// Snow-depth curvature of the insulation slope [cm^-2].
pub const CROWN_SNOW_CURVATURE: f64 = 0.0018;

/// Snow depth at which insulation is strongest [cm].
pub const CROWN_SNOW_PIVOT: f64 = 15.0;

// -- Thermal time response --

/// Base temperature below which development stops [C].
pub const TT_BASE: f64 = 0.0;

/// Optimum temperature where thermal time peaks [C].
pub const TT_OPTIMUM: f64 = 26.0;

/// Maximum temperature above which development stops [C].
pub const TT_MAXIMUM: f64 = 34.0;

// -- Photoperiod response --

/// Day length with no photoperiod penalty [h].
pub const PHOTOPERIOD_OPTIMUM: f64 = 20.0;

/// Quadratic photoperiod penalty per unit sensitivity [h^-2].
pub const PHOTOPERIOD_SLOPE: f64 = 0.002;

// -- Vernalisation response --

/// Max temperature at or above which vernalisation stops; above it devernalisation starts [C].
pub const VERN_MAX_TEMP: f64 = 30.0;

/// Min temperature at or above which vernalisation stops [C].
pub const VERN_MIN_TEMP: f64 = 15.0;

/// Intercept of the cold-saturation curve [1/day].
pub const VERN_COLD_INTERCEPT: f64 = 1.4;

/// Slope of the cold-saturation curve [1/day/C].
pub const VERN_COLD_SLOPE: f64 = 0.0778;

/// Intercept of the diurnal-amplitude curve [1/day].
pub const VERN_AMPLITUDE_INTERCEPT: f64 = 0.5;

/// Coefficient of the diurnal-amplitude curve [-].
pub const VERN_AMPLITUDE_COEF: f64 = 13.44;

/// Offset added to the diurnal range in the amplitude curve [C].
pub const VERN_RANGE_OFFSET: f64 = 3.0;

/// Devernalisation rate per degree above VERN_MAX_TEMP [1/day/C].
pub const DEVERN_RATE: f64 = 0.5;

/// Devernalisation only applies while vernalisation is below this level [-].
pub const DEVERN_CEILING: f64 = 10.0;

/// Vernalisation level at which the factor reaches 1 [-].
pub const VERN_SATURATION: f64 = 50.0;

/// Vernalisation factor slope per unit sensitivity [-].
pub const VERN_FACTOR_SLOPE: f64 = 0.0054545;

/// Vernalisation factor slope independent of sensitivity [-].
pub const VERN_FACTOR_OFFSET: f64 = 0.0003;

// -- Emergence defaults --

/// Default snow depth [cm].
pub const DEFAULT_H_SNOW: f64 = 0.0;

/// Default sowing depth [mm].
pub const DEFAULT_D_SEED: f64 = 40.0;

/// Default germination lag [C day].
pub const DEFAULT_T_LAG: f64 = 40.0;

/// Default shoot elongation rate [C day / mm].
pub const DEFAULT_R_E: f64 = 1.5;

// -- Model contract constants --

/// Number of genotype parameters (rp, rv).
pub const N_PARAMS: usize = 2;

/// Parameter names in canonical order.
pub const PARAM_NAMES: &[&str] = &["rp", "rv"];

/// Parameter bounds as (min, max) tuples, in PARAM_NAMES order.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (0.0, 5.0), // rp
    (0.0, 5.0), // rv
];

/// Default photoperiod sensitivity.
pub const DEFAULT_RP: f64 = 1.5;

/// Default vernalisation sensitivity.
pub const DEFAULT_RV: f64 = 1.5;
