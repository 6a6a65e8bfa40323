/// APSIM wheat genotype and emergence parameters.
///
/// Two calibrated genotype coefficients drive the photoperiod and
/// vernalisation responses; the emergence parameters set the thermal time
/// needed between sowing and emergence.
use super::constants::{
    DEFAULT_D_SEED, DEFAULT_H_SNOW, DEFAULT_RP, DEFAULT_RV, DEFAULT_R_E, DEFAULT_T_LAG, N_PARAMS,
    PARAM_BOUNDS, PARAM_NAMES,
};
use crate::error::PhenologyError;
use crate::numeric::round3;
use crate::traits::ModelParams;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Photoperiod sensitivity [-]. Range [0, 5].
    pub rp: f64,
    /// Vernalisation sensitivity [-]. Range [0, 5].
    pub rv: f64,
}

impl Parameters {
    pub fn new(rp: f64, rv: f64) -> Result<Self, PhenologyError> {
        for (i, value) in [rp, rv].into_iter().enumerate() {
            let (min, max) = PARAM_BOUNDS[i];
            if !(min..=max).contains(&value) {
                return Err(PhenologyError::OutOfBounds {
                    name: PARAM_NAMES[i],
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(Self { rp, rv })
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            rp: DEFAULT_RP,
            rv: DEFAULT_RV,
        }
    }
}

impl ModelParams for Parameters {
    const N_PARAMS: usize = N_PARAMS;
    const PARAM_NAMES: &'static [&'static str] = PARAM_NAMES;
    const PARAM_BOUNDS: &'static [(f64, f64)] = PARAM_BOUNDS;

    fn from_array(arr: &[f64]) -> Result<Self, PhenologyError> {
        if arr.len() != Self::N_PARAMS {
            return Err(PhenologyError::ParameterCount {
                expected: Self::N_PARAMS,
                got: arr.len(),
            });
        }
        Self::new(arr[0], arr[1])
    }

    fn to_array(&self) -> Vec<f64> {
        vec![self.rp, self.rv]
    }
}

/// Sowing-to-emergence parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmergenceParams {
    /// Snow depth used by the crown temperature insulation term [cm].
    pub h_snow: f64,
    /// Sowing depth [mm].
    pub d_seed: f64,
    /// Germination lag [C day].
    pub t_lag: f64,
    /// Shoot elongation rate [C day / mm].
    pub r_e: f64,
}

impl EmergenceParams {
    /// Thermal time from sowing to emergence, `t_lag + r_e * d_seed`, rounded.
    pub fn threshold(&self) -> f64 {
        round3(self.t_lag + self.r_e * self.d_seed)
    }
}

impl Default for EmergenceParams {
    fn default() -> Self {
        Self {
            h_snow: DEFAULT_H_SNOW,
            d_seed: DEFAULT_D_SEED,
            t_lag: DEFAULT_T_LAG,
            r_e: DEFAULT_R_E,
        }
    }
}

/// Grid of genotype coefficients swept by a calibration study.
///
/// Only used to derive the 1-based `Parameter_set` tag of a run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterGrid {
    pub rp_values: Vec<f64>,
    pub rv_values: Vec<f64>,
}

impl ParameterGrid {
    pub fn new(rp_values: Vec<f64>, rv_values: Vec<f64>) -> Self {
        Self {
            rp_values,
            rv_values,
        }
    }

    /// Combination number of `params` in row-major (rp, rv) order, starting at 1.
    ///
    /// Returns `None` if either coefficient is not on the grid.
    pub fn combination_number(&self, params: &Parameters) -> Option<u32> {
        let rp_index = self.rp_values.iter().position(|&v| v == params.rp)?;
        let rv_index = self.rv_values.iter().position(|&v| v == params.rv)?;
        u32::try_from(rp_index * self.rv_values.len() + rv_index + 1).ok()
    }

    /// Number of (rp, rv) combinations.
    pub fn len(&self) -> usize {
        self.rp_values.len() * self.rv_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
