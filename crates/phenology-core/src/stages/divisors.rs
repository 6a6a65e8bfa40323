/// Stage divisors: the thermal time each transition needs.
///
/// Keys follow the external naming, including the quirk that
/// `tt_start_grain_fill` is the divisor of the heading to end-of-grain-fill
/// transition.
use crate::error::PhenologyError;
use crate::traits::ModelParams;

pub const N_DIVISORS: usize = 6;

pub const DIVISOR_NAMES: &[&str] = &[
    "tt_emergence",
    "tt_end_of_juvenile",
    "tt_floral_initiation",
    "tt_flowering",
    "tt_start_grain_fill",
    "tt_end_grain_fill",
];

/// Divisors are sums of daily thermal signals, so only non-negative values
/// can ever be reached.
pub const DIVISOR_BOUNDS: &[(f64, f64)] = &[(0.0, f64::INFINITY); N_DIVISORS];

/// Identifies one divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivisorKey {
    Emergence,
    EndOfJuvenile,
    FloralInitiation,
    Flowering,
    StartGrainFill,
    EndGrainFill,
}

impl DivisorKey {
    pub const ALL: [DivisorKey; N_DIVISORS] = [
        DivisorKey::Emergence,
        DivisorKey::EndOfJuvenile,
        DivisorKey::FloralInitiation,
        DivisorKey::Flowering,
        DivisorKey::StartGrainFill,
        DivisorKey::EndGrainFill,
    ];

    pub fn name(self) -> &'static str {
        DIVISOR_NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        DIVISOR_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDivisors {
    /// Emergence to end of juvenile [C day of delta_TT].
    pub tt_emergence: f64,
    /// End of juvenile to floral initiation [C day of delta_TT].
    pub tt_end_of_juvenile: f64,
    /// Floral initiation to flowering [C day of crown temperature].
    pub tt_floral_initiation: f64,
    /// Flowering to heading [C day of crown temperature].
    pub tt_flowering: f64,
    /// Heading to end of grain fill [C day of crown temperature].
    pub tt_start_grain_fill: f64,
    /// End of grain fill to maturity [C day of crown temperature].
    pub tt_end_grain_fill: f64,
}

impl StageDivisors {
    /// Build from six values in key order, validating each.
    pub fn new(
        tt_emergence: f64,
        tt_end_of_juvenile: f64,
        tt_floral_initiation: f64,
        tt_flowering: f64,
        tt_start_grain_fill: f64,
        tt_end_grain_fill: f64,
    ) -> Result<Self, PhenologyError> {
        let values = [
            tt_emergence,
            tt_end_of_juvenile,
            tt_floral_initiation,
            tt_flowering,
            tt_start_grain_fill,
            tt_end_grain_fill,
        ];
        for (i, &value) in values.iter().enumerate() {
            let (min, max) = DIVISOR_BOUNDS[i];
            if !(min..=max).contains(&value) {
                return Err(PhenologyError::OutOfBounds {
                    name: DIVISOR_NAMES[i],
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(Self {
            tt_emergence,
            tt_end_of_juvenile,
            tt_floral_initiation,
            tt_flowering,
            tt_start_grain_fill,
            tt_end_grain_fill,
        })
    }

    /// Build from `(key, value)` pairs, as found in a divisor mapping.
    ///
    /// Every key must appear; unknown keys are rejected. A repeated key keeps
    /// its last value.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, PhenologyError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [None; N_DIVISORS];
        for (name, value) in pairs {
            let key = DivisorKey::from_name(name)
                .ok_or_else(|| PhenologyError::UnknownDivisor(name.to_string()))?;
            values[key as usize] = Some(value);
        }
        let mut arr = [0.0; N_DIVISORS];
        for (i, v) in values.iter().enumerate() {
            arr[i] = v.ok_or(PhenologyError::MissingDivisor(DIVISOR_NAMES[i]))?;
        }
        Self::from_array(&arr)
    }

    pub fn get(&self, key: DivisorKey) -> f64 {
        match key {
            DivisorKey::Emergence => self.tt_emergence,
            DivisorKey::EndOfJuvenile => self.tt_end_of_juvenile,
            DivisorKey::FloralInitiation => self.tt_floral_initiation,
            DivisorKey::Flowering => self.tt_flowering,
            DivisorKey::StartGrainFill => self.tt_start_grain_fill,
            DivisorKey::EndGrainFill => self.tt_end_grain_fill,
        }
    }
}

impl Default for StageDivisors {
    /// Reference divisors of the single-site study.
    fn default() -> Self {
        Self {
            tt_emergence: 1.0,
            tt_end_of_juvenile: 400.0,
            tt_floral_initiation: 555.0,
            tt_flowering: 120.0,
            tt_start_grain_fill: 545.0,
            tt_end_grain_fill: 35.0,
        }
    }
}

impl ModelParams for StageDivisors {
    const N_PARAMS: usize = N_DIVISORS;
    const PARAM_NAMES: &'static [&'static str] = DIVISOR_NAMES;
    const PARAM_BOUNDS: &'static [(f64, f64)] = DIVISOR_BOUNDS;

    fn from_array(arr: &[f64]) -> Result<Self, PhenologyError> {
        if arr.len() != Self::N_PARAMS {
            return Err(PhenologyError::ParameterCount {
                expected: Self::N_PARAMS,
                got: arr.len(),
            });
        }
        Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5])
    }

    fn to_array(&self) -> Vec<f64> {
        DivisorKey::ALL.iter().map(|&k| self.get(k)).collect()
    }
}
