/// One complete phenology run: accumulate, detect stages, tag.
use chrono::NaiveDate;

use crate::apsim_wheat::params::{EmergenceParams, Parameters};
use crate::apsim_wheat::run::{self as accumulator, AccumulatorConfig};
use crate::forcing::WeatherDay;
use crate::stages::{detect_stages, StageDivisors, StageTable};

/// Configuration of a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub parameters: Parameters,
    pub sowing_date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub emergence: EmergenceParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub divisors: StageDivisors,
    /// Tag written to the `Parameter_set` column, usually from
    /// `ParameterGrid::combination_number`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameter_set: Option<u32>,
}

impl RunConfig {
    pub fn new(parameters: Parameters, sowing_date: NaiveDate, divisors: StageDivisors) -> Self {
        Self {
            parameters,
            sowing_date,
            emergence: EmergenceParams::default(),
            divisors,
            parameter_set: None,
        }
    }

    pub fn accumulator(&self, latitude: f64) -> AccumulatorConfig {
        AccumulatorConfig::new(self.parameters, self.sowing_date, latitude)
            .with_emergence(self.emergence)
    }
}

/// Simulate one sowing at one site.
///
/// Infallible: unreached stages are unset in the returned table.
pub fn simulate(config: &RunConfig, weather: &[WeatherDay], latitude: f64) -> StageTable {
    let daily = accumulator::run(&config.accumulator(latitude), weather, None);
    let mut table = detect_stages(daily, &config.divisors);
    table.parameter_set = config.parameter_set;

    let dates = table.stage_dates();
    log::debug!(
        "simulated sowing {} (rp={}, rv={}): {} rows, emergence {:?}, maturity {:?}",
        config.sowing_date,
        config.parameters.rp,
        config.parameters.rv,
        table.len(),
        dates.emergence,
        dates.maturity
    );
    table
}
