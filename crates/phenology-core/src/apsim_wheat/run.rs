/// APSIM wheat accumulator orchestration.
///
/// - `step()`: advance the accumulator by one weather day
/// - `run()`: accumulate a whole weather series into a `DailyTable`
use chrono::{Datelike, Days, NaiveDate};

use super::params::{EmergenceParams, Parameters};
use super::processes;
use super::records::{DailyRecord, DailyTable};
use super::state::State;
use crate::daylength;
use crate::forcing::WeatherDay;
use crate::numeric::round3;
use crate::traits::DailyModel;

/// Everything fixed for one accumulator run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulatorConfig {
    pub parameters: Parameters,
    pub emergence: EmergenceParams,
    /// Days before this date are skipped.
    pub sowing_date: NaiveDate,
    /// Site latitude [deg], north positive.
    pub latitude: f64,
}

impl AccumulatorConfig {
    pub fn new(parameters: Parameters, sowing_date: NaiveDate, latitude: f64) -> Self {
        Self {
            parameters,
            emergence: EmergenceParams::default(),
            sowing_date,
            latitude,
        }
    }

    pub fn with_emergence(mut self, emergence: EmergenceParams) -> Self {
        self.emergence = emergence;
        self
    }
}

/// Run-constant values derived from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    pub emergence_threshold: f64,
    /// Last day of the vernalisation grace period (the day after sowing).
    pub grace_end: Option<NaiveDate>,
}

pub fn prepare(config: &AccumulatorConfig) -> Context {
    Context {
        emergence_threshold: config.emergence.threshold(),
        grace_end: config.sowing_date.checked_add_days(Days::new(1)),
    }
}

/// Execute one day of the accumulator.
///
/// Returns the new state and the day's record, or `None` for days before
/// sowing, which are skipped entirely.
pub fn step(
    state: &State,
    config: &AccumulatorConfig,
    weather: &WeatherDay,
    context: &Context,
) -> (State, Option<DailyRecord>) {
    let date = weather.date;
    if date < config.sowing_date {
        return (*state, None);
    }

    let mut new_state = *state;
    let params = &config.parameters;

    // 1. Environment
    let day_length = daylength::day_length(date, config.latitude);
    let f_d = processes::photoperiod_factor(day_length, params.rp);
    let t_c = processes::crown_temperature(
        weather.max_temp,
        weather.min_temp,
        config.emergence.h_snow,
    );
    let delta_tt = processes::daily_thermal_time(t_c);

    // 2. Emergence, counted from the day after sowing
    if date > config.sowing_date {
        new_state.emergence_tt += delta_tt;
        if new_state.emergence_tt >= context.emergence_threshold && new_state.latch_emergence(date)
        {
            log::debug!(
                "emergence on {} (doy {}) after {:.3} C day",
                date,
                date.ordinal(),
                new_state.emergence_tt
            );
        }
    }

    // 3. Vernalisation, frozen through the grace period
    let in_grace = context.grace_end.map_or(true, |end| date <= end);
    let (vernalisation, f_v) = if in_grace {
        (new_state.vernalisation, 1.0)
    } else {
        new_state.vernalisation = processes::update_vernalisation(
            new_state.vernalisation,
            t_c,
            weather.max_temp,
            weather.min_temp,
        );
        (
            new_state.vernalisation,
            processes::vernalisation_factor(new_state.vernalisation, params.rv),
        )
    };

    // 4. Modulation applies only after the emergence day
    let post_emergence = new_state.emergence_date.is_some_and(|e| date > e);
    let tt_increment = if post_emergence {
        delta_tt * f_d.min(f_v)
    } else {
        delta_tt
    };
    new_state.cumulative_tt += tt_increment;

    let record = DailyRecord {
        date,
        year: weather.year,
        month: date.month(),
        day: date.day(),
        max_temp: round3(weather.max_temp),
        min_temp: round3(weather.min_temp),
        day_length,
        photoperiod_factor: f_d,
        crown_temperature: t_c,
        vernalisation,
        vernalisation_factor: f_v,
        delta_tt: round3(tt_increment),
        cumulative_tt: round3(new_state.cumulative_tt),
        emergence_threshold: context.emergence_threshold,
        emergence_date: new_state.emergence_date.map(|e| e.ordinal()),
    };

    (new_state, Some(record))
}

/// Accumulate a weather series into one record per day from sowing on.
///
/// Weather is assumed date-ordered; unordered input produces meaningless but
/// well-formed output.
pub fn run(
    config: &AccumulatorConfig,
    weather: &[WeatherDay],
    initial_state: Option<&State>,
) -> DailyTable {
    <ApsimWheat as DailyModel>::run(config, weather, initial_state)
}

/// Marker type wiring the accumulator into [`DailyModel`].
pub struct ApsimWheat;

impl DailyModel for ApsimWheat {
    type Params = AccumulatorConfig;
    type State = State;
    type Forcing = WeatherDay;
    type Record = DailyRecord;
    type Table = DailyTable;
    type Context = Context;

    fn prepare(params: &Self::Params) -> Self::Context {
        prepare(params)
    }

    fn initialize_state(_params: &Self::Params) -> Self::State {
        State::initialize()
    }

    fn step(
        state: &Self::State,
        params: &Self::Params,
        forcing: &Self::Forcing,
        context: &Self::Context,
    ) -> (Self::State, Option<Self::Record>) {
        step(state, params, forcing, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn constant_weather(start: NaiveDate, n: u64, max_temp: f64, min_temp: f64) -> Vec<WeatherDay> {
        (0..n)
            .map(|i| WeatherDay::new(start + Days::new(i), max_temp, min_temp))
            .collect()
    }

    fn config(sowing: NaiveDate) -> AccumulatorConfig {
        AccumulatorConfig::new(Parameters::default(), sowing, 36.0)
    }

    // -- skipping --

    #[test]
    fn days_before_sowing_are_skipped() {
        let sowing = date(1976, 11, 5);
        let weather = constant_weather(date(1976, 11, 1), 10, 15.0, 3.0);
        let table = run(&config(sowing), &weather, None);
        assert_eq!(table.len(), 6);
        assert_eq!(table.date[0], sowing);
        assert!(table.date.iter().all(|d| *d >= sowing));
    }

    #[test]
    fn sowing_after_series_produces_empty_table() {
        let weather = constant_weather(date(1976, 1, 1), 30, 15.0, 3.0);
        let table = run(&config(date(1977, 1, 1)), &weather, None);
        assert!(table.is_empty());
    }

    #[test]
    fn skipped_day_leaves_state_untouched() {
        let cfg = config(date(1976, 11, 5));
        let ctx = prepare(&cfg);
        let s = State::initialize();
        let (next, rec) = step(&s, &cfg, &WeatherDay::new(date(1976, 11, 4), 15.0, 3.0), &ctx);
        assert!(rec.is_none());
        assert_eq!(next, s);
    }

    // -- emergence --

    #[test]
    fn emergence_counted_from_day_after_sowing() {
        // 12.5 C day per day: 100 reached on the 8th day after sowing.
        let sowing = date(1977, 2, 19);
        let weather = constant_weather(sowing, 20, 20.0, 5.0);
        let table = run(&config(sowing), &weather, None);
        let expected = date(1977, 2, 27);
        for i in 0..table.len() {
            if table.date[i] < expected {
                assert_eq!(table.emergence_date[i], None, "row {i}");
            } else {
                assert_eq!(table.emergence_date[i], Some(58), "row {i}");
            }
        }
    }

    #[test]
    fn emergence_never_reached_in_cold() {
        let sowing = date(1976, 12, 1);
        let weather = constant_weather(sowing, 60, -2.0, -12.0);
        let table = run(&config(sowing), &weather, None);
        assert!(table.emergence_date.iter().all(Option::is_none));
        assert!(table.cumulative_tt.iter().all(|&tt| tt == 0.0));
    }

    #[test]
    fn emergence_threshold_column_is_constant() {
        let sowing = date(1977, 2, 19);
        let cfg = config(sowing).with_emergence(EmergenceParams {
            d_seed: 20.0,
            ..EmergenceParams::default()
        });
        let table = run(&cfg, &constant_weather(sowing, 5, 20.0, 5.0), None);
        assert!(table.emergence_threshold.iter().all(|&t| t == 70.0));
    }

    // -- vernalisation grace period --

    #[test]
    fn vernalisation_frozen_on_sowing_day_and_day_after() {
        let sowing = date(1976, 11, 5);
        let table = run(&config(sowing), &constant_weather(sowing, 5, 10.0, 0.0), None);
        assert_eq!(table.vernalisation[0], 0.0);
        assert_eq!(table.vernalisation[1], 0.0);
        assert_eq!(table.vernalisation_factor[0], 1.0);
        assert_eq!(table.vernalisation_factor[1], 1.0);
        assert!(table.vernalisation[2] > 0.0);
        assert!(table.vernalisation_factor[2] < 1.0);
        assert!(table.vernalisation[3] > table.vernalisation[2]);
    }

    // -- thermal time modulation --

    #[test]
    fn delta_tt_raw_until_emergence_day_then_modulated() {
        let sowing = date(1977, 2, 19);
        let table = run(&config(sowing), &constant_weather(sowing, 20, 20.0, 5.0), None);
        let emergence_row = table
            .emergence_date
            .iter()
            .position(Option::is_some)
            .unwrap();
        for i in 0..=emergence_row {
            assert_eq!(table.delta_tt[i], 12.5, "row {i}");
        }
        for i in emergence_row + 1..table.len() {
            let factor = table.photoperiod_factor[i].min(table.vernalisation_factor[i]);
            assert_eq!(table.delta_tt[i], round3(12.5 * factor), "row {i}");
            assert!(table.delta_tt[i] < 12.5);
        }
    }

    #[test]
    fn cumulative_tt_is_non_decreasing() {
        let sowing = date(1976, 10, 15);
        let weather: Vec<WeatherDay> = (0..300u64)
            .map(|i| {
                let phase = i as f64 / 365.0 * std::f64::consts::TAU;
                let mean = 12.0 - 14.0 * phase.cos();
                WeatherDay::new(sowing + Days::new(i), mean + 6.0, mean - 6.0)
            })
            .collect();
        let table = run(&config(sowing), &weather, None);
        assert_eq!(table.len(), 300);
        for w in table.cumulative_tt.windows(2) {
            assert!(w[1] >= w[0], "{} then {}", w[0], w[1]);
        }
    }

    #[test]
    fn record_carries_calendar_fields() {
        let sowing = date(1976, 11, 5);
        let weather = vec![WeatherDay::from_year_day(1976, 310, 15.1234, -3.0).unwrap()];
        let table = run(&config(sowing), &weather, None);
        let r = table.row(0).unwrap();
        assert_eq!((r.year, r.month, r.day), (1976, 11, 5));
        assert_eq!(r.max_temp, 15.123);
        assert_eq!(r.emergence_threshold, 100.0);
        assert_eq!(r.day_length, daylength::day_length(sowing, 36.0));
    }

    #[test]
    fn resuming_from_state_matches_single_run() {
        let sowing = date(1977, 2, 19);
        let weather = constant_weather(sowing, 30, 18.0, 2.0);
        let cfg = config(sowing);
        let full = run(&cfg, &weather, None);

        let ctx = prepare(&cfg);
        let mut state = State::initialize();
        for w in &weather[..10] {
            state = step(&state, &cfg, w, &ctx).0;
        }
        let tail = run(&cfg, &weather[10..], Some(&state));
        assert_eq!(tail.cumulative_tt[..], full.cumulative_tt[10..]);
        assert_eq!(tail.vernalisation[..], full.vernalisation[10..]);
    }
}
