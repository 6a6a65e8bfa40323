use chrono::{Datelike, NaiveDate};

use phenology_core::apsim_wheat::params::Parameters;
use phenology_core::apsim_wheat::run::{self as accumulator, AccumulatorConfig};
use phenology_core::stages::{detect, detect_stages, Stage};
use phenology_core::{simulate, RunConfig, StageDivisors, StageTable, WeatherDay, WeatherSeries};

const LATITUDE: f64 = 36.0;

/// Consecutive days from 1977-01-01 with constant temperatures.
fn constant_weather(n: u32, max_temp: f64, min_temp: f64) -> Vec<WeatherDay> {
    (1..=n)
        .map(|day| WeatherDay::from_year_day(1977, day, max_temp, min_temp).unwrap())
        .collect()
}

fn sowing_on_day_50() -> NaiveDate {
    NaiveDate::from_yo_opt(1977, 50).unwrap()
}

fn low_thresholds() -> StageDivisors {
    StageDivisors::new(50.0, 50.0, 50.0, 50.0, 50.0, 50.0).unwrap()
}

fn distinct_values(column: &[Option<u32>]) -> Vec<u32> {
    let mut values: Vec<u32> = column.iter().flatten().copied().collect();
    values.dedup();
    values
}

// -- constant weather --

#[test]
fn constant_weather_assigns_one_ordered_date_per_stage() {
    let weather = constant_weather(400, 20.0, 5.0);
    let config = RunConfig::new(Parameters::default(), sowing_on_day_50(), low_thresholds());
    let table = simulate(&config, &weather, LATITUDE);

    let mut previous = 0;
    for stage in Stage::ALL {
        let values = distinct_values(table.column(stage));
        assert_eq!(values.len(), 1, "{} has {:?}", stage.column_name(), values);
        assert!(values[0] >= previous, "{} out of order", stage.column_name());
        previous = values[0];
    }

    let dates = table.stage_dates();
    assert!(dates.is_complete());
    assert!(dates.emergence.unwrap() > 50);

    // one row past maturity is kept
    let maturity_row = table
        .column(Stage::Maturity)
        .iter()
        .position(Option::is_some)
        .unwrap();
    assert_eq!(table.len(), maturity_row + 2);
    assert_eq!(
        table.daily.date.last().unwrap().ordinal(),
        dates.maturity.unwrap() + 1
    );
}

#[test]
fn rows_before_sowing_never_appear() {
    let weather = constant_weather(400, 20.0, 5.0);
    let config = RunConfig::new(Parameters::default(), sowing_on_day_50(), low_thresholds());
    let table = simulate(&config, &weather, LATITUDE);
    assert_eq!(table.daily.date[0], sowing_on_day_50());
    assert!(table.daily.date.iter().all(|d| d.ordinal() >= 50));
}

#[test]
fn cumulative_thermal_time_never_decreases() {
    let weather = constant_weather(400, 20.0, 5.0);
    let config = AccumulatorConfig::new(Parameters::default(), sowing_on_day_50(), LATITUDE);
    let daily = accumulator::run(&config, &weather, None);
    assert_eq!(daily.len(), 351);
    for pair in daily.cumulative_tt.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
}

#[test]
fn too_cold_to_emerge_leaves_every_stage_unset() {
    let weather = constant_weather(400, -1.0, -15.0);
    let config = RunConfig::new(Parameters::default(), sowing_on_day_50(), low_thresholds());
    let table = simulate(&config, &weather, LATITUDE);
    for stage in Stage::ALL {
        assert!(table.column(stage).iter().all(Option::is_none));
    }
    assert!(table.tt_prime.iter().all(Option::is_none));
    assert_eq!(table.len(), 351);
}

// -- detector --

#[test]
fn rerunning_detection_keeps_assigned_dates() {
    let weather = constant_weather(400, 20.0, 5.0);
    let config = AccumulatorConfig::new(Parameters::default(), sowing_on_day_50(), LATITUDE);
    let daily = accumulator::run(&config, &weather, None);

    let first: StageTable = detect_stages(daily, &low_thresholds());
    let mut second = first.clone();
    detect(&mut second, &low_thresholds());

    assert_eq!(first.stage_dates(), second.stage_dates());
    assert_eq!(first, second);
}

#[test]
fn reference_divisors_on_seasonal_weather() {
    // Autumn sowing with a cold winter and warm summer.
    let start = NaiveDate::from_ymd_opt(1976, 1, 1).unwrap();
    let days: Vec<WeatherDay> = (0..730u64)
        .map(|i| {
            let date = start + chrono::Days::new(i);
            let phase = (f64::from(date.ordinal()) - 15.0) / 365.0 * std::f64::consts::TAU;
            let mean = 13.0 - 15.0 * phase.cos();
            WeatherDay::new(date, mean + 6.0, mean - 6.0)
        })
        .collect();
    let series = WeatherSeries::new(days).unwrap();

    let config = RunConfig::new(
        Parameters::new(2.0, 2.6).unwrap(),
        NaiveDate::from_ymd_opt(1976, 11, 5).unwrap(),
        StageDivisors::default(),
    );
    let table = simulate(&config, series.as_slice(), 35.7281);

    let dates = table.stage_dates();
    assert!(dates.is_complete(), "{dates:?}");
    // everything after emergence lands in the following spring/summer
    let last = table.daily.date.last().unwrap();
    assert_eq!(last.year(), 1977);
    assert!(dates.flowering.unwrap() < dates.maturity.unwrap());
}
