/// Pure Rust core benchmarks for the phenology engine.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for weather
/// generation, and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use chrono::{Days, NaiveDate};
use phenology_core::apsim_wheat::params::Parameters;
use phenology_core::apsim_wheat::run::{self as accumulator, AccumulatorConfig};
use phenology_core::{simulate, RunConfig, StageDivisors, WeatherDay};

const REPEATS: usize = 7;
const LATITUDE: f64 = 35.7281;

/// Seasonal temperature cycle plus LCG noise, one row per day from 1976-10-01.
fn make_weather(n: usize, seed: u64) -> Vec<WeatherDay> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let start = NaiveDate::from_ymd_opt(1976, 10, 1).expect("valid start date");
    (0..n)
        .map(|i| {
            let phase = i as f64 / 365.25 * std::f64::consts::TAU;
            let mean = 12.0 - 12.0 * phase.cos() + (next_f64() - 0.5) * 6.0;
            let range = 6.0 + next_f64() * 8.0;
            WeatherDay::new(
                start + Days::new(i as u64),
                mean + range / 2.0,
                mean - range / 2.0,
            )
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn sowing_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1976, 11, 5).expect("valid sowing date")
}

fn bench_accumulate(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let config = AccumulatorConfig::new(Parameters::default(), sowing_date(), LATITUDE);
    let mut results = Vec::new();

    for &n in sizes {
        let weather = make_weather(n, 42);

        // Warmup
        black_box(accumulator::run(&config, &weather, None));

        let dur = median_time(|| {
            black_box(accumulator::run(&config, &weather, None));
        });
        results.push(("accumulate", n, dur));
    }
    results
}

fn bench_simulate(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let config = RunConfig::new(Parameters::default(), sowing_date(), StageDivisors::default());
    let mut results = Vec::new();

    for &n in sizes {
        let weather = make_weather(n, 42);

        // Warmup
        black_box(simulate(&config, &weather, LATITUDE));

        let dur = median_time(|| {
            black_box(simulate(&config, &weather, LATITUDE));
        });
        results.push(("accumulate+detect", n, dur));
    }
    results
}

fn main() {
    println!("Pure Rust Core Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Stage", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_accumulate(&[365, 3650, 36500]));
    all_results.extend(bench_simulate(&[365, 3650, 36500]));

    for (name, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", name, n, ms);
    }

    println!("============================================================");
}
