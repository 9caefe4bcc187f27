//! Synthetic daily weather generation.
//!
//! Each day gets a seasonal temperature baseline plus Gaussian noise, and
//! independently sampled humidity, precipitation, wind speed and pressure.
//! All draws are independent across days and across variables.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use log::debug;
use rand::RngCore;
use rand_distr::{Distribution, Exp1, StandardNormal};

use crate::domain::{DailyObservation, Season, WeatherSeries};
use crate::error::WeatherError;
use crate::math::round1;

/// Annual mean of the temperature baseline (°C).
const BASE_MEAN_C: f64 = 15.0;
/// Half the peak-to-trough swing of the baseline (°C).
const BASE_AMPLITUDE_C: f64 = 10.0;
/// Day of year where the baseline crosses its mean on the way up (~March 21).
const BASE_PHASE_DAY: f64 = 80.0;
const BASE_PERIOD_DAYS: f64 = 365.0;

const TEMPERATURE_NOISE_SD: f64 = 5.0;

const HUMIDITY_MEAN: f64 = 60.0;
const HUMIDITY_SD: f64 = 15.0;

/// Rate of the exponential precipitation draw (mean = 1 / rate = 2 mm).
const PRECIPITATION_RATE: f64 = 0.5;

const WIND_MEAN_KMH: f64 = 15.0;
const WIND_SD_KMH: f64 = 8.0;

const PRESSURE_MEAN_HPA: f64 = 1013.0;
const PRESSURE_SD_HPA: f64 = 10.0;

/// Source of the primitive random draws used by the generator.
///
/// Every `RngCore` is a noise source. Tests can plug in fixed draws to check
/// the shape of each formula without fighting randomness.
pub trait NoiseSource {
    /// A draw from `Normal(0, 1)`.
    fn standard_normal(&mut self) -> f64;
    /// A draw from `Exponential(rate = 1)`.
    fn standard_exponential(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> NoiseSource for R {
    fn standard_normal(&mut self) -> f64 {
        let z: f64 = StandardNormal.sample(self);
        z
    }

    fn standard_exponential(&mut self) -> f64 {
        let e: f64 = Exp1.sample(self);
        e
    }
}

/// Noise-free seasonal temperature baseline for a 1-based day of year.
///
/// `15 + 10 * sin(2π * (day_of_year - 80) / 365)`; peaks at 25 °C around day
/// 171 and bottoms out at 5 °C around day 354.
pub fn base_temperature(day_of_year: u32) -> f64 {
    let phase = 2.0 * PI * (day_of_year as f64 - BASE_PHASE_DAY) / BASE_PERIOD_DAYS;
    BASE_MEAN_C + BASE_AMPLITUDE_C * phase.sin()
}

/// Generate a series with the thread-local RNG.
///
/// Consecutive calls with the same arguments produce different values; only
/// dates, city and seasons are deterministic.
pub fn generate(city: &str, start: NaiveDate, end: NaiveDate) -> Result<WeatherSeries, WeatherError> {
    generate_with_rng(city, start, end, &mut rand::thread_rng())
}

/// Generate one observation per day in `[start, end]` using `noise`.
pub fn generate_with_rng<N: NoiseSource + ?Sized>(
    city: &str,
    start: NaiveDate,
    end: NaiveDate,
    noise: &mut N,
) -> Result<WeatherSeries, WeatherError> {
    if start > end {
        return Err(WeatherError::InvalidRange { start, end });
    }

    let days = (end - start).num_days() as usize + 1;
    let mut observations = Vec::with_capacity(days);

    for date in start.iter_days().take(days) {
        observations.push(observe(city, date, noise)?);
    }

    debug!("generated {} days for {city} ({start}..={end})", observations.len());

    Ok(WeatherSeries::from_observations(city, observations))
}

fn observe<N: NoiseSource + ?Sized>(
    city: &str,
    date: NaiveDate,
    noise: &mut N,
) -> Result<DailyObservation, WeatherError> {
    let season = Season::from_date(date)?;

    let temperature = base_temperature(date.ordinal()) + TEMPERATURE_NOISE_SD * noise.standard_normal();
    let humidity = (HUMIDITY_MEAN + HUMIDITY_SD * noise.standard_normal()).clamp(0.0, 100.0);
    // An exponential draw is never negative; the floor guards the rounding below.
    let precipitation = (noise.standard_exponential() / PRECIPITATION_RATE).max(0.0);
    let wind_speed = (WIND_MEAN_KMH + WIND_SD_KMH * noise.standard_normal()).max(0.0);
    let pressure = PRESSURE_MEAN_HPA + PRESSURE_SD_HPA * noise.standard_normal();

    Ok(DailyObservation {
        date,
        city: city.to_string(),
        temperature: round1(temperature),
        humidity: round1(humidity),
        precipitation: round1(precipitation),
        wind_speed: round1(wind_speed),
        pressure: round1(pressure),
        season,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Returns the same normal and exponential draw every time.
    struct FixedNoise {
        normal: f64,
        exponential: f64,
    }

    impl NoiseSource for FixedNoise {
        fn standard_normal(&mut self) -> f64 {
            self.normal
        }

        fn standard_exponential(&mut self) -> f64 {
            self.exponential
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn base_curve_peaks_and_troughs() {
        assert!((base_temperature(80) - 15.0).abs() < 1e-12);
        // Quarter period after day 80 is day 171.25.
        assert!((base_temperature(171) - 25.0).abs() < 1e-3);
        assert!((base_temperature(354) - 5.0).abs() < 1e-3);

        let (peak_day, peak) = (1..=366)
            .map(|d| (d, base_temperature(d)))
            .fold((0, f64::NEG_INFINITY), |acc, x| if x.1 > acc.1 { x } else { acc });
        assert_eq!(peak_day, 171);
        assert!(peak <= 25.0);

        let trough_day = (1..=366)
            .map(|d| (d, base_temperature(d)))
            .fold((0, f64::INFINITY), |acc, x| if x.1 < acc.1 { x } else { acc })
            .0;
        assert_eq!(trough_day, 354);
    }

    #[test]
    fn zero_noise_yields_the_distribution_centers() {
        let mut noise = FixedNoise { normal: 0.0, exponential: 0.0 };
        let day = ymd(2023, 6, 20);
        let series = generate_with_rng("Paris", day, day, &mut noise).unwrap();
        let obs = &series.observations()[0];

        assert_eq!(obs.temperature, round1(base_temperature(day.ordinal())));
        assert_eq!(obs.humidity, 60.0);
        assert_eq!(obs.precipitation, 0.0);
        assert_eq!(obs.wind_speed, 15.0);
        assert_eq!(obs.pressure, 1013.0);
        assert_eq!(obs.season, Season::Summer);
    }

    #[test]
    fn unit_noise_scales_by_each_standard_deviation() {
        let mut noise = FixedNoise { normal: 1.0, exponential: 1.0 };
        let day = ymd(2023, 3, 21);
        let series = generate_with_rng("Paris", day, day, &mut noise).unwrap();
        let obs = &series.observations()[0];

        assert_eq!(obs.temperature, round1(base_temperature(80) + 5.0));
        assert_eq!(obs.humidity, 75.0);
        // Exp(rate 0.5) = Exp(1) / 0.5
        assert_eq!(obs.precipitation, 2.0);
        assert_eq!(obs.wind_speed, 23.0);
        assert_eq!(obs.pressure, 1023.0);
    }

    #[test]
    fn extreme_noise_is_clamped() {
        let day = ymd(2023, 1, 1);

        let mut low = FixedNoise { normal: -10.0, exponential: 0.0 };
        let obs = generate_with_rng("Oslo", day, day, &mut low).unwrap().observations()[0].clone();
        assert_eq!(obs.humidity, 0.0);
        assert_eq!(obs.wind_speed, 0.0);
        // Pressure has no floor.
        assert_eq!(obs.pressure, 913.0);

        let mut high = FixedNoise { normal: 10.0, exponential: 0.0 };
        let obs = generate_with_rng("Oslo", day, day, &mut high).unwrap().observations()[0].clone();
        assert_eq!(obs.humidity, 100.0);
    }

    #[test]
    fn leap_years_use_the_actual_day_of_year() {
        let mut noise = FixedNoise { normal: 0.0, exponential: 0.0 };
        let series = generate_with_rng("Rome", ymd(2024, 12, 31), ymd(2024, 12, 31), &mut noise).unwrap();
        assert_eq!(series.observations()[0].temperature, round1(base_temperature(366)));
    }

    #[test]
    fn one_observation_per_day_without_gaps() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = ymd(2023, 12, 15);
        let end = ymd(2024, 3, 10);
        let series = generate_with_rng("Berlin", start, end, &mut rng).unwrap();

        assert_eq!(series.len() as i64, (end - start).num_days() + 1);
        assert_eq!(series.date_range(), Some((start, end)));
        for pair in series.observations().windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        assert!(series.observations().iter().all(|o| o.city == "Berlin"));
    }

    #[test]
    fn bounds_hold_across_repeated_runs() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = generate_with_rng("Madrid", ymd(2024, 1, 1), ymd(2024, 12, 31), &mut rng).unwrap();
            for o in series.observations() {
                assert!((0.0..=100.0).contains(&o.humidity), "humidity {}", o.humidity);
                assert!(o.precipitation >= 0.0);
                assert!(o.wind_speed >= 0.0);
                assert_eq!(Season::from_date(o.date), Ok(o.season));
            }
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let start = ymd(2024, 2, 1);
        let end = ymd(2024, 1, 1);
        assert_eq!(generate("Paris", start, end), Err(WeatherError::InvalidRange { start, end }));
    }

    #[test]
    fn unseeded_runs_differ_but_labels_do_not() {
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 3, 31);
        let a = generate("Paris", start, end).unwrap();
        let b = generate("Paris", start, end).unwrap();

        let labels = |s: &WeatherSeries| {
            s.observations()
                .iter()
                .map(|o| (o.date, o.city.clone(), o.season))
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&a), labels(&b));
        assert_ne!(a, b);
    }
}
