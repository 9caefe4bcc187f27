//! Dashboard configuration.
//!
//! Precedence: CLI flags, then environment (`.env` is loaded with dotenvy),
//! then built-in defaults.
//!
//! | variable           | meaning                                   |
//! |--------------------|-------------------------------------------|
//! | `WXDASH_CITIES`    | comma-separated city list for the picker  |
//! | `WXDASH_CITY`      | initially selected city                   |
//! | `WXDASH_START`     | default start date (`YYYY-MM-DD`)         |
//! | `WXDASH_END`       | default end date (`YYYY-MM-DD`)           |
//! | `WXDASH_PAGE_SIZE` | data table rows per page                  |

use chrono::NaiveDate;
use log::warn;

use crate::app::pipeline::RunRequest;
use crate::cli::RangeArgs;
use crate::error::AppError;
use crate::report::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CITIES: [&str; 8] = [
    "Paris",
    "London",
    "Berlin",
    "Madrid",
    "Rome",
    "Amsterdam",
    "Vienna",
    "Lisbon",
];

const DEFAULT_RANGE: ((i32, u32, u32), (i32, u32, u32)) = ((2024, 1, 1), (2024, 12, 31));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Cities offered by the picker. The generator itself accepts any name.
    pub cities: Vec<String>,
    /// Index into `cities` of the selected city.
    pub city_index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub page_size: usize,
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let ((sy, sm, sd), (ey, em, ed)) = DEFAULT_RANGE;
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            city_index: 0,
            start: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(ey, em, ed).unwrap_or_default(),
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
        }
    }
}

impl DashboardConfig {
    /// Build from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("WXDASH_CITIES") {
            let cities: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            if cities.is_empty() {
                return Err(AppError::new(2, "WXDASH_CITIES must list at least one city."));
            }
            config.cities = cities;
        }

        if let Some(city) = lookup("WXDASH_CITY") {
            config.select_city(city.trim());
        }
        if let Some(raw) = lookup("WXDASH_START") {
            config.start = parse_date("WXDASH_START", &raw)?;
        }
        if let Some(raw) = lookup("WXDASH_END") {
            config.end = parse_date("WXDASH_END", &raw)?;
        }
        if let Some(raw) = lookup("WXDASH_PAGE_SIZE") {
            config.page_size = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::new(
                        2,
                        format!("WXDASH_PAGE_SIZE must be a positive integer, got '{raw}'."),
                    ));
                }
            };
        }

        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_args(mut self, args: &RangeArgs) -> Self {
        if let Some(city) = &args.city {
            self.select_city(city);
        }
        if let Some(start) = args.start {
            self.start = start;
        }
        if let Some(end) = args.end {
            self.end = end;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        self
    }

    pub fn city(&self) -> &str {
        self.cities.get(self.city_index).map(String::as_str).unwrap_or(DEFAULT_CITIES[0])
    }

    /// Select `city`, prepending it to the list when it isn't configured.
    pub fn select_city(&mut self, city: &str) {
        if let Some(idx) = self.cities.iter().position(|c| c.eq_ignore_ascii_case(city)) {
            self.city_index = idx;
            return;
        }
        warn!("city '{city}' is not in the configured list; adding it");
        self.cities.insert(0, city.to_string());
        self.city_index = 0;
    }

    pub fn next_city(&mut self) {
        self.city_index = (self.city_index + 1) % self.cities.len().max(1);
    }

    pub fn prev_city(&mut self) {
        let n = self.cities.len().max(1);
        self.city_index = (self.city_index + n - 1) % n;
    }

    pub fn request(&self) -> RunRequest {
        RunRequest {
            city: self.city().to_string(),
            start: self.start,
            end: self.end,
            seed: self.seed,
        }
    }
}

fn parse_date(key: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::new(2, format!("{key} must be YYYY-MM-DD, got '{raw}': {e}")))
}
