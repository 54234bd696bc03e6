//! # Forecast Engine
//!
//! One forecast run: moon age and tide category once, sinker advice once per
//! depth, then a single left-to-right pass over the fishing window that
//! scores each hour and picks its tackle.
//!
//! Two values cross hours and fix the evaluation order:
//! - the day-over-day trend, computed before the first hour and applied to all
//! - the previous hour's tide level, carried forward for the tide-movement term
//!
//! A run either returns every row or an error. Callers report any error as a
//! single "forecast failed" condition and never show partial rows.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::fallback::{self, TemperatureSeries};
use crate::score::{self, DayTrend, HourInputs, SkyBand, TempAlert, WindBand};
use crate::sinker::{self, SinkerRecommendation};
use crate::strategy::{self, HookSize, Pattern, RetrieveSpeed, StrategyInputs};
use crate::tide::{self, TideCategory};
use crate::{DataSource, HourlyWeatherSample, WeatherWindow};

/// Hours per day in the temperature series.
const HOURS_PER_DAY: usize = 24;

/// Errors that stop a forecast run.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A configuration table breaks an invariant the engine relies on
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A requested depth cannot be advised on
    #[error("invalid depth: {0} m")]
    InvalidDepth(u32),
}

/// One hour of the forecast; the data contract of any presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastRow {
    pub hour: u32,
    /// `H:00`, with ` ★` at slack water
    pub time_label: String,
    pub score: u8,
    pub water_temp_c: f64,
    pub weather: HourlyWeatherSample,
    /// Short sky and wind description
    pub weather_note: String,
    /// Tide level as 0-100 %
    pub tide_pct: u8,
    pub is_slack: bool,
    pub primary: Pattern,
    pub secondary: Pattern,
    pub retrieve: RetrieveSpeed,
    pub hook: HookSize,
    pub bait_augment: bool,
    /// Colour rule behind the primary pattern
    pub reason: &'static str,
    pub notes: Vec<String>,
}

/// A complete forecast for one date.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Forecast {
    pub date: NaiveDate,
    pub moon_age: u8,
    pub tide_category: TideCategory,
    pub sinkers: Vec<SinkerRecommendation>,
    pub data_source: DataSource,
    pub sunrise_hour: u32,
    /// Lowest and highest water temperature inside the window
    pub temp_range_c: (f64, f64),
    pub day_trend: DayTrend,
    pub rows: Vec<ForecastRow>,
}

impl Forecast {
    /// Highest-scoring row; the earliest one on ties.
    pub fn best_row(&self) -> Option<&ForecastRow> {
        self.rows
            .iter()
            .fold(None, |best: Option<&ForecastRow>, row| match best {
                Some(b) if b.score >= row.score => Some(b),
                _ => Some(row),
            })
    }
}

/// The forecast engine, bound to one immutable configuration.
#[derive(Clone, Debug)]
pub struct ForecastEngine {
    config: Config,
}

impl ForecastEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Produce the forecast for `date`.
    ///
    /// `depths` are in metres; an empty slice uses the configured depths.
    /// `weather` may be partly or entirely empty.
    pub fn run(
        &self,
        date: NaiveDate,
        depths: &[u32],
        weather: &WeatherWindow,
    ) -> Result<Forecast, ForecastError> {
        let cfg = &self.config;
        cfg.validate()?;
        if let Some(&bad) = depths.iter().find(|&&d| d == 0) {
            return Err(ForecastError::InvalidDepth(bad));
        }
        let depths = if depths.is_empty() {
            cfg.sinker.depths_m.as_slice()
        } else {
            depths
        };

        let moon_age = crate::lunar::moon_age(date);
        let tide_category = tide::classify(moon_age);
        let sinkers = depths
            .iter()
            .map(|&depth| sinker::recommend(moon_age, depth, &cfg.sinker))
            .collect();

        let temps = fallback::resolve(
            &weather.sea_surface_temp,
            date.month(),
            &cfg.climatology,
        );
        let offset = cfg.window.today_offset;
        let day_trend = day_trend(&temps, offset);
        let sunrise_hour = weather
            .sunrise_hour
            .filter(|h| *h <= 23)
            .unwrap_or(cfg.window.default_sunrise_hour);

        let mut rows = Vec::with_capacity(cfg.window.hours().count());
        let mut prior_tide_level = None;

        for hour in cfg.window.hours() {
            let idx = offset + hour as usize;
            let temp_now = temps.at(idx);
            // A filled-in reading on either side leaves the hour without a trend
            let temp_prev = match idx.checked_sub(1) {
                Some(prev) if !temps.is_substituted(idx) && !temps.is_substituted(prev) => {
                    temps.at(prev)
                }
                _ => temp_now,
            };
            let tide = tide::tide_sample(moon_age, hour);
            let hour_weather = weather.weather_at(hour);

            let inputs = HourInputs {
                hour,
                sunrise_hour,
                tide,
                prior_tide_level,
                temp_now,
                temp_prev,
                day_trend,
                weather: hour_weather,
                source: temps.source,
            };
            let score = score::score(&inputs, &cfg.score);

            let strategy = strategy::select(
                &StrategyInputs {
                    hour,
                    sunrise_hour,
                    score,
                    temp_delta: inputs.temp_delta(),
                    month: date.month(),
                    temp_c: temp_now,
                    cloud_cover_pct: hour_weather.cloud_cover_pct,
                    rain_mm: hour_weather.rain_mm,
                },
                &cfg.strategy,
            );

            debug!(
                hour,
                score,
                level = tide.level,
                slack = tide.is_slack,
                temp_now,
                primary = %strategy.primary,
                "scored hour"
            );

            let mut time_label = format!("{hour}:00");
            if tide.is_slack {
                time_label.push_str(" ★");
            }

            rows.push(ForecastRow {
                hour,
                time_label,
                score,
                water_temp_c: temp_now,
                weather: hour_weather,
                weather_note: self.weather_note(&hour_weather),
                tide_pct: tide.level_pct(),
                is_slack: tide.is_slack,
                primary: strategy.primary,
                secondary: strategy.secondary,
                retrieve: strategy.retrieve,
                hook: strategy.hook,
                bait_augment: strategy.bait_augment,
                reason: strategy.reason,
                notes: self.notes(
                    tide.is_slack,
                    temp_now,
                    day_trend,
                    &hour_weather,
                    strategy.bait_augment,
                ),
            });

            prior_tide_level = Some(tide.level);
        }

        let temp_range_c = rows
            .iter()
            .map(|r| r.water_temp_c)
            .fold(None, |range: Option<(f64, f64)>, t| match range {
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
                None => Some((t, t)),
            })
            .unwrap_or((0.0, 0.0));

        info!(
            %date,
            moon_age,
            tide = %tide_category,
            source = ?temps.source,
            rows = rows.len(),
            "forecast complete"
        );

        Ok(Forecast {
            date,
            moon_age,
            tide_category,
            sinkers,
            data_source: temps.source,
            sunrise_hour,
            temp_range_c,
            day_trend,
            rows,
        })
    }

    fn weather_note(&self, weather: &HourlyWeatherSample) -> String {
        let cfg = &self.config.score;
        let sky = match SkyBand::classify(weather, cfg) {
            SkyBand::Rain => format!("rain {:.1}mm", weather.rain_mm),
            SkyBand::Overcast => format!("cloudy {:.0}%", weather.cloud_cover_pct),
            SkyBand::Clear => "clear".to_string(),
            SkyBand::Neutral => format!("partly cloudy {:.0}%", weather.cloud_cover_pct),
        };
        let wind = match WindBand::classify(weather.wind_speed_ms, cfg) {
            WindBand::Unfishable => " (too rough)",
            WindBand::Strong => " (strong)",
            WindBand::Ideal => " (ideal)",
            WindBand::DeadCalm => " (calm)",
            WindBand::Neutral => "",
        };
        format!("{sky} / wind {:.1}m/s{wind}", weather.wind_speed_ms)
    }

    fn notes(
        &self,
        is_slack: bool,
        temp_c: f64,
        day_trend: DayTrend,
        weather: &HourlyWeatherSample,
        bait_augment: bool,
    ) -> Vec<String> {
        let mut notes = Vec::new();
        if is_slack {
            notes.push("slack".to_string());
        }
        if let Some(alert) = TempAlert::classify(temp_c, &self.config.score) {
            notes.push(format!("{alert} water temp"));
        }
        if let Some(label) = day_trend.label() {
            notes.push(label.to_string());
        }
        if weather.rain_mm >= self.config.strategy.heavy_rain_mm {
            notes.push("turbid water".to_string());
        }
        if bait_augment {
            notes.push("add bait".to_string());
        }
        notes
    }
}

/// Day-over-day trend from the live series; climatology has none.
fn day_trend(temps: &TemperatureSeries, today_offset: usize) -> DayTrend {
    match temps.source {
        DataSource::Live => {
            let yesterday_start = today_offset.saturating_sub(HOURS_PER_DAY);
            DayTrend::from_means(
                temps.mean(today_offset, HOURS_PER_DAY),
                temps.mean(yesterday_start, today_offset - yesterday_start),
            )
        }
        DataSource::Fallback => DayTrend::Neutral,
    }
}
