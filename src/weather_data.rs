//! # Marine and Weather Data Fetching and Caching
//!
//! Fetches the inputs of a forecast from Open-Meteo and caches them briefly on
//! disk. Nothing in here is part of the forecast logic; it only has to deliver
//! a [`WeatherWindow`], and on any failure the caller carries on with
//! [`WeatherWindow::empty`] and the engine falls back to climatology.
//!
//! ## Data Sources
//!
//! ### Marine API
//! - Hourly `sea_surface_temperature` from the day before the target date
//!   through the target date, in local time (48 values)
//!
//! ### Forecast API
//! - Daily `sunrise` for the target date
//! - Hourly `cloud_cover` (%), `wind_speed_10m` (m/s) and `precipitation`
//!   (mm) for the target date
//!
//! The two requests are independent. If one fails the window is assembled
//! from the other; only when both fail is an error returned.
//!
//! ## Caching Strategy
//! - **Location**: one JSON file per target date in the system temp directory
//! - **TTL**: `provider.cache_ttl_minutes` (30 by default), judged by file mtime
//! - Only complete windows are cached; cache write failures are ignored

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::WeatherWindow;

/// Errors that can occur while fetching provider data.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// HTTP request failed (network, server, timeout or body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not have the expected shape
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Cache file operations failed
    #[error("cache IO: {0}")]
    Cache(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct MarineResponse {
    hourly: MarineHourly,
}

#[derive(Debug, Deserialize)]
struct MarineHourly {
    #[serde(default)]
    sea_surface_temperature: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: ForecastDaily,
    hourly: ForecastHourly,
}

#[derive(Debug, Deserialize)]
struct ForecastDaily {
    #[serde(default)]
    sunrise: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastHourly {
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
}

/// Fetch the weather window for `date` from cache or the network.
///
/// # Example
/// ```no_run
/// use chrono::NaiveDate;
/// use tairaba_forecast_lib::{config::Config, weather_data, WeatherWindow};
///
/// # async fn run() {
/// let config = Config::default();
/// let date = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
/// let window = weather_data::fetch(date, &config)
///     .await
///     .unwrap_or_else(|_| WeatherWindow::empty());
/// # }
/// ```
pub async fn fetch(date: NaiveDate, config: &Config) -> Result<WeatherWindow, WeatherError> {
    let cache = cache_path(date);
    let ttl = Duration::from_secs(config.provider.cache_ttl_minutes * 60);
    if let Ok(window) = load_cache(&cache, ttl) {
        debug!(path = %cache.display(), "using cached weather window");
        return Ok(window);
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider.timeout_secs))
        .build()?;

    let marine = fetch_marine(&client, date, config).await;
    let forecast = fetch_forecast(&client, date, config).await;

    let window = match (marine, forecast) {
        (Err(marine_err), Err(forecast_err)) => {
            warn!("forecast request failed too: {forecast_err}");
            return Err(marine_err);
        }
        (Ok(marine), Ok(forecast)) => {
            let window = assemble(Some(marine), Some(forecast));
            if let Err(e) = save_cache(&cache, &window) {
                debug!("weather cache not written: {e}");
            }
            window
        }
        (marine, forecast) => {
            if let Err(e) = &marine {
                warn!("marine request failed: {e}");
            }
            if let Err(e) = &forecast {
                warn!("forecast request failed: {e}");
            }
            assemble(marine.ok(), forecast.ok())
        }
    };

    Ok(window)
}

// -- Private Implementation --

async fn fetch_marine(
    client: &reqwest::Client,
    date: NaiveDate,
    config: &Config,
) -> Result<MarineResponse, WeatherError> {
    let yesterday = date - ChronoDuration::days(1);
    let loc = &config.location;
    let body = client
        .get(&config.provider.marine_url)
        .query(&[
            ("latitude", loc.latitude.to_string()),
            ("longitude", loc.longitude.to_string()),
            ("hourly", "sea_surface_temperature".to_string()),
            ("start_date", yesterday.to_string()),
            ("end_date", date.to_string()),
            ("timezone", loc.timezone.clone()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_marine(&body)
}

async fn fetch_forecast(
    client: &reqwest::Client,
    date: NaiveDate,
    config: &Config,
) -> Result<ForecastResponse, WeatherError> {
    let loc = &config.location;
    let body = client
        .get(&config.provider.forecast_url)
        .query(&[
            ("latitude", loc.latitude.to_string()),
            ("longitude", loc.longitude.to_string()),
            ("daily", "sunrise".to_string()),
            (
                "hourly",
                "cloud_cover,wind_speed_10m,precipitation".to_string(),
            ),
            ("wind_speed_unit", "ms".to_string()),
            ("start_date", date.to_string()),
            ("end_date", date.to_string()),
            ("timezone", loc.timezone.clone()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_forecast(&body)
}

fn parse_marine(body: &str) -> Result<MarineResponse, WeatherError> {
    serde_json::from_str(body).map_err(|e| WeatherError::Parse(format!("marine: {e}")))
}

fn parse_forecast(body: &str) -> Result<ForecastResponse, WeatherError> {
    serde_json::from_str(body).map_err(|e| WeatherError::Parse(format!("forecast: {e}")))
}

/// Local hour of an ISO timestamp such as `2025-10-20T06:03`.
fn sunrise_hour(timestamp: &str) -> Option<u32> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.hour())
}

fn assemble(marine: Option<MarineResponse>, forecast: Option<ForecastResponse>) -> WeatherWindow {
    let mut window = WeatherWindow::empty();
    if let Some(marine) = marine {
        window.sea_surface_temp = marine.hourly.sea_surface_temperature;
    }
    if let Some(forecast) = forecast {
        window.sunrise_hour = forecast
            .daily
            .sunrise
            .first()
            .and_then(|s| sunrise_hour(s));
        window.cloud_cover = forecast.hourly.cloud_cover;
        window.wind_speed = forecast.hourly.wind_speed_10m;
        window.rain = forecast.hourly.precipitation;
    }
    window
}

fn cache_path(date: NaiveDate) -> PathBuf {
    std::env::temp_dir().join(format!("tairaba_weather_{date}.json"))
}

/// Load a cached window if the file is younger than `ttl`.
fn load_cache(path: &Path, ttl: Duration) -> Result<WeatherWindow, io::Error> {
    let meta = fs::metadata(path)?;

    let age = SystemTime::now()
        .duration_since(meta.modified()?)
        .map_err(|_| io::Error::other("time error"))?;

    if age > ttl {
        return Err(io::Error::other("stale"));
    }

    let data = fs::read(path)?;
    let window = serde_json::from_slice(&data)?;

    Ok(window)
}

fn save_cache(path: &Path, window: &WeatherWindow) -> Result<(), io::Error> {
    let data = serde_json::to_vec(window)?;
    fs::write(path, data)?;
    Ok(())
}
