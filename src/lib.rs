//! # Tairaba Forecast Core Library
//!
//! Turns a calendar date plus marine/weather samples into an hour-by-hour
//! tai-rubber (sea bream) fishing forecast for the Akashi strait.
//!
//! ## Pipeline
//!
//! 1. **Moon age** ([`lunar`]) from the target date
//! 2. **Tide category and curve** ([`tide`]) from the moon age
//! 3. **Sinker weight** ([`sinker`]) per requested depth
//! 4. **Hourly score** ([`score`]) from sunrise, tide, water temperature and weather
//! 5. **Lure strategy** ([`strategy`]) from the score, with a fixed backup rotation
//!
//! Temperature samples come from the provider ([`weather_data`]); when none of
//! them are usable the monthly climatology in [`fallback`] takes over and the
//! run is tagged [`DataSource::Fallback`].
//!
//! The engine itself ([`forecast`]) is a pure, single pass over the fishing
//! window (05:00 to 15:00 local by default). It does no I/O.
//!
//! ## Core Types
//! - [`WeatherWindow`]: everything the provider returned for one target date
//! - [`HourlyWeatherSample`]: cloud/wind/rain for a single hour, defaults applied
//! - [`DataSource`]: whether water temperatures are live or climatological

use serde::{Deserialize, Serialize};

pub mod config;
pub mod fallback;
pub mod forecast;
pub mod lunar;
pub mod renderer;
pub mod score;
pub mod sinker;
pub mod strategy;
pub mod tide;
pub mod weather_data;

#[cfg(test)]
mod tests;

/// Where the water temperatures of a run came from.
///
/// Decided once per forecast. Trend-dependent scoring only runs on
/// [`DataSource::Live`]; a climatological series is flat and carries no trend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Provider samples, at least one of them valid
    Live,
    /// Monthly climatological mean, repeated for every hour
    Fallback,
}

impl DataSource {
    pub fn is_live(self) -> bool {
        matches!(self, DataSource::Live)
    }
}

/// Weather for a single hour of the target day.
///
/// Missing provider values are already replaced with zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeatherSample {
    /// Cloud cover in percent (0-100)
    pub cloud_cover_pct: f64,
    /// Wind speed in metres per second
    pub wind_speed_ms: f64,
    /// Rain rate in millimetres per hour
    pub rain_mm: f64,
}

/// Raw hour-indexed samples for one target date, as delivered by the provider.
///
/// `sea_surface_temp` spans the previous day and the target day (48 hourly
/// values in local time when complete); the engine locates "today" through
/// `WindowConfig::today_offset`. The weather arrays cover the target day only,
/// indexed by local hour. Any array may be shorter than expected or empty.
///
/// # Example
/// ```
/// use tairaba_forecast_lib::WeatherWindow;
///
/// let window = WeatherWindow::empty();
/// assert!(window.sunrise_hour.is_none());
/// assert_eq!(window.weather_at(6).wind_speed_ms, 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherWindow {
    /// Sea-surface temperature in °C; `None` or non-positive means invalid
    pub sea_surface_temp: Vec<Option<f64>>,
    /// Local hour of sunrise on the target day
    pub sunrise_hour: Option<u32>,
    /// Hourly cloud cover (%) for the target day
    pub cloud_cover: Vec<Option<f64>>,
    /// Hourly wind speed (m/s) for the target day
    pub wind_speed: Vec<Option<f64>>,
    /// Hourly rain (mm/h) for the target day
    pub rain: Vec<Option<f64>>,
}

impl WeatherWindow {
    /// A window with no data at all; what a failed fetch turns into.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Weather for local `hour`, zero where the provider had nothing.
    pub fn weather_at(&self, hour: u32) -> HourlyWeatherSample {
        let pick = |values: &[Option<f64>]| {
            values
                .get(hour as usize)
                .copied()
                .flatten()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };
        HourlyWeatherSample {
            cloud_cover_pct: pick(&self.cloud_cover),
            wind_speed_ms: pick(&self.wind_speed),
            rain_mm: pick(&self.rain),
        }
    }
}
