//! # Configuration Management
//!
//! Loads the forecast configuration from `forecast-config.toml`. Everything the
//! engine treats as a constant (the fishing location, the climatological water
//! temperatures, the standard sinker sizes and all scoring thresholds) lives
//! here and is handed to [`ForecastEngine`](crate::forecast::ForecastEngine)
//! as one immutable value.
//!
//! Every section is optional in the file; missing sections and keys take the
//! Akashi defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::forecast::ForecastError;
use crate::tide::TideCategory;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "forecast-config.toml";

/// Application configuration loaded from forecast-config.toml
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fishing ground the forecast is tuned for
    pub location: LocationConfig,
    /// Active hours and index layout of the temperature series
    pub window: WindowConfig,
    /// Depths and terminal weights
    pub sinker: SinkerConfig,
    /// Weather and temperature bands of the hourly score
    pub score: ScoreConfig,
    /// Season and weather thresholds of the lure selector
    pub strategy: StrategyConfig,
    /// Monthly mean sea-surface temperatures
    pub climatology: ClimatologyConfig,
    /// Remote weather provider settings
    pub provider: ProviderConfig,
}

/// The single fixed fishing location
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone sent to the provider so hourly arrays are in local time
    pub timezone: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: "Akashi Strait".to_string(),
            latitude: 34.60,
            longitude: 135.00,
            timezone: "Asia/Tokyo".to_string(),
        }
    }
}

/// Forecast window layout
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// First local hour scored (inclusive)
    pub start_hour: u32,
    /// Last local hour scored (inclusive)
    pub end_hour: u32,
    /// Sunrise hour assumed when the provider has none
    pub default_sunrise_hour: u32,
    /// Index of local hour 0 of the target day in the temperature series
    pub today_offset: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start_hour: 5,
            end_hour: 15,
            default_sunrise_hour: 7,
            today_offset: 24,
        }
    }
}

impl WindowConfig {
    pub fn hours(&self) -> std::ops::RangeInclusive<u32> {
        self.start_hour..=self.end_hour
    }
}

/// Weight multiplier band (grams per metre of depth)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct MultiplierBand {
    pub low: f64,
    pub high: f64,
}

/// Sinker advisor tables
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkerConfig {
    /// Depths (m) advised when the caller gives none
    pub depths_m: Vec<u32>,
    /// Standard terminal weights in ascending order (g)
    pub standard_weights_g: Vec<u32>,
    pub spring: MultiplierBand,
    pub mid: MultiplierBand,
    /// Low bound was 1.0 in an older revision of the tables
    pub neap: MultiplierBand,
}

impl Default for SinkerConfig {
    fn default() -> Self {
        Self {
            depths_m: vec![40],
            standard_weights_g: vec![30, 45, 60, 80, 100, 120, 150, 180, 200],
            spring: MultiplierBand {
                low: 2.0,
                high: 2.5,
            },
            mid: MultiplierBand {
                low: 1.5,
                high: 2.0,
            },
            neap: MultiplierBand {
                low: 1.1,
                high: 1.5,
            },
        }
    }
}

impl SinkerConfig {
    pub fn band(&self, category: TideCategory) -> MultiplierBand {
        match category {
            TideCategory::SpringStrong => self.spring,
            TideCategory::MidFast => self.mid,
            TideCategory::NeapSlow => self.neap,
        }
    }
}

/// Weather and temperature bands of the hourly score
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Rain rate (mm/h) at or above which the rain bonus applies
    pub rain_mm: f64,
    /// Cloud cover (%) at or above which the overcast bonus applies
    pub overcast_pct: f64,
    /// Cloud cover (%) at or below which the clear-sky penalty applies
    pub clear_pct: f64,
    /// Wind (m/s) at or above which the hour is unfishable (score 0)
    pub wind_unfishable_ms: f64,
    /// Wind (m/s) at or above which the strong-wind penalty applies
    pub wind_strong_ms: f64,
    pub wind_ideal_min_ms: f64,
    pub wind_ideal_max_ms: f64,
    /// Wind (m/s) at or below which the water counts as dead calm
    pub wind_calm_ms: f64,
    pub wind_strong_points: i32,
    pub wind_ideal_points: i32,
    pub wind_calm_points: i32,
    /// Water temperature (°C) at or below which the score keeps `extreme_low_pct`
    pub extreme_low_temp_c: f64,
    pub extreme_low_pct: i32,
    /// Water temperature (°C) at or below which the score keeps `low_pct`
    pub low_temp_c: f64,
    pub low_pct: i32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            rain_mm: 0.5,
            overcast_pct: 60.0,
            clear_pct: 20.0,
            wind_unfishable_ms: 15.0,
            wind_strong_ms: 10.0,
            wind_ideal_min_ms: 3.0,
            wind_ideal_max_ms: 7.0,
            wind_calm_ms: 1.0,
            wind_strong_points: -10,
            wind_ideal_points: 15,
            wind_calm_points: -10,
            extreme_low_temp_c: 10.0,
            extreme_low_pct: 20,
            low_temp_c: 12.0,
            low_pct: 50,
        }
    }
}

/// Lure selector thresholds
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Rain (mm/h) that muddies the water enough for rain colours and a turbidity note
    pub heavy_rain_mm: f64,
    /// Cloud cover (%) that calls for flash colours
    pub heavy_cloud_pct: f64,
    /// Months of the sand-eel run
    pub bait_season_months: Vec<u32>,
    pub winter_months: Vec<u32>,
    /// Winter override applies below this water temperature (°C) ...
    pub winter_temp_below_c: f64,
    /// ... and below this score
    pub winter_score_below: u8,
    pub summer_months: Vec<u32>,
    /// Score from which summer calls for the long-profile skirt
    pub summer_long_score: u8,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            heavy_rain_mm: 2.0,
            heavy_cloud_pct: 80.0,
            bait_season_months: vec![3, 4, 5],
            winter_months: vec![12, 1, 2],
            winter_temp_below_c: 14.0,
            winter_score_below: 40,
            summer_months: vec![6, 7, 8],
            summer_long_score: 70,
        }
    }
}

/// Climatological sea-surface temperatures for the historical fallback
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClimatologyConfig {
    /// Mean SST (°C), January first
    pub monthly_sst_c: Vec<f64>,
}

impl Default for ClimatologyConfig {
    fn default() -> Self {
        Self {
            monthly_sst_c: vec![
                10.5, 9.8, 10.5, 13.0, 17.5, 21.0, 25.5, 27.0, 25.5, 22.0, 18.0, 14.0,
            ],
        }
    }
}

/// Open-Meteo endpoints and cache policy
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub marine_url: String,
    pub forecast_url: String,
    pub cache_ttl_minutes: u64,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            marine_url: "https://marine-api.open-meteo.com/v1/marine".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            cache_ttl_minutes: 30,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from forecast-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(location = %config.location.name, "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), "invalid config file format: {e}");
                    warn!("using default configuration (Akashi Strait)");
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config file found, using default configuration (Akashi Strait)");
                Self::default()
            }
        }
    }

    /// Save current configuration as pretty TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ForecastError> {
        let invalid = |msg: &str| Err(ForecastError::InvalidConfig(msg.to_string()));

        if self.climatology.monthly_sst_c.len() != 12 {
            return invalid("climatology needs exactly 12 monthly temperatures");
        }
        let weights = &self.sinker.standard_weights_g;
        if weights.is_empty() {
            return invalid("standard sinker weights must not be empty");
        }
        if weights.windows(2).any(|w| w[0] >= w[1]) {
            return invalid("standard sinker weights must be strictly ascending");
        }
        if self.sinker.depths_m.contains(&0) {
            return invalid("depths must be positive");
        }
        for category in TideCategory::ALL {
            let band = self.sinker.band(category);
            if !(band.low > 0.0 && band.low <= band.high) {
                return invalid("multiplier bands need 0 < low <= high");
            }
        }
        let w = &self.window;
        if w.start_hour > w.end_hour || w.end_hour > 23 {
            return invalid("window hours must satisfy start <= end <= 23");
        }
        if w.default_sunrise_hour > 23 {
            return invalid("default sunrise hour must be within 0..=23");
        }
        Ok(())
    }
}
