//! # Hourly Favourability Score
//!
//! Each hour of the window gets a 0-100 score built from a fixed stack of
//! rules. Order matters: the additive terms run first, wind can zero the hour
//! outright, cold water then scales whatever is left, and the result is
//! clamped last.
//!
//! 1. Sunrise: +40 at the sunrise hour, +20 one hour either side
//! 2. Tide: +50 at slack, otherwise +30 when the level moved more than 0.3
//!    since the previous hour (the first hour has no previous hour)
//! 3. Hour-over-hour water temperature: +20 rising, -20 falling (live data only)
//! 4. Day-over-day trend: -20 cooling day, +10 warming day
//! 5. Rain or cloud band
//! 6. Wind band, with a hard zero at unfishable wind
//! 7. Cold water: keep 20 % (extreme low) or 50 % (low) of the score
//! 8. Clamp to 0-100
//!
//! All arithmetic on the score is integer, so identical inputs always give the
//! identical score.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScoreConfig;
use crate::tide::TideSample;
use crate::{DataSource, HourlyWeatherSample};

const SUNRISE_POINTS: i32 = 40;
const NEAR_SUNRISE_POINTS: i32 = 20;
const SLACK_POINTS: i32 = 50;
const TIDE_MOVE_POINTS: i32 = 30;
/// Level change per hour that counts as a running tide.
const TIDE_MOVE_MIN: f64 = 0.3;
const TEMP_TREND_POINTS: i32 = 20;
/// Hour-over-hour change (°C) that counts as a trend.
const TEMP_TREND_MIN_C: f64 = 0.1;
const RAIN_POINTS: i32 = 10;
const OVERCAST_POINTS: i32 = 10;
const CLEAR_POINTS: i32 = -5;

/// Mean-to-mean change (°C) that makes a cooling or warming day.
pub const DAY_TREND_MIN_C: f64 = 0.5;

/// Today's mean water temperature against yesterday's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayTrend {
    Cooling,
    Neutral,
    Warming,
}

impl DayTrend {
    /// Compare daily means; a missing day gives no trend.
    pub fn from_means(today: Option<f64>, yesterday: Option<f64>) -> Self {
        match (today, yesterday) {
            (Some(t), Some(y)) if t - y <= -DAY_TREND_MIN_C => DayTrend::Cooling,
            (Some(t), Some(y)) if t - y >= DAY_TREND_MIN_C => DayTrend::Warming,
            _ => DayTrend::Neutral,
        }
    }

    pub fn points(self) -> i32 {
        match self {
            DayTrend::Cooling => -20,
            DayTrend::Neutral => 0,
            DayTrend::Warming => 10,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            DayTrend::Cooling => Some("cooling day"),
            DayTrend::Neutral => None,
            DayTrend::Warming => Some("warming day"),
        }
    }
}

/// Cold-water alert level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempAlert {
    ExtremeLow,
    Low,
}

impl TempAlert {
    pub fn classify(temp_c: f64, config: &ScoreConfig) -> Option<Self> {
        if temp_c <= config.extreme_low_temp_c {
            Some(TempAlert::ExtremeLow)
        } else if temp_c <= config.low_temp_c {
            Some(TempAlert::Low)
        } else {
            None
        }
    }

    /// Share of the score that survives, in percent.
    pub fn keep_pct(self, config: &ScoreConfig) -> i32 {
        match self {
            TempAlert::ExtremeLow => config.extreme_low_pct,
            TempAlert::Low => config.low_pct,
        }
    }
}

impl fmt::Display for TempAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempAlert::ExtremeLow => f.write_str("extreme low"),
            TempAlert::Low => f.write_str("low"),
        }
    }
}

/// Rain and cloud band; the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkyBand {
    Rain,
    Overcast,
    Clear,
    Neutral,
}

impl SkyBand {
    pub fn classify(weather: &HourlyWeatherSample, config: &ScoreConfig) -> Self {
        if weather.rain_mm >= config.rain_mm {
            SkyBand::Rain
        } else if weather.cloud_cover_pct >= config.overcast_pct {
            SkyBand::Overcast
        } else if weather.cloud_cover_pct <= config.clear_pct {
            SkyBand::Clear
        } else {
            SkyBand::Neutral
        }
    }

    pub fn points(self) -> i32 {
        match self {
            SkyBand::Rain => RAIN_POINTS,
            SkyBand::Overcast => OVERCAST_POINTS,
            SkyBand::Clear => CLEAR_POINTS,
            SkyBand::Neutral => 0,
        }
    }
}

/// Wind band; the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindBand {
    /// Too rough to fish; the hour scores 0
    Unfishable,
    Strong,
    Ideal,
    /// Flat water, the fish see the line
    DeadCalm,
    Neutral,
}

impl WindBand {
    pub fn classify(wind_ms: f64, config: &ScoreConfig) -> Self {
        if wind_ms >= config.wind_unfishable_ms {
            WindBand::Unfishable
        } else if wind_ms >= config.wind_strong_ms {
            WindBand::Strong
        } else if (config.wind_ideal_min_ms..=config.wind_ideal_max_ms).contains(&wind_ms) {
            WindBand::Ideal
        } else if wind_ms <= config.wind_calm_ms {
            WindBand::DeadCalm
        } else {
            WindBand::Neutral
        }
    }

    /// Additive points; `None` for the hard override.
    pub fn points(self, config: &ScoreConfig) -> Option<i32> {
        match self {
            WindBand::Unfishable => None,
            WindBand::Strong => Some(config.wind_strong_points),
            WindBand::Ideal => Some(config.wind_ideal_points),
            WindBand::DeadCalm => Some(config.wind_calm_points),
            WindBand::Neutral => Some(0),
        }
    }
}

/// Everything the score of one hour depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourInputs {
    pub hour: u32,
    pub sunrise_hour: u32,
    pub tide: TideSample,
    /// Tide level of the previous hour; `None` for the first hour of the window
    pub prior_tide_level: Option<f64>,
    pub temp_now: f64,
    pub temp_prev: f64,
    pub day_trend: DayTrend,
    pub weather: HourlyWeatherSample,
    pub source: DataSource,
}

impl HourInputs {
    /// Hour-over-hour water temperature change; always 0 on climatology.
    pub fn temp_delta(&self) -> f64 {
        match self.source {
            DataSource::Live => self.temp_now - self.temp_prev,
            DataSource::Fallback => 0.0,
        }
    }
}

/// Score one hour, 0-100.
pub fn score(inputs: &HourInputs, config: &ScoreConfig) -> u8 {
    let mut score = 0i32;

    let from_sunrise = inputs.hour.abs_diff(inputs.sunrise_hour);
    if from_sunrise == 0 {
        score += SUNRISE_POINTS;
    } else if from_sunrise == 1 {
        score += NEAR_SUNRISE_POINTS;
    }

    if inputs.tide.is_slack {
        score += SLACK_POINTS;
    } else if let Some(prior) = inputs.prior_tide_level {
        if (inputs.tide.level - prior).abs() > TIDE_MOVE_MIN {
            score += TIDE_MOVE_POINTS;
        }
    }

    if inputs.source.is_live() {
        let delta = inputs.temp_delta();
        if delta >= TEMP_TREND_MIN_C {
            score += TEMP_TREND_POINTS;
        } else if delta <= -TEMP_TREND_MIN_C {
            score -= TEMP_TREND_POINTS;
        }
    }

    score += inputs.day_trend.points();
    score += SkyBand::classify(&inputs.weather, config).points();

    match WindBand::classify(inputs.weather.wind_speed_ms, config).points(config) {
        Some(points) => score += points,
        None => return 0,
    }

    if let Some(alert) = TempAlert::classify(inputs.temp_now, config) {
        score = score * alert.keep_pct(config) / 100;
    }

    score.clamp(0, 100) as u8
}
