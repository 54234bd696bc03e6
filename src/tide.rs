//! # Tide Strength and Tide Curve
//!
//! The strait's current is driven by the spring-neap cycle, so the moon age
//! alone decides how hard the tide runs. The model has two parts:
//!
//! - **Category**: `moon_age % 15` banded into spring, mid and neap tides
//! - **Curve**: a 12-hour cosine keyed to an estimated local high-tide hour
//!   that slips 0.8 h per day of moon age
//!
//! This is a stand-in for the official current tables, not a physical model.
//! The formulas are the behaviour; nothing here tries to match real charts.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// High-tide hour at moon age 0.
const BASE_HIGH_TIDE_HOUR: f64 = 8.5;

/// Daily lag of the high tide, hours per day of moon age.
const HIGH_TIDE_DELAY_HOURS: f64 = 0.8;

/// Half the semidiurnal period.
const HALF_CYCLE_HOURS: f64 = 6.0;

/// Hours either side of high or low water counted as slack.
const SLACK_WINDOW_HOURS: f64 = 1.0;

/// Coarse tide strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TideCategory {
    /// Around new and full moon; fastest current
    SpringStrong,
    /// Between spring and neap
    MidFast,
    /// Around the quarters; slowest current
    NeapSlow,
}

impl TideCategory {
    pub const ALL: [TideCategory; 3] = [
        TideCategory::SpringStrong,
        TideCategory::MidFast,
        TideCategory::NeapSlow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TideCategory::SpringStrong => "spring tide (strong)",
            TideCategory::MidFast => "mid tide (fast)",
            TideCategory::NeapSlow => "neap tide (slow)",
        }
    }
}

impl fmt::Display for TideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of `moon_age` within its half lunar cycle, `0..=14`.
pub fn age_norm(moon_age: u8) -> u8 {
    moon_age % 15
}

/// Classify tide strength from the moon age.
///
/// | `moon_age % 15` | category |
/// |-----------------|----------|
/// | 0-2, 13-14      | spring   |
/// | 3-5, 10-12      | mid      |
/// | 6-9             | neap     |
pub fn classify(moon_age: u8) -> TideCategory {
    match age_norm(moon_age) {
        0..=2 | 13..=14 => TideCategory::SpringStrong,
        3..=5 | 10..=12 => TideCategory::MidFast,
        _ => TideCategory::NeapSlow,
    }
}

/// Estimated tide state for one local hour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideSample {
    /// Relative level, 1.0 at high water and -1.0 at low water
    pub level: f64,
    /// Near high or low water, where the current goes slack
    pub is_slack: bool,
}

impl TideSample {
    /// Level as a 0-100 percentage for display.
    pub fn level_pct(&self) -> u8 {
        ((self.level + 1.0) * 50.0) as u8
    }
}

/// Local high-tide hour within a 12-hour cycle, `[0, 12)`.
pub fn high_tide_hour(moon_age: u8) -> f64 {
    (BASE_HIGH_TIDE_HOUR + f64::from(age_norm(moon_age)) * HIGH_TIDE_DELAY_HOURS) % 12.0
}

/// Tide level and slack flag at local `hour` (0-23).
///
/// `diff` is the circular distance from the high-tide hour on a 12-hour
/// cycle, in `[0, 6]`: 0 at high water, 6 at low water.
pub fn tide_sample(moon_age: u8, hour: u32) -> TideSample {
    let high = high_tide_hour(moon_age);
    let mut diff = (f64::from(hour) - high).abs() % 12.0;
    if diff > HALF_CYCLE_HOURS {
        diff = 12.0 - diff;
    }

    let level = (diff * (PI / HALF_CYCLE_HOURS)).cos();
    let is_slack =
        diff < SLACK_WINDOW_HOURS || (diff - HALF_CYCLE_HOURS).abs() < SLACK_WINDOW_HOURS;

    TideSample { level, is_slack }
}
