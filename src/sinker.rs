//! # Sinker Weight Advisor
//!
//! Recommends the terminal weight needed to hold bottom at a given depth.
//! Faster tides need more grams per metre:
//!
//! | category | grams per metre |
//! |----------|-----------------|
//! | spring   | 2.0 - 2.5       |
//! | mid      | 1.5 - 2.0       |
//! | neap     | 1.1 - 1.5       |
//!
//! The raw range is then snapped to the sizes actually sold, so the angler
//! gets weights that exist in the tackle box.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SinkerConfig;
use crate::tide::{self, TideCategory};

/// A recommended weight, either one size or a range, in grams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightSpec {
    Single(u32),
    Range { min: u32, max: u32 },
}

impl WeightSpec {
    /// Build from bounds; equal or crossed bounds collapse to `max`.
    fn from_bounds(min: u32, max: u32) -> Self {
        if min >= max {
            WeightSpec::Single(max)
        } else {
            WeightSpec::Range { min, max }
        }
    }

    pub fn min(&self) -> u32 {
        match *self {
            WeightSpec::Single(w) => w,
            WeightSpec::Range { min, .. } => min,
        }
    }

    pub fn max(&self) -> u32 {
        match *self {
            WeightSpec::Single(w) => w,
            WeightSpec::Range { max, .. } => max,
        }
    }
}

impl fmt::Display for WeightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightSpec::Single(w) => write!(f, "{w}g"),
            WeightSpec::Range { min, max } => write!(f, "{min}g〜{max}g"),
        }
    }
}

/// Sinker advice for one depth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SinkerRecommendation {
    pub depth_m: u32,
    pub category: TideCategory,
    /// Depth times the band multipliers, truncated to grams
    pub raw: WeightSpec,
    /// `raw` snapped to the standard weights
    pub snapped: WeightSpec,
}

/// Recommend a weight for `depth_m` metres on the day of `moon_age`.
pub fn recommend(moon_age: u8, depth_m: u32, config: &SinkerConfig) -> SinkerRecommendation {
    let category = tide::classify(moon_age);
    let band = config.band(category);

    let raw_min = (f64::from(depth_m) * band.low) as u32;
    let raw_max = (f64::from(depth_m) * band.high) as u32;

    let snapped_min = snap(raw_min, &config.standard_weights_g);
    let snapped_max = snap(raw_max, &config.standard_weights_g);

    SinkerRecommendation {
        depth_m,
        category,
        raw: WeightSpec::from_bounds(raw_min, raw_max),
        snapped: WeightSpec::from_bounds(snapped_min, snapped_max),
    }
}

/// Nearest standard weight to `grams`; ties go to the lighter size.
///
/// An empty table leaves the value as is.
pub fn snap(grams: u32, standard: &[u32]) -> u32 {
    let mut best: Option<u32> = None;
    for &candidate in standard {
        let closer = match best {
            None => true,
            Some(b) => candidate.abs_diff(grams) < b.abs_diff(grams),
        };
        if closer {
            best = Some(candidate);
        }
    }
    best.unwrap_or(grams)
}
