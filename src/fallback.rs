//! # Historical Temperature Fallback
//!
//! Long-range dates are beyond the marine model's horizon and the provider
//! sometimes answers with nulls. This module decides, once per forecast,
//! whether the water temperatures are usable:
//!
//! - **Live**: at least one sample in the window is valid (present, finite, > 0 °C).
//!   Individual invalid hours are filled with the first valid sample and
//!   flagged, so no hour-over-hour trend is read across them.
//! - **Fallback**: no valid sample at all. Every hour gets the climatological
//!   mean for the target month, and the run is tagged so the score engine
//!   skips its trend terms.
//!
//! The climatology is a flat line on purpose: it says how warm the water
//! usually is, not how it is moving.

use tracing::warn;

use crate::config::ClimatologyConfig;
use crate::DataSource;

/// Used when the month is outside 1-12 or the table is short.
pub const DEFAULT_SST_C: f64 = 15.0;

/// Hours synthesised for a fallback series: previous day plus target day.
const FALLBACK_SERIES_HOURS: usize = 48;

/// Whether a provider temperature sample can be used.
pub fn is_valid(sample: Option<f64>) -> bool {
    matches!(sample, Some(t) if t.is_finite() && t > 0.0)
}

/// Climatological mean sea-surface temperature for `month` (1 = January).
pub fn climatological_temp(month: u32, climatology: &ClimatologyConfig) -> f64 {
    month
        .checked_sub(1)
        .and_then(|i| climatology.monthly_sst_c.get(i as usize))
        .copied()
        .unwrap_or(DEFAULT_SST_C)
}

/// Hour-indexed water temperatures with invalid samples masked out.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureSeries {
    pub source: DataSource,
    samples: Vec<Option<f64>>,
    substitute: f64,
}

impl TemperatureSeries {
    /// Temperature at series index `idx`; invalid or missing entries read as
    /// the substitute value.
    pub fn at(&self, idx: usize) -> f64 {
        self.samples
            .get(idx)
            .copied()
            .flatten()
            .unwrap_or(self.substitute)
    }

    /// Mean of the valid samples in `start..start + len`, if any.
    pub fn mean(&self, start: usize, len: usize) -> Option<f64> {
        let valid: Vec<f64> = self
            .samples
            .iter()
            .skip(start)
            .take(len)
            .filter_map(|s| *s)
            .collect();
        if valid.is_empty() {
            None
        } else {
            Some(valid.iter().sum::<f64>() / valid.len() as f64)
        }
    }

    /// Whether `at(idx)` reads the substitute instead of a real sample.
    ///
    /// Substituted values carry no trend, so callers must not difference them.
    pub fn is_substituted(&self, idx: usize) -> bool {
        !matches!(self.samples.get(idx), Some(Some(_)))
    }
}

/// Decide the data source and build the temperature series for a run.
pub fn resolve(
    raw: &[Option<f64>],
    month: u32,
    climatology: &ClimatologyConfig,
) -> TemperatureSeries {
    let samples: Vec<Option<f64>> = raw
        .iter()
        .map(|&s| if is_valid(s) { s } else { None })
        .collect();

    match samples.iter().flatten().next().copied() {
        Some(first_valid) => TemperatureSeries {
            source: DataSource::Live,
            samples,
            substitute: first_valid,
        },
        None => {
            let temp = climatological_temp(month, climatology);
            warn!(
                month,
                temp, "no valid water temperature samples, using climatological mean"
            );
            TemperatureSeries {
                source: DataSource::Fallback,
                samples: vec![Some(temp); FALLBACK_SERIES_HOURS.max(raw.len())],
                substitute: temp,
            }
        }
    }
}
