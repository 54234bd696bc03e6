//! # End-to-End Forecast Scenarios
//!
//! Full engine runs over hand-built weather windows. Expected scores were
//! worked out rule by rule from the score stack; see `score.rs` for the
//! individual terms.

use chrono::NaiveDate;

use crate::config::Config;
use crate::forecast::{Forecast, ForecastEngine};
use crate::score::{self, DayTrend, HourInputs};
use crate::sinker::WeightSpec;
use crate::strategy::{HookSize, LureColor, Pattern, RetrieveSpeed, SkirtShape};
use crate::tide::{TideCategory, TideSample};
use crate::{DataSource, HourlyWeatherSample, WeatherWindow};

fn run(date: NaiveDate, depths: &[u32], window: &WeatherWindow) -> Forecast {
    ForecastEngine::new(Config::default())
        .run(date, depths, window)
        .expect("forecast should succeed")
}

fn october_20() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

/// Yesterday 22.0 °C flat, today cooling from 21.0 with one gap at 11:00;
/// a mixed day of cloud, wind and one heavy shower at 10:00.
fn live_window() -> WeatherWindow {
    let mut temps = vec![Some(22.0); 24];
    let mut today = vec![Some(21.0); 6];
    today.extend([
        Some(21.5),
        Some(21.75),
        Some(21.5),
        Some(21.5),
        Some(21.25),
        None,
    ]);
    today.extend(vec![Some(21.25); 12]);
    temps.extend(today);

    let mut cloud = vec![Some(0.0); 24];
    let mut wind = vec![Some(0.0); 24];
    let mut rain = vec![Some(0.0); 24];
    for h in 5..=8 {
        cloud[h] = Some(70.0);
    }
    for h in 9..=12 {
        cloud[h] = Some(10.0);
    }
    for h in 13..=15 {
        cloud[h] = Some(40.0);
    }
    for w in wind.iter_mut().take(12) {
        *w = Some(5.0);
    }
    wind[12] = Some(16.0);
    wind[13] = Some(0.5);
    wind[14] = Some(5.0);
    wind[15] = Some(8.0);
    rain[10] = Some(3.0);

    WeatherWindow {
        sea_surface_temp: temps,
        sunrise_hour: Some(6),
        cloud_cover: cloud,
        wind_speed: wind,
        rain,
    }
}

#[test]
fn new_moon_sinker_at_thirty_metres() {
    let forecast = run(
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        &[30],
        &WeatherWindow::empty(),
    );

    assert_eq!(forecast.moon_age, 0);
    assert_eq!(forecast.tide_category, TideCategory::SpringStrong);
    let sinker = &forecast.sinkers[0];
    assert_eq!(sinker.raw, WeightSpec::Range { min: 60, max: 75 });
    assert_eq!(sinker.snapped, WeightSpec::Range { min: 60, max: 80 });
    assert_eq!(sinker.snapped.to_string(), "60g〜80g");
}

#[test]
fn provider_outage_falls_back_to_climatology() {
    let forecast = run(october_20(), &[], &WeatherWindow::empty());

    assert_eq!(forecast.moon_age, 15);
    assert_eq!(forecast.data_source, DataSource::Fallback);
    assert_eq!(forecast.day_trend, DayTrend::Neutral);
    assert_eq!(forecast.sunrise_hour, 7);
    assert!(forecast.rows.iter().all(|r| r.water_temp_c == 22.0));
    assert_eq!(forecast.temp_range_c, (22.0, 22.0));

    let scores: Vec<u8> = forecast.rows.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![0, 35, 55, 55, 35, 0, 15, 15, 15, 35, 35]);

    let tide: Vec<u8> = forecast.rows.iter().map(|r| r.tide_pct).collect();
    assert_eq!(tide, vec![37, 62, 85, 98, 98, 85, 62, 37, 14, 1, 1]);

    let slack: Vec<u32> = forecast
        .rows
        .iter()
        .filter(|r| r.is_slack)
        .map(|r| r.hour)
        .collect();
    assert_eq!(slack, vec![8, 9, 14, 15]);
}

#[test]
fn fallback_rows_carry_labels_and_tackle() {
    let forecast = run(october_20(), &[], &WeatherWindow::empty());
    let row = |hour: u32| forecast.rows.iter().find(|r| r.hour == hour).unwrap();

    assert_eq!(row(8).time_label, "8:00 ★");
    assert_eq!(row(10).time_label, "10:00");
    assert_eq!(row(8).notes, vec!["slack"]);

    // Sunrise hour 7 is odd: dawn colour on the odd side
    let r7 = row(7);
    assert_eq!(r7.reason, "dawn");
    assert_eq!(r7.primary.color, LureColor::OrangeZebra);
    assert_eq!(r7.primary.shape, SkirtShape::HighWave);
    assert_eq!(r7.retrieve, RetrieveSpeed::Medium);
    assert_eq!(r7.hook, HookSize::Medium);

    // Zero-score hour at 5:00 gets the bait note
    assert!(row(5).bait_augment);
    assert!(row(5).notes.contains(&"add bait".to_string()));
    assert_eq!(row(5).weather_note, "clear / wind 0.0m/s (calm)");
}

#[test]
fn live_day_scores_hour_by_hour() {
    let forecast = run(october_20(), &[], &live_window());

    assert_eq!(forecast.data_source, DataSource::Live);
    assert_eq!(forecast.day_trend, DayTrend::Cooling);
    assert_eq!(forecast.sunrise_hour, 6);

    let scores: Vec<u8> = forecast.rows.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![25, 95, 75, 35, 40, 0, 20, 0, 0, 45, 30]);

    let temps: Vec<f64> = forecast.rows.iter().map(|r| r.water_temp_c).collect();
    assert_eq!(
        temps,
        vec![21.0, 21.5, 21.75, 21.5, 21.5, 21.25, 22.0, 21.25, 21.25, 21.25, 21.25]
    );
    assert_eq!(forecast.temp_range_c, (21.0, 22.0));

    let best = forecast.best_row().unwrap();
    assert_eq!(best.hour, 6);
    assert_eq!(best.score, 95);
}

#[test]
fn live_day_tackle_follows_conditions() {
    let forecast = run(october_20(), &[], &live_window());
    let row = |hour: u32| forecast.rows.iter().find(|r| r.hour == hour).unwrap();

    let sunrise = row(6);
    assert_eq!(sunrise.reason, "dawn");
    assert_eq!(
        sunrise.primary,
        Pattern {
            color: LureColor::Chartreuse,
            shape: SkirtShape::HighWave
        }
    );
    assert_eq!(
        sunrise.secondary,
        Pattern {
            color: LureColor::OrangeGold,
            shape: SkirtShape::Short
        }
    );
    assert_eq!(sunrise.retrieve, RetrieveSpeed::Fast);
    assert_eq!(sunrise.hook, HookSize::Large);

    let cooling = row(8);
    assert_eq!(cooling.reason, "cooling water");
    assert_eq!(cooling.primary.color, LureColor::Cola);
    assert_eq!(cooling.primary.shape, SkirtShape::Short);

    let shower = row(10);
    assert_eq!(shower.reason, "heavy rain");
    assert_eq!(shower.primary.color, LureColor::MudGold);
    assert_eq!(shower.primary.shape, SkirtShape::WideFlat);
    assert_eq!(shower.secondary.color, LureColor::Chartreuse);
    assert_eq!(shower.retrieve, RetrieveSpeed::DeadSlow);
    assert_eq!(shower.hook, HookSize::ExtraSmall);
    assert_eq!(
        shower.notes,
        vec!["cooling day", "turbid water", "add bait"]
    );

    let gale = row(12);
    assert_eq!(gale.score, 0);
    assert_eq!(gale.weather_note, "clear / wind 16.0m/s (too rough)");

    let slack = row(14);
    assert_eq!(slack.time_label, "14:00 ★");
    assert_eq!(slack.reason, "default");
    assert_eq!(slack.primary.color, LureColor::RedOrange);
    assert_eq!(slack.notes, vec!["slack", "cooling day"]);
}

#[test]
fn gap_in_live_series_uses_substitute() {
    let forecast = run(october_20(), &[], &live_window());
    let gap = forecast.rows.iter().find(|r| r.hour == 11).unwrap();

    // First valid sample of the series stands in for the missing value
    assert_eq!(gap.water_temp_c, 22.0);
    // ...but no rise is read from it: no +20 against 21.25 at 10:00
    assert_eq!(gap.score, 20);
    assert_eq!(gap.reason, "default");
    assert_eq!(gap.primary.color, LureColor::Pink);

    // Nor a drop back to 21.25 at 12:00
    let after = forecast.rows.iter().find(|r| r.hour == 12).unwrap();
    assert_eq!(after.reason, "default");
    assert_eq!(after.primary.color, LureColor::RedOrange);
}

#[test]
fn gap_in_live_series_scores_like_no_gap() {
    // Flat 20.0 °C with a warmer first reading, which becomes the substitute
    let mut flat = vec![Some(20.0); 48];
    flat[0] = Some(25.0);
    let mut gapped = flat.clone();
    gapped[24 + 9] = None;

    let window = |temps: Vec<Option<f64>>| WeatherWindow {
        sea_surface_temp: temps,
        sunrise_hour: Some(6),
        cloud_cover: vec![Some(40.0); 24],
        wind_speed: vec![Some(5.0); 24],
        rain: vec![Some(0.0); 24],
    };
    let with_gap = run(october_20(), &[], &window(gapped));
    let without = run(october_20(), &[], &window(flat));

    assert_eq!(with_gap.day_trend, without.day_trend);
    for (a, b) in with_gap.rows.iter().zip(&without.rows) {
        assert_eq!(a.score, b.score, "score at {}:00", a.hour);
        assert_eq!(a.reason, b.reason, "reason at {}:00", a.hour);
        assert_eq!(a.primary, b.primary, "pattern at {}:00", a.hour);
    }
    let nine = with_gap.rows.iter().find(|r| r.hour == 9).unwrap();
    assert_eq!(nine.water_temp_c, 25.0);
    assert_ne!(nine.reason, "cooling water");
}

#[test]
fn identical_inputs_give_identical_forecasts() {
    let window = live_window();
    let first = run(october_20(), &[20, 40, 80], &window);
    let second = run(october_20(), &[20, 40, 80], &window);
    assert_eq!(first, second);
}

#[test]
fn wind_penalty_applies_before_cold_water_scaling() {
    let inputs = HourInputs {
        hour: 10,
        sunrise_hour: 6,
        tide: TideSample {
            level: 1.0,
            is_slack: true,
        },
        prior_tide_level: Some(0.97),
        temp_now: 9.5,
        temp_prev: 9.5,
        day_trend: DayTrend::Neutral,
        weather: HourlyWeatherSample {
            cloud_cover_pct: 40.0,
            wind_speed_ms: 1.0,
            rain_mm: 0.0,
        },
        source: DataSource::Live,
    };
    // (50 slack - 10 calm) kept at 20 %
    assert_eq!(score::score(&inputs, &Config::default().score), 8);
}

#[test]
fn forecast_serializes_to_json() {
    let forecast = run(october_20(), &[40], &live_window());
    let json = serde_json::to_value(&forecast).unwrap();

    assert_eq!(json["moon_age"], 15);
    assert_eq!(json["data_source"], "Live");
    assert_eq!(json["rows"].as_array().unwrap().len(), 11);
    assert_eq!(json["rows"][1]["primary"]["color"], "Chartreuse");
}
