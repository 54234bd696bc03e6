//! # Forecast Text Rendering
//!
//! Renders a [`Forecast`] for the terminal: a summary header, a horizontal
//! bar chart of the hourly score, and the tackle table.

use std::fmt::Write;

use crate::forecast::Forecast;
use crate::DataSource;

/// Width of a full (score 100) bar.
const BAR_WIDTH: usize = 40;

/// Render the complete forecast as text.
pub fn render_text(forecast: &Forecast) -> String {
    let mut out = String::new();
    write_header(&mut out, forecast);
    out.push('\n');
    write_chart(&mut out, forecast);
    out.push('\n');
    write_table(&mut out, forecast);
    out
}

/// Print the forecast to stdout.
pub fn draw_ascii(forecast: &Forecast) {
    print!("{}", render_text(forecast));
}

fn write_header(out: &mut String, forecast: &Forecast) {
    let _ = writeln!(out, "Forecast for {}", forecast.date);
    let _ = writeln!(
        out,
        "Moon age {} / {} / sunrise {}:00",
        forecast.moon_age, forecast.tide_category, forecast.sunrise_hour
    );
    for sinker in &forecast.sinkers {
        let _ = writeln!(
            out,
            "Sinker @ {}m: {} (raw {})",
            sinker.depth_m, sinker.snapped, sinker.raw
        );
    }

    let (lo, hi) = forecast.temp_range_c;
    match forecast.data_source {
        DataSource::Live => {
            let _ = writeln!(out, "Water temp {lo:.1}°C - {hi:.1}°C");
        }
        DataSource::Fallback => {
            let _ = writeln!(
                out,
                "⚠ No live water temperature, using the monthly average (about {lo:.1}°C)"
            );
        }
    }
    if let Some(label) = forecast.day_trend.label() {
        let _ = writeln!(out, "Trend: {label} compared with yesterday");
    }
    if let Some(best) = forecast.best_row() {
        let _ = writeln!(out, "Best hour: {} (score {})", best.time_label, best.score);
    }
}

fn write_chart(out: &mut String, forecast: &Forecast) {
    for row in &forecast.rows {
        let len = usize::from(row.score) * BAR_WIDTH / 100;
        let _ = writeln!(
            out,
            "{:>5} │{:<width$}│ {:>3}",
            format!("{}:00", row.hour),
            "█".repeat(len),
            row.score,
            width = BAR_WIDTH
        );
    }
}

fn write_table(out: &mut String, forecast: &Forecast) {
    let _ = writeln!(
        out,
        "{:<8} {:>5} {:>6} {:>5}  {:<30} {:<30} {:<9} {:<4} {:<34} notes",
        "time", "score", "temp", "tide", "primary", "backup", "retrieve", "hook", "weather"
    );
    for row in &forecast.rows {
        let _ = writeln!(
            out,
            "{:<8} {:>5} {:>6.1} {:>4}%  {:<30} {:<30} {:<9} {:<4} {:<34} {}",
            row.time_label,
            row.score,
            row.water_temp_c,
            row.tide_pct,
            row.primary.to_string(),
            row.secondary.to_string(),
            row.retrieve.to_string(),
            row.hook.to_string(),
            row.weather_note,
            row.notes.join(", ")
        );
    }
    let _ = writeln!(out, "★ marks slack water (turn of the tide)");
}
