//! # Tairaba Forecast Entry Point
//!
//! Fetches the marine and weather inputs for the requested date, runs the
//! forecast engine and prints the result as a text table (or JSON).
//!
//! ```text
//! tairaba-forecast [--date YYYY-MM-DD] [--depth M]... [--config PATH] [--offline] [--json]
//! ```

use anyhow::{anyhow, bail, Context};
use chrono::{Duration, Local, NaiveDate};
use std::env;
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use tairaba_forecast_lib::config::Config;
use tairaba_forecast_lib::forecast::ForecastEngine;
use tairaba_forecast_lib::{renderer, weather_data, WeatherWindow};

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    date: Option<NaiveDate>,
    depths: Vec<u32>,
    config: Option<PathBuf>,
    offline: bool,
    json: bool,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--date" => {
                    let value = args.next().ok_or_else(|| anyhow!("--date needs a value"))?;
                    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .with_context(|| format!("invalid date {value:?}, expected YYYY-MM-DD"))?;
                    parsed.date = Some(date);
                }
                "--depth" => {
                    let value = args.next().ok_or_else(|| anyhow!("--depth needs a value"))?;
                    let depth = value
                        .parse()
                        .with_context(|| format!("invalid depth {value:?}"))?;
                    parsed.depths.push(depth);
                }
                "--config" => {
                    let value = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--offline" => parsed.offline = true,
                "--json" => parsed.json = true,
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(parsed)
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse(env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let date = args
        .date
        .unwrap_or_else(|| Local::now().date_naive() + Duration::days(1));

    let weather = if args.offline {
        WeatherWindow::empty()
    } else {
        let rt = tokio::runtime::Runtime::new()?;
        // Provider failure is "no data", never an error
        rt.block_on(async {
            weather_data::fetch(date, &config)
                .await
                .unwrap_or_else(|error| {
                    warn!("weather fetch failed: {error}");
                    warn!("falling back to climatological water temperatures");
                    WeatherWindow::empty()
                })
        })
    };

    let engine = ForecastEngine::new(config);
    let forecast = match engine.run(date, &args.depths, &weather) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("{e}");
            bail!("forecast failed, please retry");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        renderer::draw_ascii(&forecast);
    }
    Ok(())
}
