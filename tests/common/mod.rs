#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use weatherflow::error::FetchError;
use weatherflow::weather::WeatherSource;
use weatherflow::{Location, RawReading};

/// What the scripted source does for one town.
#[derive(Clone)]
pub enum Behavior {
    Answer { temperature: f64, humidity: f64, rainfall: f64 },
    AnswerAfter(Duration, f64),
    Status(u16),
    Malformed,
    Hang,
}

/// In-process [`WeatherSource`] driven by a per-town script.
pub struct ScriptedSource {
    script: HashMap<String, Behavior>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = (&'static str, Behavior)>) -> Self {
        // ---
        Self {
            script: script
                .into_iter()
                .map(|(town, b)| (town.to_string(), b))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        // ---
        Self {
            script: HashMap::new(),
        }
    }
}

pub fn observed_at() -> DateTime<Utc> {
    // ---
    Utc.with_ymd_and_hms(2024, 4, 20, 10, 0, 0).unwrap()
}

fn reading(town: &str, temperature: f64, humidity: f64, rainfall: f64) -> RawReading {
    // ---
    RawReading {
        location: town.to_string(),
        temperature,
        humidity,
        rainfall,
        observed_at: observed_at(),
    }
}

#[async_trait]
impl WeatherSource for ScriptedSource {
    async fn get(&self, location: &Location) -> Result<RawReading, FetchError> {
        // ---
        match self.script.get(&location.name) {
            Some(Behavior::Answer {
                temperature,
                humidity,
                rainfall,
            }) => Ok(reading(&location.name, *temperature, *humidity, *rainfall)),
            Some(Behavior::AnswerAfter(delay, temperature)) => {
                tokio::time::sleep(*delay).await;
                Ok(reading(&location.name, *temperature, 60.0, 0.0))
            }
            Some(Behavior::Status(code)) => Err(FetchError::HttpStatus(*code)),
            Some(Behavior::Malformed) | None => {
                Err(FetchError::Malformed("missing 'main'".to_string()))
            }
            Some(Behavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn answer(temperature: f64, humidity: f64, rainfall: f64) -> Behavior {
    // ---
    Behavior::Answer {
        temperature,
        humidity,
        rainfall,
    }
}

pub fn locations(names: &[&str]) -> Vec<Location> {
    // ---
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Location::new(*n, 6.0 + i as f64 * 0.1, -75.5))
        .collect()
}
