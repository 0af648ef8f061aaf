//! Weather polling and alerting service.
//!
//! A batch fetches current conditions for every monitored location
//! concurrently ([`fetch`]), flags heavy rain and mold risk ([`alerts`]),
//! and appends the result to the [`store`]. The read side summarizes the
//! most recent records ([`summary`]). [`routes`] exposes both over HTTP.

pub mod alerts;
pub mod config;
pub mod error;
pub mod fetch;
pub mod locations;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod schema;
pub mod store;
pub mod summary;
pub mod weather;

pub use config::Config;
pub use models::{DerivedReading, Location, RawReading, StoredRecord, Summary};
pub use pipeline::WeatherPipeline;
