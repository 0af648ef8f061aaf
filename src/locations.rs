//! The fixed set of monitored locations.
//!
//! The catalog is built once at startup, either from the built-in list of
//! Antioquia municipalities or from a JSON file, and never changes afterwards.

use std::{collections::HashSet, path::Path};

use crate::error::CatalogError;
use crate::models::Location;

/// Immutable list of monitored locations.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    // ---
    /// Validate and wrap a list of locations.
    ///
    /// Rejects an empty list, blank or duplicate names, and coordinates
    /// outside the valid latitude/longitude ranges.
    pub fn new(locations: Vec<Location>) -> Result<Self, CatalogError> {
        // ---
        if locations.is_empty() {
            return Err(CatalogError::Invalid("no locations configured".into()));
        }

        let mut seen = HashSet::new();
        for loc in &locations {
            if loc.name.trim().is_empty() {
                return Err(CatalogError::Invalid("location with empty name".into()));
            }
            if !seen.insert(loc.name.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate location '{}'",
                    loc.name
                )));
            }
            if !(-90.0..=90.0).contains(&loc.latitude) || !(-180.0..=180.0).contains(&loc.longitude)
            {
                return Err(CatalogError::Invalid(format!(
                    "coordinates out of range for '{}': ({}, {})",
                    loc.name, loc.latitude, loc.longitude
                )));
            }
        }

        Ok(Self { locations })
    }

    /// Load a JSON array of `{name, latitude, longitude}` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        // ---
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Self::new(locations)
    }

    /// Built-in catalog of Antioquia municipalities.
    pub fn antioquia() -> Self {
        // ---
        let locations = [
            ("Medellín", 6.2442, -75.5812),
            ("Bello", 6.3373, -75.5579),
            ("Envigado", 6.1759, -75.5917),
            ("Itagüí", 6.1846, -75.5991),
            ("Rionegro", 6.1551, -75.3737),
            ("Apartadó", 7.8829, -76.6258),
            ("Turbo", 8.0929, -76.7283),
            ("Caucasia", 7.9865, -75.1934),
            ("Santa Fe de Antioquia", 6.5567, -75.8276),
            ("Jardín", 5.5985, -75.8194),
        ]
        .into_iter()
        .map(|(name, lat, lon)| Location::new(name, lat, lon))
        .collect();

        Self { locations }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
