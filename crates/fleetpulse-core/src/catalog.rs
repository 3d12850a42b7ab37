//! Metric catalog
//!
//! Display labels and contributor keys for aggregated KPI metrics. Which
//! related metrics explain a KPI is a judgement call that differs between
//! operations teams, so it lives in configuration rather than code.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/fleetpulse/config/catalog.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::kpi::KpiType;

/// Embedded default catalog (compiled into binary)
const DEFAULT_CATALOG: &str = include_str!("../../../config/catalog.toml");

/// Configuration for one aggregated metric key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricEntry {
    pub label: Option<String>,
    /// Aggregated keys considered when explaining this metric, in order
    pub contributors: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    metrics: HashMap<String, MetricEntry>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// Load the catalog from the default override location or embedded defaults
    pub fn load() -> Result<Self> {
        match default_catalog_path().filter(|p| p.exists()) {
            Some(path) => Self::from_file(&path),
            None => Self::embedded(),
        }
    }

    /// Load from an explicit path, falling back to embedded defaults if missing
    pub fn with_path(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "Catalog override not found, using defaults");
            Self::embedded()
        }
    }

    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        tracing::debug!("Loading embedded metric catalog");
        parse_catalog(DEFAULT_CATALOG)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidData(format!("Failed to read catalog: {}", e)))?;
        let mut catalog = parse_catalog(&content)?;
        tracing::debug!(
            path = %path.display(),
            metrics = catalog.metrics.len(),
            "Loaded metric catalog"
        );
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Configured label for an aggregated key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.metrics.get(key).and_then(|m| m.label.as_deref())
    }

    /// Contributor keys for a KPI, looked up by its aggregated key
    pub fn contributors_for(&self, kpi: KpiType) -> &[String] {
        self.metrics
            .get(kpi.aggregated_key())
            .map(|m| m.contributors.as_slice())
            .unwrap_or(&[])
    }

    /// Path the catalog was read from, `None` for embedded defaults
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Default catalog override path
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fleetpulse").join("config").join("catalog.toml"))
}

/// Raw catalog structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawCatalog {
    metrics: Option<HashMap<String, RawMetric>>,
}

#[derive(Debug, Deserialize)]
struct RawMetric {
    label: Option<String>,
    contributors: Option<Vec<String>>,
}

/// Parse catalog from TOML content
fn parse_catalog(content: &str) -> Result<Catalog> {
    let raw: RawCatalog = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid catalog TOML: {}", e)))?;

    let metrics = raw
        .metrics
        .unwrap_or_default()
        .into_iter()
        .map(|(key, metric)| {
            let entry = MetricEntry {
                label: metric.label.filter(|l| !l.trim().is_empty()),
                contributors: metric.contributors.unwrap_or_default(),
            };
            (key, entry)
        })
        .collect();

    Ok(Catalog {
        metrics,
        source: None,
    })
}
