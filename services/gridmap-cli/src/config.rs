//! Grid mapping definitions loaded from YAML.
//!
//! ```yaml
//! grid_mappings:
//!   - name: hrrr
//!     attributes:
//!       grid_mapping_name: lambert_conformal_conic
//!       standard_parallel: [38.5, 38.5]
//!       longitude_of_central_meridian: 262.5
//!       latitude_of_projection_origin: 38.5
//!       earth_radius: ${EARTH_RADIUS:-6371229.0}
//! ```
//!
//! `${VAR}` and `${VAR:-default}` are replaced from the environment before
//! parsing.

use anyhow::{Context, Result};
use grid_mapping::{AttributeValue, GridMapping};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct GridmapConfig {
    #[serde(default)]
    pub grid_mappings: Vec<GridMappingEntry>,
}

/// One named grid mapping variable.
#[derive(Debug, Clone, Deserialize)]
pub struct GridMappingEntry {
    pub name: String,
    /// CF grid mapping attributes, keyed by attribute name
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl GridMappingEntry {
    pub fn build(&self) -> Result<GridMapping> {
        GridMapping::from_cf_attributes(&self.attributes)
            .with_context(|| format!("Invalid grid mapping '{}'", self.name))
    }
}

impl GridmapConfig {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read grid mapping config from {:?}", path.as_ref()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse grid mapping config from {:?}", path.as_ref()))?;

        debug!(
            path = ?path.as_ref(),
            grid_mappings = config.grid_mappings.len(),
            "Loaded grid mapping config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let config: GridmapConfig = serde_yaml::from_str(&expanded)?;

        let mut seen = std::collections::HashSet::new();
        for entry in &config.grid_mappings {
            anyhow::ensure!(!entry.name.is_empty(), "Grid mapping name cannot be empty");
            anyhow::ensure!(
                seen.insert(entry.name.as_str()),
                "Duplicate grid mapping name '{}'",
                entry.name
            );
        }

        Ok(config)
    }
}

/// Substitute `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;
        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr)),
    }
}
