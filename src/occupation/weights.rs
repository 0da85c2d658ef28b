//! Occupation weight tables
//!
//! Static data mapping an occupation to the garment attributes that help
//! with it. Tables are supplied by the host or loaded from TOML:
//!
//! ```toml
//! [[occupation]]
//! name = "doctor"
//! weights = [ { attribute = "medical_tend_quality", weight = 1.0 } ]
//! ```

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::attributes::catalog::AttributeCatalog;
use crate::attributes::priority::AttributePriority;
use crate::core::error::{OutfitError, Result};
use crate::core::types::OccupationId;

/// Occupation -> attribute weights
#[derive(Debug, Clone, Default)]
pub struct OccupationWeights {
    tables: AHashMap<OccupationId, Vec<AttributePriority>>,
}

impl OccupationWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, occupation: impl Into<String>, weights: Vec<AttributePriority>) {
        self.tables.insert(OccupationId::new(occupation), weights);
    }

    /// Weights for `occupation`, empty if it has no table
    pub fn weights(&self, occupation: &OccupationId) -> &[AttributePriority] {
        self.tables.get(occupation).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parse tables from TOML, resolving attribute names through `catalog`
    ///
    /// Unknown attribute names are logged and skipped. Blank occupation
    /// names are rejected.
    pub fn from_toml_str(content: &str, catalog: &AttributeCatalog) -> Result<Self> {
        let file: OccupationFile = toml::from_str(content)?;
        let mut weights = Self::new();

        for entry in file.occupation {
            if entry.name.trim().is_empty() {
                return Err(OutfitError::InvalidArgument("occupation with an empty name".into()));
            }
            let mut table = Vec::with_capacity(entry.weights.len());
            for weight in entry.weights {
                match catalog.id_by_name(&weight.attribute) {
                    Some(attribute) => table.push(AttributePriority::new(attribute, weight.weight)),
                    None => tracing::warn!(
                        "Occupation '{}' references unknown attribute '{}'",
                        entry.name,
                        weight.attribute
                    ),
                }
            }
            weights.insert(entry.name, table);
        }

        Ok(weights)
    }

    /// Load tables from a TOML file on disk
    pub fn load(path: &Path, catalog: &AttributeCatalog) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, catalog)
    }
}

#[derive(Debug, Deserialize)]
struct OccupationFile {
    #[serde(default)]
    occupation: Vec<OccupationEntry>,
}

#[derive(Debug, Deserialize)]
struct OccupationEntry {
    name: String,
    #[serde(default)]
    weights: Vec<WeightEntry>,
}

#[derive(Debug, Deserialize)]
struct WeightEntry {
    attribute: String,
    weight: f32,
}
