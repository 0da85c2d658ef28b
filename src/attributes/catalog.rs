//! Attribute catalog - names and baselines of every garment attribute

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{OutfitError, Result};
use crate::core::types::AttributeId;

/// A named numeric garment characteristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    /// Value a garment has when it does not define this attribute
    pub baseline: f32,
}

/// Registry of known attributes
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    attributes: AHashMap<AttributeId, Attribute>,
    by_name: AHashMap<String, AttributeId>,
    next_id: u32,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute and return its ID
    ///
    /// Registering a name twice returns the existing ID and updates its baseline.
    pub fn register(&mut self, name: impl Into<String>, baseline: f32) -> AttributeId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            if let Some(attribute) = self.attributes.get_mut(&id) {
                attribute.baseline = baseline;
            }
            return id;
        }

        let id = AttributeId(self.next_id);
        self.next_id += 1;
        self.by_name.insert(name.clone(), id);
        self.attributes.insert(id, Attribute { id, name, baseline });
        id
    }

    pub fn get(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(&id)
    }

    pub fn id_by_name(&self, name: &str) -> Option<AttributeId> {
        self.by_name.get(name).copied()
    }

    /// Baseline of `id`, failing for attributes not in the catalog
    pub fn baseline(&self, id: AttributeId) -> Result<f32> {
        self.attributes
            .get(&id)
            .map(|attribute| attribute.baseline)
            .ok_or_else(|| OutfitError::UnknownAttribute(format!("{:?}", id)))
    }

    /// Iterate attributes in ID order
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        let mut attributes: Vec<&Attribute> = self.attributes.values().collect();
        attributes.sort_by_key(|attribute| attribute.id);
        attributes.into_iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
