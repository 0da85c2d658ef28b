//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an attribute in the attribute catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttributeId(pub u32);

impl AttributeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for a garment instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GarmentId(pub Uuid);

impl GarmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GarmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier for an occupation (work type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupationId(pub String);

impl OccupationId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Identifier for a garment material (leather, cloth, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Identifier for a garment definition (the kind of garment, not the instance)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GarmentDefId(pub String);

impl GarmentDefId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Named group of body parts a garment can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyGroup {
    Head,
    UpperHead,
    Eyes,
    Torso,
    Shoulders,
    Arms,
    Hands,
    Legs,
    Feet,
    Waist,
}

/// Layer a garment occupies on the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Skin,
    Middle,
    Shell,
    Belt,
    Overhead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Ordinal craftsmanship rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum QualityTier {
    Awful = 0,
    Poor = 1,
    Normal = 2,
    Good = 3,
    Excellent = 4,
    Masterwork = 5,
    Legendary = 6,
}

/// Ownership class of an agent (free colonist, slave, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnershipClass {
    Free,
    Slave,
    Prisoner,
}

/// Closed temperature interval in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TempRange {
    pub min: f32,
    pub max: f32,
}

impl TempRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Window centered on `center`, `offset` degrees to each side
    pub fn around(center: f32, offset: f32) -> Self {
        Self {
            min: center - offset,
            max: center + offset,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_ordering() {
        assert!(QualityTier::Awful < QualityTier::Normal);
        assert!(QualityTier::Legendary > QualityTier::Masterwork);
    }

    #[test]
    fn test_temp_range_around() {
        let range = TempRange::around(10.0, 5.0);
        assert_eq!(range.min, 5.0);
        assert_eq!(range.max, 15.0);
    }

    #[test]
    fn test_garment_ids_unique() {
        assert_ne!(GarmentId::new(), GarmentId::new());
    }
}
