//! Garment definitions and instances
//!
//! A `GarmentDef` is the static catalog entry shared by every instance of a
//! kind of garment. A `Garment` is one physical item with its own
//! durability, quality and history.

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{
    AttributeId, BodyGroup, Gender, GarmentDefId, GarmentId, Layer, MaterialId, OwnershipClass,
    QualityTier,
};
use crate::entity::agent::Body;

/// Effect of a garment on the wearer's comfortable temperature window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalProfile {
    /// Degrees the comfortable minimum drops by
    pub insulation_cold: f32,
    /// Degrees the comfortable maximum rises by
    pub insulation_heat: f32,
    /// Direct offset to the comfortable minimum
    pub comfy_min_offset: f32,
    /// Direct offset to the comfortable maximum
    pub comfy_max_offset: f32,
}

impl ThermalProfile {
    pub fn new(insulation_cold: f32, insulation_heat: f32) -> Self {
        Self {
            insulation_cold,
            insulation_heat,
            ..Default::default()
        }
    }

    /// Shift applied to the comfortable minimum when worn
    pub fn min_shift(&self) -> f32 {
        -self.insulation_cold + self.comfy_min_offset
    }

    /// Shift applied to the comfortable maximum when worn
    pub fn max_shift(&self) -> f32 {
        self.insulation_heat + self.comfy_max_offset
    }

    pub fn is_finite(&self) -> bool {
        self.insulation_cold.is_finite()
            && self.insulation_heat.is_finite()
            && self.comfy_min_offset.is_finite()
            && self.comfy_max_offset.is_finite()
    }
}

/// Static catalog entry for a kind of garment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarmentDef {
    pub id: GarmentDefId,
    /// Base attribute values defined by this garment
    pub stat_bases: AHashMap<AttributeId, f32>,
    /// Attribute offsets granted to the wearer
    pub equipped_offsets: Vec<(AttributeId, f32)>,
    /// Flat score adjustment for this kind of garment
    pub score_offset: f32,
    pub body_groups: Vec<BodyGroup>,
    pub layers: Vec<Layer>,
    /// Gender the garment is made for, `None` for any
    pub gender: Option<Gender>,
    pub blocks_vision: bool,
    /// Ownership class the garment is reserved for
    pub restricted_to: Option<OwnershipClass>,
    pub uses_durability: bool,
    pub thermal: ThermalProfile,
}

impl GarmentDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: GarmentDefId::new(id),
            uses_durability: true,
            ..Default::default()
        }
    }

    pub fn with_stat(mut self, attribute: AttributeId, value: f32) -> Self {
        self.stat_bases.insert(attribute, value);
        self
    }

    pub fn with_offset(mut self, attribute: AttributeId, value: f32) -> Self {
        self.equipped_offsets.push((attribute, value));
        self
    }

    pub fn with_coverage(mut self, groups: &[BodyGroup], layers: &[Layer]) -> Self {
        self.body_groups = groups.to_vec();
        self.layers = layers.to_vec();
        self
    }

    pub fn with_thermal(mut self, thermal: ThermalProfile) -> Self {
        self.thermal = thermal;
        self
    }

    /// Offset granted to the wearer for `attribute`, 0 if none
    pub fn equipped_offset(&self, attribute: AttributeId) -> f32 {
        self.equipped_offsets
            .iter()
            .filter(|(id, _)| *id == attribute)
            .map(|(_, value)| *value)
            .sum()
    }

    /// True if this definition sets or offsets `attribute`
    pub fn defines(&self, attribute: AttributeId) -> bool {
        self.stat_bases.contains_key(&attribute)
            || self.equipped_offsets.iter().any(|(id, _)| *id == attribute)
    }

    /// True when every numeric field of the definition is finite
    pub fn is_finite(&self) -> bool {
        self.score_offset.is_finite()
            && self.thermal.is_finite()
            && self.stat_bases.values().all(|value| value.is_finite())
            && self.equipped_offsets.iter().all(|(_, value)| value.is_finite())
    }

    /// Whether a wearer of the given gender is suited to this garment
    pub fn suits_gender(&self, gender: Option<Gender>) -> bool {
        match (self.gender, gender) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(made_for), Some(wearer)) => made_for == wearer,
        }
    }
}

/// Whether two garments can be worn at the same time on `body`
///
/// Garments conflict when they share a layer and overlap on a body group
/// the body actually has.
pub fn can_wear_together(a: &GarmentDef, b: &GarmentDef, body: &Body) -> bool {
    let shares_layer = a.layers.iter().any(|layer| b.layers.contains(layer));
    if !shares_layer {
        return true;
    }
    !a.body_groups
        .iter()
        .any(|group| b.body_groups.contains(group) && body.has_group(*group))
}

/// Current and maximum durability of a garment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durability {
    pub current: f32,
    pub max: f32,
}

impl Durability {
    pub fn new(current: f32, max: f32) -> Self {
        Self { current, max }
    }

    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// A physical garment in the shared pool
#[derive(Debug, Clone)]
pub struct Garment {
    pub id: GarmentId,
    pub def: Arc<GarmentDef>,
    /// Instance attribute values overriding the definition (quality, damage...)
    pub stats: AHashMap<AttributeId, f32>,
    pub durability: Durability,
    pub quality: Option<QualityTier>,
    pub material: Option<MaterialId>,
    pub worn_by_corpse: bool,
    /// Garment-specific bonus or penalty supplied by the host
    pub special_offset: Option<f32>,
}

impl Garment {
    pub fn new(def: Arc<GarmentDef>) -> Self {
        Self {
            id: GarmentId::new(),
            def,
            stats: AHashMap::new(),
            durability: Durability::full(100.0),
            quality: None,
            material: None,
            worn_by_corpse: false,
            special_offset: None,
        }
    }

    pub fn with_durability(mut self, current: f32, max: f32) -> Self {
        self.durability = Durability::new(current, max);
        self
    }

    pub fn with_quality(mut self, quality: QualityTier) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_stat(mut self, attribute: AttributeId, value: f32) -> Self {
        self.stats.insert(attribute, value);
        self
    }

    /// True when the instance and its definition hold only finite numbers
    pub fn is_finite(&self) -> bool {
        self.def.is_finite()
            && self.durability.current.is_finite()
            && self.durability.max.is_finite()
            && self.stats.values().all(|value| value.is_finite())
            && self.special_offset.map_or(true, f32::is_finite)
    }

    /// Effective value of `attribute` before equipped offsets
    ///
    /// Instance values win over definition values, which win over the
    /// attribute's baseline.
    pub fn stat_value(&self, attribute: AttributeId, baseline: f32) -> f32 {
        self.stats
            .get(&attribute)
            .or_else(|| self.def.stat_bases.get(&attribute))
            .copied()
            .unwrap_or(baseline)
    }

    /// `value + offset - baseline` for `attribute`
    pub fn deviation(&self, attribute: AttributeId, baseline: f32) -> f32 {
        self.stat_value(attribute, baseline) + self.def.equipped_offset(attribute) - baseline
    }
}
