//! Per-agent outfit policies

use serde::{Deserialize, Serialize};

use crate::attributes::priority::AttributePriority;
use crate::core::types::TempRange;

/// Outfit configuration the scorer understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitPolicy {
    pub priorities: Vec<AttributePriority>,
    /// Blend in attribute weights derived from the agent's occupations
    pub auto_occupation_weights: bool,
    /// Derive the target window from the seasonal temperature
    pub auto_temperature: bool,
    /// Half-width of the derived target window
    pub auto_temperature_offset: f32,
    /// Target window used when `auto_temperature` is off
    pub target_temperature: TempRange,
    pub penalty_worn_by_corpse: bool,
}

impl Default for OutfitPolicy {
    fn default() -> Self {
        Self {
            priorities: Vec::new(),
            auto_occupation_weights: false,
            auto_temperature: false,
            auto_temperature_offset: 20.0,
            target_temperature: TempRange::new(-100.0, 100.0),
            penalty_worn_by_corpse: true,
        }
    }
}

impl OutfitPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target comfort window for the given seasonal temperature
    pub fn target_window(&self, seasonal_temperature: f32) -> TempRange {
        if self.auto_temperature {
            TempRange::around(seasonal_temperature, self.auto_temperature_offset)
        } else {
            self.target_temperature
        }
    }
}

/// Policy attached to an agent by the host
///
/// Only `Extended` carries the data the scorer needs. Any other kind is
/// reported as unsupported and scores neutrally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyKind {
    Extended(OutfitPolicy),
    /// A plain host policy without scoring preferences
    Basic { label: String },
}

impl PolicyKind {
    pub fn as_extended(&self) -> Option<&OutfitPolicy> {
        match self {
            PolicyKind::Extended(policy) => Some(policy),
            PolicyKind::Basic { .. } => None,
        }
    }

    pub fn as_extended_mut(&mut self) -> Option<&mut OutfitPolicy> {
        match self {
            PolicyKind::Extended(policy) => Some(policy),
            PolicyKind::Basic { .. } => None,
        }
    }
}
