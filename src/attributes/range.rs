//! Attribute range tracking and normalization
//!
//! Raw attribute deviations are not comparable across attributes: armor is
//! measured in fractions, movement speed in tiles per second, insulation in
//! degrees. Each attribute therefore keeps the range of deviations seen so
//! far and values are normalized against it:
//!
//! - range entirely below zero: [-1, 0]
//! - range straddling zero: [-1, 1]
//! - otherwise: [0, 1]
//!
//! Attributes that can hurt get a signed scale so their contribution can be
//! negative. Ranges only ever widen.

use std::sync::{Arc, Mutex, RwLock};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::attributes::catalog::AttributeCatalog;
use crate::core::config::config;
use crate::core::error::{OutfitError, Result};
use crate::core::types::AttributeId;
use crate::entity::garment::GarmentDef;

/// Observed `[min, max]` of deviations for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub min: f32,
    pub max: f32,
}

impl AttributeRange {
    /// Range containing a single value
    pub fn point(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Extend the range to include `value`. Returns true if it changed.
    pub fn widen(&mut self, value: f32) -> bool {
        let mut changed = false;
        if value < self.min {
            self.min = value;
            changed = true;
        }
        if value > self.max {
            self.max = value;
            changed = true;
        }
        changed
    }

    /// Position of `deviation` within this range
    ///
    /// Returns 0 while the range is narrower than `tolerance`.
    pub fn normalize(&self, deviation: f32, tolerance: f32) -> f32 {
        let span = self.span();
        if span < tolerance {
            return 0.0;
        }
        if self.min < 0.0 && self.max < 0.0 {
            -1.0 + (deviation - self.min) / span
        } else if self.min < 0.0 && self.max > 0.0 {
            -1.0 + 2.0 * ((deviation - self.min) / span)
        } else {
            (deviation - self.min) / span
        }
    }
}

/// Something that turns attribute deviations into normalized values
pub trait RangeSource: Send + Sync {
    fn normalize(&self, attribute: AttributeId, deviation: f32) -> Result<f32>;
}

/// Adaptive range table shared by every evaluation
///
/// Each attribute's range sits behind its own mutex so concurrent
/// evaluations widen different attributes without contention, and widen
/// the same attribute without losing updates.
pub struct RangeTable {
    ranges: RwLock<AHashMap<AttributeId, Arc<Mutex<AttributeRange>>>>,
    tolerance: f32,
}

impl RangeTable {
    /// Create an empty table using the global range tolerance
    pub fn new() -> Self {
        Self::with_tolerance(config().range_tolerance)
    }

    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            ranges: RwLock::new(AHashMap::new()),
            tolerance,
        }
    }

    /// Rebuild a table from a snapshot
    pub fn from_snapshot(entries: Vec<(AttributeId, AttributeRange)>, tolerance: f32) -> Self {
        let ranges = entries
            .into_iter()
            .map(|(id, range)| (id, Arc::new(Mutex::new(range))))
            .collect();
        Self {
            ranges: RwLock::new(ranges),
            tolerance,
        }
    }

    pub fn from_json(json: &str, tolerance: f32) -> Result<Self> {
        let entries: Vec<(AttributeId, AttributeRange)> = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(entries, tolerance))
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Current range of `attribute`, if it has been observed
    pub fn range(&self, attribute: AttributeId) -> Result<Option<AttributeRange>> {
        let slot = {
            let ranges = self.ranges.read().map_err(|_| OutfitError::LockPoisoned)?;
            ranges.get(&attribute).cloned()
        };
        match slot {
            Some(slot) => {
                let range = slot.lock().map_err(|_| OutfitError::LockPoisoned)?;
                Ok(Some(*range))
            }
            None => Ok(None),
        }
    }

    /// Widen the range of `attribute` to include `deviation` and return it
    pub fn observe(&self, attribute: AttributeId, deviation: f32) -> Result<AttributeRange> {
        if !deviation.is_finite() {
            return Err(OutfitError::InvalidArgument(format!(
                "non-finite deviation {} for {:?}",
                deviation, attribute
            )));
        }

        let slot = self.slot(attribute, deviation)?;
        let mut range = slot.lock().map_err(|_| OutfitError::LockPoisoned)?;
        let before = *range;
        if range.widen(deviation) {
            tracing::trace!(
                "Widened range of {:?} from [{:.2}, {:.2}] to [{:.2}, {:.2}]",
                attribute,
                before.min,
                before.max,
                range.min,
                range.max
            );
        }
        Ok(*range)
    }

    /// Ordered `(attribute, range)` pairs for persistence
    pub fn snapshot(&self) -> Result<Vec<(AttributeId, AttributeRange)>> {
        let slots: Vec<(AttributeId, Arc<Mutex<AttributeRange>>)> = {
            let ranges = self.ranges.read().map_err(|_| OutfitError::LockPoisoned)?;
            ranges.iter().map(|(id, slot)| (*id, Arc::clone(slot))).collect()
        };

        let mut entries = Vec::with_capacity(slots.len());
        for (id, slot) in slots {
            let range = slot.lock().map_err(|_| OutfitError::LockPoisoned)?;
            entries.push((id, *range));
        }
        entries.sort_by_key(|(id, _)| *id);
        Ok(entries)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot()?)?)
    }

    /// Number of attributes with a range
    pub fn len(&self) -> Result<usize> {
        let ranges = self.ranges.read().map_err(|_| OutfitError::LockPoisoned)?;
        Ok(ranges.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Slot for `attribute`, created at `initial` if missing
    fn slot(&self, attribute: AttributeId, initial: f32) -> Result<Arc<Mutex<AttributeRange>>> {
        {
            let ranges = self.ranges.read().map_err(|_| OutfitError::LockPoisoned)?;
            if let Some(slot) = ranges.get(&attribute) {
                return Ok(Arc::clone(slot));
            }
        }

        let mut ranges = self.ranges.write().map_err(|_| OutfitError::LockPoisoned)?;
        let slot = ranges.entry(attribute).or_insert_with(|| {
            tracing::trace!("Initializing range of {:?} at {:.2}", attribute, initial);
            Arc::new(Mutex::new(AttributeRange::point(initial)))
        });
        Ok(Arc::clone(slot))
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeSource for RangeTable {
    fn normalize(&self, attribute: AttributeId, deviation: f32) -> Result<f32> {
        let range = self.observe(attribute, deviation)?;
        Ok(range.normalize(deviation, self.tolerance))
    }
}

/// Ranges precomputed once from the full garment catalog
///
/// Used before enough garments have been seen for the adaptive table to
/// be meaningful. Never widens.
#[derive(Debug, Clone, Default)]
pub struct StaticRangeTable {
    ranges: AHashMap<AttributeId, AttributeRange>,
    tolerance: f32,
}

impl StaticRangeTable {
    /// Scan every garment definition for every catalog attribute
    pub fn from_definitions<'a, I>(
        definitions: I,
        catalog: &AttributeCatalog,
        tolerance: f32,
    ) -> Self
    where
        I: IntoIterator<Item = &'a GarmentDef>,
    {
        let definitions: Vec<&GarmentDef> = definitions.into_iter().collect();
        let mut ranges = AHashMap::new();

        for attribute in catalog.iter() {
            let mut range: Option<AttributeRange> = None;
            for def in definitions.iter().filter(|def| def.defines(attribute.id)) {
                let base = def.stat_bases.get(&attribute.id).copied().unwrap_or(attribute.baseline);
                let deviation = base + def.equipped_offset(attribute.id) - attribute.baseline;
                match range.as_mut() {
                    Some(range) => {
                        range.widen(deviation);
                    }
                    None => range = Some(AttributeRange::point(deviation)),
                }
            }
            if let Some(range) = range {
                ranges.insert(attribute.id, range);
            }
        }

        Self { ranges, tolerance }
    }

    pub fn range(&self, attribute: AttributeId) -> Option<AttributeRange> {
        self.ranges.get(&attribute).copied()
    }
}

impl RangeSource for StaticRangeTable {
    fn normalize(&self, attribute: AttributeId, deviation: f32) -> Result<f32> {
        if !deviation.is_finite() {
            return Err(OutfitError::InvalidArgument(format!(
                "non-finite deviation {} for {:?}",
                deviation, attribute
            )));
        }
        let Some(range) = self.ranges.get(&attribute) else {
            return Ok(0.0);
        };
        if range.span() < self.tolerance || deviation.abs() < self.tolerance {
            return Ok(0.0);
        }
        Ok(range.normalize(deviation, self.tolerance))
    }
}
