//! Derive attribute weights from an agent's occupations
//!
//! Occupations are weighted by rank, not by raw priority value: the most
//! important active occupation (lowest priority number) gets a multiplier
//! of 1 and the others fall off towards 0. Attributes wanted by several
//! occupations average their weights instead of compounding.

use crate::attributes::priority::AttributePriority;
use crate::core::types::AttributeId;
use crate::entity::agent::OccupationPriority;
use crate::occupation::weights::OccupationWeights;

/// Multiplier for an occupation at `priority` among active priorities in `[min, max]`
pub fn priority_multiplier(priority: i32, min: i32, max: i32) -> f32 {
    if min == max {
        return 1.0;
    }
    // Widened so extreme priorities cannot overflow
    let offset = i64::from(priority) - i64::from(min);
    let span = i64::from(max) - i64::from(min) + 1;
    (1.0 - offset as f64 / span as f64) as f32
}

/// Averaged attribute weights across the agent's active occupations
///
/// Attributes are returned in order of first appearance.
pub fn occupation_priorities(
    occupations: &[OccupationPriority],
    tables: &OccupationWeights,
) -> Vec<AttributePriority> {
    let active: Vec<&OccupationPriority> = occupations.iter().filter(|o| o.is_active()).collect();

    let (min, max) = match (
        active.iter().map(|o| o.priority).min(),
        active.iter().map(|o| o.priority).max(),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => return Vec::new(),
    };

    // attribute -> (sum, count), kept in first-appearance order
    let mut totals: Vec<(AttributeId, f32, u32)> = Vec::new();
    for occupation in active {
        let multiplier = priority_multiplier(occupation.priority, min, max);
        for weight in tables.weights(&occupation.occupation) {
            let scaled = weight.weight * multiplier;
            match totals.iter_mut().find(|(id, _, _)| *id == weight.attribute) {
                Some(entry) => {
                    entry.1 += scaled;
                    entry.2 += 1;
                }
                None => totals.push((weight.attribute, scaled, 1)),
            }
        }
    }

    totals
        .into_iter()
        .map(|(attribute, sum, count)| AttributePriority::new(attribute, sum / count as f32))
        .collect()
}
