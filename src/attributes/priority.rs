//! Attribute priorities and the weight resolver
//!
//! A policy lists which attributes matter and how much. Before scoring,
//! the explicit list is merged with occupation-derived weights and rescaled
//! so the absolute weights always sum to the configured budget.

use serde::{Deserialize, Serialize};

use crate::attributes::catalog::AttributeCatalog;
use crate::core::types::AttributeId;
use crate::entity::agent::Agent;
use crate::occupation::aggregate::occupation_priorities;
use crate::occupation::weights::OccupationWeights;

/// How much an attribute matters to a policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributePriority {
    pub attribute: AttributeId,
    pub weight: f32,
    /// Weight last installed as default, used to detect user customization
    #[serde(default)]
    pub default: Option<f32>,
}

impl AttributePriority {
    pub fn new(attribute: AttributeId, weight: f32) -> Self {
        Self {
            attribute,
            weight,
            default: None,
        }
    }

    pub fn with_default(attribute: AttributeId, weight: f32, default: f32) -> Self {
        Self {
            attribute,
            weight,
            default: Some(default),
        }
    }
}

/// Merges explicit and occupation-derived priorities into a weight vector
pub struct PriorityResolver<'a> {
    occupations: &'a OccupationWeights,
    total_weight_budget: f32,
}

impl<'a> PriorityResolver<'a> {
    pub fn new(occupations: &'a OccupationWeights, total_weight_budget: f32) -> Self {
        Self {
            occupations,
            total_weight_budget,
        }
    }

    /// Resolve the priorities used to score garments for `agent`
    ///
    /// Attributes present in both the explicit and the occupation list get
    /// the average of both weights. The result carries no defaults.
    pub fn resolve(
        &self,
        agent: &Agent,
        explicit: &[AttributePriority],
        auto_occupation_weights: bool,
    ) -> Vec<AttributePriority> {
        if explicit.is_empty() && !auto_occupation_weights {
            return Vec::new();
        }

        let mut resolved: Vec<AttributePriority> = explicit
            .iter()
            .map(|priority| AttributePriority::new(priority.attribute, priority.weight))
            .collect();

        if auto_occupation_weights {
            for derived in occupation_priorities(&agent.occupations, self.occupations) {
                match resolved.iter_mut().find(|p| p.attribute == derived.attribute) {
                    Some(existing) => existing.weight = (existing.weight + derived.weight) / 2.0,
                    None => resolved.push(derived),
                }
            }
        }

        normalize_weights(&mut resolved, self.total_weight_budget);
        resolved
    }
}

/// Scale weights so their absolute values sum to `budget`
///
/// A zero sum leaves the weights untouched.
pub fn normalize_weights(priorities: &mut [AttributePriority], budget: f32) {
    let weight_sum: f32 = priorities.iter().map(|p| p.weight.abs()).sum();
    if weight_sum <= 0.0 {
        return;
    }
    let scale = budget / weight_sum;
    for priority in priorities.iter_mut() {
        priority.weight *= scale;
    }
}

/// Install or update the default weight of `attribute`
///
/// A weight still equal to its previous default follows the new default.
/// A customized weight (or one that never had a default) is kept and only
/// the stored default changes.
pub fn set_default_priority(
    priorities: &mut Vec<AttributePriority>,
    attribute: AttributeId,
    default_weight: f32,
    tolerance: f32,
) {
    match priorities.iter_mut().find(|p| p.attribute == attribute) {
        Some(priority) => {
            let unmodified = priority
                .default
                .is_some_and(|previous| (priority.weight - previous).abs() < tolerance);
            if unmodified {
                priority.weight = default_weight;
            }
            priority.default = Some(default_weight);
        }
        None => priorities.push(AttributePriority::with_default(
            attribute,
            default_weight,
            default_weight,
        )),
    }
}

/// `set_default_priority` by attribute name
///
/// Unknown names are logged and skipped. Returns whether anything changed.
pub fn set_default_priority_by_name(
    priorities: &mut Vec<AttributePriority>,
    catalog: &AttributeCatalog,
    name: &str,
    default_weight: f32,
    tolerance: f32,
) -> bool {
    let Some(attribute) = catalog.id_by_name(name) else {
        tracing::warn!("Could not find garment attribute named '{}'", name);
        return false;
    };
    set_default_priority(priorities, attribute, default_weight, tolerance);
    true
}
