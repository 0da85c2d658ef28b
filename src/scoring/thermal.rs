//! Thermal comfort contribution of a candidate garment
//!
//! Putting a garment on shifts the wearer's comfortable temperature window
//! and takes off whatever it conflicts with. The cold and heat bounds are
//! scored separately: moving a bound towards the target is a benefit, moving
//! it away a loss, and movement past the target earns nothing.

use crate::core::curve::SimpleCurve;
use crate::core::types::TempRange;
use crate::entity::agent::Agent;
use crate::entity::garment::{can_wear_together, Garment};

/// Per-bound benefits and the resulting score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalAssessment {
    pub current: TempRange,
    pub candidate: TempRange,
    pub target: TempRange,
    pub cold_benefit: f32,
    pub heat_benefit: f32,
    pub score: f32,
}

/// Comfort window the agent would have after swapping in `garment`
pub fn candidate_range(agent: &Agent, garment: &Garment) -> TempRange {
    let mut range = agent.comfort;
    range.min += garment.def.thermal.min_shift();
    range.max += garment.def.thermal.max_shift();

    for worn in agent
        .worn
        .iter()
        .filter(|worn| !can_wear_together(&garment.def, &worn.def, &agent.body))
    {
        range.min -= worn.def.thermal.min_shift();
        range.max -= worn.def.thermal.max_shift();
    }

    range
}

/// Benefit of moving the cold bound from `current` to `candidate`
///
/// Positive when the bound drops towards a colder target.
pub fn cold_benefit(current: f32, candidate: f32, target: f32) -> f32 {
    if candidate < current {
        if current <= target {
            0.0
        } else if candidate <= target {
            current - target
        } else {
            current - candidate
        }
    } else if candidate <= target {
        0.0
    } else if current <= target {
        target - candidate
    } else {
        current - candidate
    }
}

/// Benefit of moving the heat bound from `current` to `candidate`
///
/// Positive when the bound rises towards a hotter target.
pub fn heat_benefit(current: f32, candidate: f32, target: f32) -> f32 {
    if candidate < current {
        if current < target {
            candidate - current
        } else if candidate < target {
            candidate - target
        } else {
            0.0
        }
    } else if candidate < target {
        candidate - current
    } else if current < target {
        target - current
    } else {
        0.0
    }
}

/// Score the thermal effect of wearing `garment`
///
/// Returns `None` when the agent already wears it: its effect is already
/// part of the current comfort window.
pub fn assess(
    agent: &Agent,
    garment: &Garment,
    target: TempRange,
    curve: &SimpleCurve,
) -> Option<ThermalAssessment> {
    if agent.is_wearing(garment.id) {
        return None;
    }

    let current = agent.comfort;
    let candidate = candidate_range(agent, garment);
    let cold = cold_benefit(current.min, candidate.min, target.min);
    let heat = heat_benefit(current.max, candidate.max, target.max);

    Some(ThermalAssessment {
        current,
        candidate,
        target,
        cold_benefit: cold,
        heat_benefit: heat,
        score: curve.evaluate(cold) + curve.evaluate(heat),
    })
}

/// Thermal score contribution, 0 for garments already worn
pub fn thermal_comfort_score(
    agent: &Agent,
    garment: &Garment,
    target: TempRange,
    curve: &SimpleCurve,
) -> f32 {
    assess(agent, garment, target, curve).map_or(0.0, |assessment| assessment.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ScoringConfig;
    use crate::core::types::{BodyGroup, Layer};
    use crate::entity::garment::{GarmentDef, ThermalProfile};
    use std::sync::Arc;

    fn shell(name: &str, cold: f32, heat: f32) -> Garment {
        Garment::new(Arc::new(
            GarmentDef::new(name)
                .with_coverage(&[BodyGroup::Torso, BodyGroup::Arms], &[Layer::Shell])
                .with_thermal(ThermalProfile::new(cold, heat)),
        ))
    }

    fn agent() -> Agent {
        let mut agent = Agent::new("Mara");
        agent.comfort = TempRange::new(10.0, 30.0);
        agent
    }

    #[test]
    fn test_cold_benefit_towards_target() {
        // 10 -> 5 with target 0: full move counts
        assert_eq!(cold_benefit(10.0, 5.0, 0.0), 5.0);
        // 10 -> -5 with target 0: only up to the target
        assert_eq!(cold_benefit(10.0, -5.0, 0.0), 10.0);
        // already past the target
        assert_eq!(cold_benefit(-2.0, -8.0, 0.0), 0.0);
    }

    #[test]
    fn test_cold_regression() {
        // 10 -> 14 with target 0: losing 4 degrees of cold comfort
        assert_eq!(cold_benefit(10.0, 14.0, 0.0), -4.0);
        // -5 -> 3 with target 0: crosses the target, loss counted from it
        assert_eq!(cold_benefit(-5.0, 3.0, 0.0), -3.0);
        // still on the target side
        assert_eq!(cold_benefit(-5.0, -1.0, 0.0), 0.0);
    }

    #[test]
    fn test_heat_benefit() {
        assert_eq!(heat_benefit(30.0, 33.0, 40.0), 3.0);
        assert_eq!(heat_benefit(30.0, 45.0, 40.0), 10.0);
        assert_eq!(heat_benefit(42.0, 50.0, 40.0), 0.0);
        assert_eq!(heat_benefit(30.0, 27.0, 40.0), -3.0);
        assert_eq!(heat_benefit(45.0, 36.0, 40.0), -4.0);
        assert_eq!(heat_benefit(45.0, 41.0, 40.0), 0.0);
    }

    #[test]
    fn test_worn_garment_contributes_nothing() {
        let curve = ScoringConfig::default().insulation_curve;
        let parka = shell("parka", 20.0, 0.0);
        let mut agent = agent();
        agent.worn.push(parka.clone());
        assert_eq!(thermal_comfort_score(&agent, &parka, TempRange::new(-20.0, 30.0), &curve), 0.0);
    }

    #[test]
    fn test_candidate_range_swaps_out_exclusive_garments() {
        let mut agent = agent();
        agent.worn.push(shell("jacket", 6.0, 1.0));
        let parka = shell("parka", 20.0, 0.0);

        let range = candidate_range(&agent, &parka);
        assert_eq!(range.min, 10.0 - 20.0 + 6.0);
        assert_eq!(range.max, 30.0 - 1.0);
    }

    #[test]
    fn test_insulating_garment_scores_in_cold_target() {
        let curve = ScoringConfig::default().insulation_curve;
        let agent = agent();
        let parka = shell("parka", 10.0, 0.0);

        let assessment = assess(&agent, &parka, TempRange::new(-20.0, 30.0), &curve).unwrap();
        assert_eq!(assessment.cold_benefit, 10.0);
        assert_eq!(assessment.heat_benefit, 0.0);
        assert_eq!(assessment.score, 2.0);
    }
}
