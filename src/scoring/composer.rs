//! Garment score composition
//!
//! The score starts from a base term (constant + garment offset + weighted
//! normalized attributes) and is then folded through the modifier pipeline
//! in a fixed order:
//!
//! 1. durability factor
//! 2. special offset hook
//! 3. vision blocking penalty (toggle)
//! 4. thermal comfort
//! 5. corpse-worn penalty
//! 6. material reactions
//! 7. gender mismatch
//! 8. role requirements, then minimum quality
//! 9. ownership restriction (toggle)
//!
//! Order matters: the conditional rescales in steps 5 and 6 only apply if
//! the running score is still positive, and every multiplicative step
//! scales whatever the additive steps before it produced.

use std::cmp::Reverse;
use std::sync::{Arc, Once};

use ordered_float::OrderedFloat;

use crate::attributes::catalog::AttributeCatalog;
use crate::attributes::priority::{AttributePriority, PriorityResolver};
use crate::attributes::range::RangeSource;
use crate::core::config::{config, RoleBonusMode, ScoringConfig};
use crate::core::error::{OutfitError, Result};
use crate::core::types::{AttributeId, GarmentId};
use crate::entity::agent::Agent;
use crate::entity::garment::Garment;
use crate::entity::policy::OutfitPolicy;
use crate::occupation::weights::OccupationWeights;
use crate::scoring::thermal;

static MISSING_POLICY: Once = Once::new();

/// Conditions outside the agent that affect scoring
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Environment {
    /// Seasonal outdoor temperature where the agent lives
    pub seasonal_temperature: f32,
}

impl Environment {
    pub fn new(seasonal_temperature: f32) -> Self {
        Self { seasonal_temperature }
    }
}

/// Host-supplied bonus or penalty for specific garments
pub trait SpecialOffsetHook: Send + Sync {
    fn special_offset(&self, garment: &Garment) -> f32;
}

impl<F> SpecialOffsetHook for F
where
    F: Fn(&Garment) -> f32 + Send + Sync,
{
    fn special_offset(&self, garment: &Garment) -> f32 {
        self(garment)
    }
}

/// Role requirement status of a garment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Required,
    Allowed,
    Neither,
}

/// Computes garment desirability for agents
pub struct ScoreComposer {
    config: ScoringConfig,
    catalog: Arc<AttributeCatalog>,
    occupations: Arc<OccupationWeights>,
    ranges: Arc<dyn RangeSource>,
    special_offset: Option<Box<dyn SpecialOffsetHook>>,
}

impl ScoreComposer {
    /// Create a composer using the global config
    pub fn new(
        catalog: Arc<AttributeCatalog>,
        occupations: Arc<OccupationWeights>,
        ranges: Arc<dyn RangeSource>,
    ) -> Self {
        Self {
            config: config().clone(),
            catalog,
            occupations,
            ranges,
            special_offset: None,
        }
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the garment's own special offset with a host hook
    pub fn with_special_offset_hook(mut self, hook: impl SpecialOffsetHook + 'static) -> Self {
        self.special_offset = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `garment` for `agent`
    ///
    /// Agents without an extended outfit policy score every garment 0.
    pub fn score(&self, agent: &Agent, garment: &Garment, env: &Environment) -> Result<f32> {
        validate_agent(agent, env)?;
        validate_garment(garment)?;

        let Some(policy) = agent.policy.as_ref().and_then(|policy| policy.as_extended()) else {
            MISSING_POLICY.call_once(|| {
                tracing::warn!(
                    "Agent '{}' has no extended outfit policy; scoring neutrally",
                    agent.name
                );
            });
            return Ok(0.0);
        };
        validate_policy(agent, policy)?;

        let resolver = PriorityResolver::new(&self.occupations, self.config.total_weight_budget);
        let priorities =
            resolver.resolve(agent, &policy.priorities, policy.auto_occupation_weights);

        let mut score = self.config.base_score
            + garment.def.score_offset
            + self.attribute_score(garment, &priorities)?;

        self.apply_durability(garment, &mut score);
        self.apply_special_offset(garment, &mut score);
        self.apply_vision_blocking(garment, &mut score);
        self.apply_thermal(agent, garment, policy, env, &mut score);
        self.apply_corpse_worn(agent, garment, policy, &mut score);
        self.apply_material(agent, garment, &mut score);
        self.apply_gender(agent, garment, &mut score);
        self.apply_requirements(agent, garment, &mut score);
        self.apply_quality(agent, garment, &mut score);
        self.apply_ownership(agent, garment, &mut score);

        tracing::debug!(
            "Total score of '{}' for '{}' = {:.2}",
            garment.def.id.0,
            agent.name,
            score
        );
        Ok(score)
    }

    /// Score the garment with `id` from `pool`
    pub fn score_by_id(
        &self,
        agent: &Agent,
        pool: &[Garment],
        id: GarmentId,
        env: &Environment,
    ) -> Result<f32> {
        let garment = pool.iter().find(|garment| garment.id == id).ok_or_else(|| {
            OutfitError::InvalidArgument(format!("garment {:?} not in pool", id.0))
        })?;
        self.score(agent, garment, env)
    }

    /// Scores of every worn garment, in wear order
    pub fn score_worn(&self, agent: &Agent, env: &Environment) -> Result<Vec<f32>> {
        agent
            .worn
            .iter()
            .map(|garment| self.score(agent, garment, env))
            .collect()
    }

    /// Candidates ordered by descending score, ties in pool order
    pub fn rank<'g>(
        &self,
        agent: &Agent,
        candidates: &'g [Garment],
        env: &Environment,
    ) -> Result<Vec<(&'g Garment, f32)>> {
        let mut scored = candidates
            .iter()
            .map(|garment| self.score(agent, garment, env).map(|score| (garment, score)))
            .collect::<Result<Vec<_>>>()?;
        scored.sort_by_key(|(_, score)| Reverse(OrderedFloat(*score)));
        Ok(scored)
    }

    /// Weighted sum of normalized attribute values
    ///
    /// Only the first priority for each attribute counts. Every attribute is
    /// looked up before any range is touched, so an unknown attribute leaves
    /// the range table as it was.
    fn attribute_score(&self, garment: &Garment, priorities: &[AttributePriority]) -> Result<f32> {
        let mut seen: Vec<AttributeId> = Vec::with_capacity(priorities.len());
        let mut resolved: Vec<(&AttributePriority, f32)> = Vec::with_capacity(priorities.len());
        for priority in priorities {
            if seen.contains(&priority.attribute) {
                continue;
            }
            seen.push(priority.attribute);
            resolved.push((priority, self.catalog.baseline(priority.attribute)?));
        }

        let mut total = 0.0;
        for (priority, baseline) in resolved {
            let deviation = garment.deviation(priority.attribute, baseline);
            let normalized = self.ranges.normalize(priority.attribute, deviation)?;
            let attribute_score = normalized * priority.weight;

            if attribute_score.abs() > 0.01 {
                tracing::debug!(
                    "Value of {:?} ({:.2}) = {:.2} dev, {:.2} norm, {:.2} score",
                    priority.attribute,
                    priority.weight,
                    deviation,
                    normalized,
                    attribute_score
                );
            }
            total += attribute_score;
        }

        tracing::debug!("Attribute score of '{}' = {:.2}", garment.def.id.0, total);
        Ok(total)
    }

    fn apply_durability(&self, garment: &Garment, score: &mut f32) {
        if !garment.def.uses_durability {
            return;
        }
        let factor = self.config.durability_curve.evaluate(garment.durability.fraction());
        tracing::debug!("Durability score factor = {:.2}", factor);
        *score *= factor;
    }

    fn apply_special_offset(&self, garment: &Garment, score: &mut f32) {
        let offset = match &self.special_offset {
            Some(hook) => hook.special_offset(garment),
            None => garment.special_offset.unwrap_or(0.0),
        };
        if offset != 0.0 {
            tracing::debug!("Special score offset = {:.2}", offset);
        }
        *score += offset;
    }

    fn apply_vision_blocking(&self, garment: &Garment, score: &mut f32) {
        if self.config.vision_blocking_enabled && garment.def.blocks_vision {
            *score -= self.config.vision_blocking_penalty;
        }
    }

    fn apply_thermal(
        &self,
        agent: &Agent,
        garment: &Garment,
        policy: &OutfitPolicy,
        env: &Environment,
        score: &mut f32,
    ) {
        let target = policy.target_window(env.seasonal_temperature);
        let Some(assessment) =
            thermal::assess(agent, garment, target, &self.config.insulation_curve)
        else {
            return;
        };

        tracing::debug!(
            "Thermal: target {:?}, current {:?}, candidate {:?}, \
             cold benefit {:.2}, heat benefit {:.2}, score {:.2}",
            assessment.target,
            assessment.current,
            assessment.candidate,
            assessment.cold_benefit,
            assessment.heat_benefit,
            assessment.score
        );
        *score += assessment.score;
    }

    fn apply_corpse_worn(
        &self,
        agent: &Agent,
        garment: &Garment,
        policy: &OutfitPolicy,
        score: &mut f32,
    ) {
        if !policy.penalty_worn_by_corpse
            || !garment.worn_by_corpse
            || !agent.minds_corpse_garments
        {
            return;
        }
        tracing::debug!("Penalizing garment worn by a corpse");
        *score -= self.config.corpse_penalty;
        if *score > 0.0 {
            *score *= self.config.corpse_factor;
        }
    }

    fn apply_material(&self, agent: &Agent, garment: &Garment, score: &mut f32) {
        let Some(material) = &garment.material else {
            return;
        };
        if agent.material_reactions.dislikes(material) {
            tracing::debug!("Penalizing disliked material '{}'", material.0);
            *score -= self.config.material_penalty;
            if *score > 0.0 {
                *score *= self.config.material_factor;
            }
        }
        if agent.material_reactions.likes(material) {
            tracing::debug!("Promoting liked material '{}'", material.0);
            *score += self.config.material_bonus;
        }
    }

    fn apply_gender(&self, agent: &Agent, garment: &Garment, score: &mut f32) {
        if !garment.def.suits_gender(agent.gender) {
            *score *= self.config.incorrect_gender_factor;
        }
    }

    fn apply_requirements(&self, agent: &Agent, garment: &Garment, score: &mut f32) {
        match requirement_status(agent, garment) {
            Requirement::Required => match self.config.role_bonus_mode {
                RoleBonusMode::Additive => *score += self.config.required_bonus,
                RoleBonusMode::Multiplicative => *score *= self.config.required_factor,
            },
            Requirement::Allowed => match self.config.role_bonus_mode {
                RoleBonusMode::Additive => *score += self.config.allowed_bonus,
                RoleBonusMode::Multiplicative => *score *= self.config.allowed_factor,
            },
            Requirement::Neither => {}
        }
    }

    fn apply_quality(&self, agent: &Agent, garment: &Garment, score: &mut f32) {
        let (Some(required), Some(quality)) = (agent.required_min_quality(), garment.quality) else {
            return;
        };
        if quality < required {
            *score *= self.config.low_quality_factor;
        }
    }

    fn apply_ownership(&self, agent: &Agent, garment: &Garment, score: &mut f32) {
        if !self.config.ownership_penalty_enabled {
            return;
        }
        if let Some(class) = garment.def.restricted_to {
            if class != agent.ownership {
                *score -= self.config.ownership_penalty;
            }
        }
    }
}

/// Whether any active role requires or allows `garment`
///
/// A requirement is only consulted when at least one requirement governs a
/// body group the garment covers. The first requirement that demands the
/// garment wins.
fn requirement_status(agent: &Agent, garment: &Garment) -> Requirement {
    if !agent.requirements().any(|requirement| requirement.covers(&garment.def)) {
        return Requirement::Neither;
    }

    let mut status = Requirement::Neither;
    for requirement in agent.requirements() {
        if requirement.required_for(&garment.def) {
            return Requirement::Required;
        }
        if requirement.allowed_for(&garment.def) {
            status = Requirement::Allowed;
        }
    }
    status
}

fn validate_agent(agent: &Agent, env: &Environment) -> Result<()> {
    if !agent.comfort.is_finite() {
        return Err(OutfitError::InvalidArgument(format!(
            "agent '{}' has a non-finite comfort window",
            agent.name
        )));
    }
    if !env.seasonal_temperature.is_finite() {
        return Err(OutfitError::InvalidArgument("non-finite seasonal temperature".into()));
    }
    // Worn garments feed the candidate comfort window
    if let Some(worn) = agent.worn.iter().find(|garment| !garment.def.thermal.is_finite()) {
        return Err(OutfitError::InvalidArgument(format!(
            "agent '{}' wears '{}' with a non-finite thermal profile",
            agent.name, worn.def.id.0
        )));
    }
    Ok(())
}

fn validate_policy(agent: &Agent, policy: &OutfitPolicy) -> Result<()> {
    let finite = policy.target_temperature.is_finite()
        && policy.auto_temperature_offset.is_finite()
        && policy.priorities.iter().all(|priority| priority.weight.is_finite());
    if !finite {
        return Err(OutfitError::InvalidArgument(format!(
            "outfit policy of agent '{}' has non-finite values",
            agent.name
        )));
    }
    Ok(())
}

fn validate_garment(garment: &Garment) -> Result<()> {
    let def = &garment.def;
    if def.uses_durability && !(garment.durability.max > 0.0) {
        return Err(OutfitError::InvalidArgument(format!(
            "garment '{}' tracks durability but has max {}",
            def.id.0, garment.durability.max
        )));
    }
    if !garment.is_finite() {
        return Err(OutfitError::InvalidArgument(format!(
            "garment '{}' has non-finite values",
            def.id.0
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::range::RangeTable;
    use crate::core::types::{
        BodyGroup, Gender, GarmentDefId, Layer, MaterialId, OwnershipClass, QualityTier, TempRange,
    };
    use crate::entity::agent::{GarmentRequirement, Role};
    use crate::entity::garment::{GarmentDef, ThermalProfile};
    use crate::entity::policy::PolicyKind;

    /// Composer with an empty catalog; attribute term is always 0
    fn composer() -> ScoreComposer {
        ScoreComposer::new(
            Arc::new(AttributeCatalog::new()),
            Arc::new(OccupationWeights::new()),
            Arc::new(RangeTable::with_tolerance(0.001)),
        )
        .with_config(ScoringConfig::default())
    }

    /// Agent whose target window matches its comfort window (no thermal effect)
    fn agent() -> Agent {
        let mut policy = OutfitPolicy::new();
        policy.target_temperature = TempRange::new(16.0, 26.0);
        let mut agent = Agent::new("Tove").with_policy(PolicyKind::Extended(policy));
        agent.comfort = TempRange::new(16.0, 26.0);
        agent
    }

    fn def(name: &str) -> GarmentDef {
        let mut def = GarmentDef::new(name).with_coverage(&[BodyGroup::Torso], &[Layer::Middle]);
        def.uses_durability = false;
        def
    }

    fn garment(def: GarmentDef) -> Garment {
        Garment::new(Arc::new(def))
    }

    fn env() -> Environment {
        Environment::new(20.0)
    }

    #[test]
    fn test_plain_garment_scores_base() {
        let score = composer().score(&agent(), &garment(def("shirt")), &env()).unwrap();
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_missing_policy_scores_zero() {
        let mut agent = agent();
        agent.policy = None;
        assert_eq!(composer().score(&agent, &garment(def("shirt")), &env()).unwrap(), 0.0);

        agent.policy = Some(PolicyKind::Basic { label: "anything".into() });
        assert_eq!(composer().score(&agent, &garment(def("shirt")), &env()).unwrap(), 0.0);
    }

    #[test]
    fn test_durability_factor() {
        let mut shirt = def("shirt");
        shirt.uses_durability = true;
        shirt.score_offset = 0.9;
        let worn_out = garment(shirt).with_durability(25.0, 100.0);

        let score = composer().score(&agent(), &worn_out, &env()).unwrap();
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_zero_max_durability_is_invalid() {
        let mut shirt = def("shirt");
        shirt.uses_durability = true;
        let broken = garment(shirt).with_durability(0.0, 0.0);
        assert!(matches!(
            composer().score(&agent(), &broken, &env()),
            Err(OutfitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_special_offset_hook_replaces_garment_offset() {
        let mut shirt = garment(def("shirt"));
        shirt.special_offset = Some(0.5);

        let plain = composer().score(&agent(), &shirt, &env()).unwrap();
        assert!((plain - 0.6).abs() < 1e-6);

        let hooked = composer()
            .with_special_offset_hook(|_: &Garment| 2.0_f32)
            .score(&agent(), &shirt, &env())
            .unwrap();
        assert!((hooked - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_vision_blocking_toggle() {
        let mut blindfold = def("blindfold");
        blindfold.blocks_vision = true;
        let blindfold = garment(blindfold);

        let score = composer().score(&agent(), &blindfold, &env()).unwrap();
        assert!((score + 0.9).abs() < 1e-6);

        let mut config = ScoringConfig::default();
        config.vision_blocking_enabled = false;
        let score = composer().with_config(config).score(&agent(), &blindfold, &env()).unwrap();
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_disliked_material_rescales_positive_score() {
        let mut agent = agent();
        let leather = MaterialId::new("human_leather");
        agent.material_reactions.disliked.insert(leather.clone());
        let mut def = def("vest");
        def.score_offset = 1.9;
        let vest = garment(def).with_material(leather);

        // (0.1 + 1.9 - 1.0) * 0.2
        let score = composer().score(&agent, &vest, &env()).unwrap();
        assert!((score - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_disliked_material_negative_score_not_rescaled() {
        let mut agent = agent();
        let leather = MaterialId::new("human_leather");
        agent.material_reactions.disliked.insert(leather.clone());
        agent.material_reactions.liked.insert(leather.clone());
        let vest = garment(def("vest")).with_material(leather);

        // 0.1 - 1.0 stays negative, then + 0.2 from the liked check
        let score = composer().score(&agent, &vest, &env()).unwrap();
        assert!((score + 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_corpse_penalty_requires_policy_flag() {
        let mut shirt = garment(def("shirt"));
        shirt.worn_by_corpse = true;

        let score = composer().score(&agent(), &shirt, &env()).unwrap();
        assert!((score + 0.9).abs() < 1e-6);

        let mut agent = agent();
        if let Some(policy) = agent.policy.as_mut().and_then(PolicyKind::as_extended_mut) {
            policy.penalty_worn_by_corpse = false;
        }
        let score = composer().score(&agent, &shirt, &env()).unwrap();
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_gender_mismatch_factor() {
        let mut agent = agent();
        agent.gender = Some(Gender::Male);
        let mut dress = def("dress");
        dress.gender = Some(Gender::Female);
        let score = composer().score(&agent, &garment(dress), &env()).unwrap();
        assert!((score - 0.001).abs() < 1e-6);
    }

    fn noble(required: &[&str], allowed: &[&str]) -> Role {
        let mut role = Role::new("baron");
        role.requirements.push(GarmentRequirement {
            body_groups: vec![BodyGroup::Torso],
            required: required.iter().map(|name| GarmentDefId::new(*name)).collect(),
            allowed: allowed.iter().map(|name| GarmentDefId::new(*name)).collect(),
        });
        role
    }

    #[test]
    fn test_required_and_allowed_bonuses() {
        let mut agent = agent();
        agent.roles.push(noble(&["robe"], &["vest"]));

        let robe = composer().score(&agent, &garment(def("robe")), &env()).unwrap();
        let vest = composer().score(&agent, &garment(def("vest")), &env()).unwrap();
        let shirt = composer().score(&agent, &garment(def("shirt")), &env()).unwrap();

        assert!((robe - 1000.1).abs() < 1e-3);
        assert!((vest - 100.1).abs() < 1e-3);
        assert!((shirt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_multiplicative_role_mode() {
        let mut agent = agent();
        agent.roles.push(noble(&["robe"], &[]));
        let mut config = ScoringConfig::default();
        config.role_bonus_mode = RoleBonusMode::Multiplicative;

        let robe = composer()
            .with_config(config)
            .score(&agent, &garment(def("robe")), &env())
            .unwrap();
        assert!((robe - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_inactive_role_ignored() {
        let mut agent = agent();
        let mut role = noble(&["robe"], &[]);
        role.in_effect = false;
        agent.roles.push(role);
        let robe = composer().score(&agent, &garment(def("robe")), &env()).unwrap();
        assert!((robe - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_low_quality_factor() {
        let mut agent = agent();
        let mut role = Role::new("baron");
        role.min_quality = Some(QualityTier::Good);
        agent.roles.push(role);

        let mut shirt_def = def("shirt");
        shirt_def.score_offset = 0.9;
        let shabby = garment(shirt_def.clone()).with_quality(QualityTier::Poor);
        let fine = garment(shirt_def).with_quality(QualityTier::Excellent);

        let shabby = composer().score(&agent, &shabby, &env()).unwrap();
        let fine = composer().score(&agent, &fine, &env()).unwrap();
        assert!((shabby - 0.25).abs() < 1e-6);
        assert!((fine - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ownership_penalty() {
        let mut collar = def("collar");
        collar.restricted_to = Some(OwnershipClass::Slave);
        let collar = garment(collar);

        let free = composer().score(&agent(), &collar, &env()).unwrap();
        assert!((free + 0.9).abs() < 1e-6);

        let mut slave = agent();
        slave.ownership = OwnershipClass::Slave;
        let owned = composer().score(&slave, &collar, &env()).unwrap();
        assert!((owned - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_score_by_missing_id_fails() {
        let pool = vec![garment(def("shirt"))];
        let result = composer().score_by_id(&agent(), &pool, GarmentId::new(), &env());
        assert!(matches!(result, Err(OutfitError::InvalidArgument(_))));

        let found = composer().score_by_id(&agent(), &pool, pool[0].id, &env()).unwrap();
        assert!((found - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rank_orders_descending_with_stable_ties() {
        let mut better = def("better");
        better.score_offset = 1.0;
        let pool = vec![garment(def("a")), garment(better), garment(def("b"))];

        let ranked = composer().rank(&agent(), &pool, &env()).unwrap();
        let names: Vec<&str> = ranked.iter().map(|(g, _)| g.def.id.0.as_str()).collect();
        assert_eq!(names, vec!["better", "a", "b"]);
    }

    #[test]
    fn test_durability_scales_negative_score() {
        let mut shirt = def("shirt");
        shirt.uses_durability = true;
        shirt.score_offset = -1.1;
        let worn_out = garment(shirt).with_durability(25.0, 100.0);

        // (0.1 - 1.1) * 0.1
        let score = composer().score(&agent(), &worn_out, &env()).unwrap();
        assert!((score + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_multiplicative_allowed_factor() {
        let mut agent = agent();
        agent.roles.push(noble(&["robe"], &["vest"]));
        let mut config = ScoringConfig::default();
        config.role_bonus_mode = RoleBonusMode::Multiplicative;

        let vest = composer()
            .with_config(config)
            .score(&agent, &garment(def("vest")), &env())
            .unwrap();
        assert!((vest - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_insulation_is_rejected() {
        let mut bad = def("bad");
        bad.thermal = ThermalProfile::new(f32::NAN, 0.0);
        let pool = vec![garment(bad), garment(def("good"))];

        assert!(matches!(
            composer().score(&agent(), &pool[0], &env()),
            Err(OutfitError::InvalidArgument(_))
        ));
        assert!(matches!(
            composer().rank(&agent(), &pool, &env()),
            Err(OutfitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_finite_stats_and_offsets_are_rejected() {
        let stat = garment(def("vest")).with_stat(AttributeId(0), f32::NAN);
        let offset = garment(def("vest").with_offset(AttributeId(0), f32::INFINITY));
        let base = garment(def("vest").with_stat(AttributeId(0), f32::NEG_INFINITY));

        for candidate in [stat, offset, base] {
            assert!(matches!(
                composer().score(&agent(), &candidate, &env()),
                Err(OutfitError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_worn_thermal_is_rejected() {
        let mut agent = agent();
        let mut jacket = def("jacket");
        jacket.thermal = ThermalProfile::new(0.0, f32::INFINITY);
        agent.worn.push(garment(jacket));

        assert!(matches!(
            composer().score(&agent, &garment(def("shirt")), &env()),
            Err(OutfitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_finite_policy_is_rejected() {
        let mut agent = agent();
        if let Some(policy) = agent.policy.as_mut().and_then(PolicyKind::as_extended_mut) {
            policy.target_temperature = TempRange::new(f32::NAN, 26.0);
        }
        assert!(matches!(
            composer().score(&agent, &garment(def("shirt")), &env()),
            Err(OutfitError::InvalidArgument(_))
        ));

        let mut agent = self::agent();
        if let Some(policy) = agent.policy.as_mut().and_then(PolicyKind::as_extended_mut) {
            policy.auto_temperature = true;
            policy.auto_temperature_offset = f32::INFINITY;
        }
        assert!(matches!(
            composer().score(&agent, &garment(def("shirt")), &env()),
            Err(OutfitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_attribute_leaves_ranges_untouched() {
        let mut catalog = AttributeCatalog::new();
        let armor = catalog.register("armor", 0.0);
        let ranges = Arc::new(RangeTable::with_tolerance(0.001));
        let composer = ScoreComposer::new(
            Arc::new(catalog),
            Arc::new(OccupationWeights::new()),
            Arc::clone(&ranges) as Arc<dyn RangeSource>,
        )
        .with_config(ScoringConfig::default());

        let mut agent = agent();
        if let Some(policy) = agent.policy.as_mut().and_then(PolicyKind::as_extended_mut) {
            policy.priorities = vec![
                AttributePriority::new(armor, 1.0),
                AttributePriority::new(AttributeId(99), 1.0),
            ];
        }

        let vest = garment(def("vest").with_stat(armor, 0.5));
        assert!(matches!(
            composer.score(&agent, &vest, &env()),
            Err(OutfitError::UnknownAttribute(_))
        ));
        assert!(ranges.is_empty().unwrap());
    }
}
