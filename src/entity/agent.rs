//! Agents that choose what to wear

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{
    AgentId, BodyGroup, Gender, GarmentDefId, GarmentId, MaterialId, OccupationId, OwnershipClass,
    QualityTier, TempRange,
};
use crate::entity::garment::{Garment, GarmentDef};
use crate::entity::policy::PolicyKind;

/// Body structure: which body groups exist on this agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    groups: AHashSet<BodyGroup>,
}

impl Body {
    pub fn with_groups(groups: &[BodyGroup]) -> Self {
        Self {
            groups: groups.iter().copied().collect(),
        }
    }

    /// A standard humanlike body with every group
    pub fn humanlike() -> Self {
        Self::with_groups(&[
            BodyGroup::Head,
            BodyGroup::UpperHead,
            BodyGroup::Eyes,
            BodyGroup::Torso,
            BodyGroup::Shoulders,
            BodyGroup::Arms,
            BodyGroup::Hands,
            BodyGroup::Legs,
            BodyGroup::Feet,
            BodyGroup::Waist,
        ])
    }

    pub fn has_group(&self, group: BodyGroup) -> bool {
        self.groups.contains(&group)
    }
}

/// Garment constraint imposed by a role on some body groups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarmentRequirement {
    /// Body groups this requirement governs
    pub body_groups: Vec<BodyGroup>,
    /// Garments that satisfy the requirement
    pub required: Vec<GarmentDefId>,
    /// Garments tolerated on these body groups
    pub allowed: Vec<GarmentDefId>,
}

impl GarmentRequirement {
    /// True if the requirement governs any body group the garment covers
    pub fn covers(&self, def: &GarmentDef) -> bool {
        def.body_groups.iter().any(|group| self.body_groups.contains(group))
    }

    pub fn required_for(&self, def: &GarmentDef) -> bool {
        self.required.contains(&def.id)
    }

    pub fn allowed_for(&self, def: &GarmentDef) -> bool {
        self.allowed.contains(&def.id)
    }
}

/// A title or role held by an agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    /// Only roles in effect impose their requirements
    pub in_effect: bool,
    pub requirements: Vec<GarmentRequirement>,
    pub min_quality: Option<QualityTier>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_effect: true,
            ..Default::default()
        }
    }
}

/// Priority an agent assigns to an occupation (<= 0 means disabled)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationPriority {
    pub occupation: OccupationId,
    pub priority: i32,
}

impl OccupationPriority {
    pub fn new(occupation: impl Into<String>, priority: i32) -> Self {
        Self {
            occupation: OccupationId::new(occupation),
            priority,
        }
    }

    pub fn is_active(&self) -> bool {
        self.priority > 0
    }
}

/// How an agent feels about garment materials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialReactions {
    pub disliked: AHashSet<MaterialId>,
    pub liked: AHashSet<MaterialId>,
}

impl MaterialReactions {
    pub fn dislikes(&self, material: &MaterialId) -> bool {
        self.disliked.contains(material)
    }

    pub fn likes(&self, material: &MaterialId) -> bool {
        self.liked.contains(material)
    }
}

/// An agent choosing garments
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub gender: Option<Gender>,
    pub ownership: OwnershipClass,
    pub roles: Vec<Role>,
    pub body: Body,
    /// Currently worn garments, in wear order
    pub worn: Vec<Garment>,
    /// Comfortable temperature window with the current outfit
    pub comfort: TempRange,
    pub occupations: Vec<OccupationPriority>,
    pub material_reactions: MaterialReactions,
    /// Whether wearing a dead person's garment bothers this agent
    pub minds_corpse_garments: bool,
    pub policy: Option<PolicyKind>,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            gender: None,
            ownership: OwnershipClass::Free,
            roles: Vec::new(),
            body: Body::humanlike(),
            worn: Vec::new(),
            comfort: TempRange::new(16.0, 26.0),
            occupations: Vec::new(),
            material_reactions: MaterialReactions::default(),
            minds_corpse_garments: true,
            policy: None,
        }
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn is_wearing(&self, id: GarmentId) -> bool {
        self.worn.iter().any(|garment| garment.id == id)
    }

    /// Roles currently in effect
    pub fn active_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(|role| role.in_effect)
    }

    /// Highest minimum quality demanded by any role in effect
    pub fn required_min_quality(&self) -> Option<QualityTier> {
        self.active_roles().filter_map(|role| role.min_quality).max()
    }

    /// Requirements of every role in effect
    pub fn requirements(&self) -> impl Iterator<Item = &GarmentRequirement> {
        self.active_roles().flat_map(|role| role.requirements.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_min_quality_takes_highest_active() {
        let mut agent = Agent::new("Ilse");
        let mut baron = Role::new("baron");
        baron.min_quality = Some(QualityTier::Good);
        let mut count = Role::new("count");
        count.min_quality = Some(QualityTier::Masterwork);
        count.in_effect = false;
        agent.roles = vec![baron, count];

        assert_eq!(agent.required_min_quality(), Some(QualityTier::Good));
    }

    #[test]
    fn test_no_roles_no_quality_requirement() {
        let agent = Agent::new("Ilse");
        assert_eq!(agent.required_min_quality(), None);
        assert_eq!(agent.requirements().count(), 0);
    }

    #[test]
    fn test_occupation_activity() {
        assert!(OccupationPriority::new("doctor", 1).is_active());
        assert!(!OccupationPriority::new("doctor", 0).is_active());
        assert!(!OccupationPriority::new("doctor", -2).is_active());
    }
}
