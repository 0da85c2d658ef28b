//! Agents, garments and outfit policies

pub mod agent;
pub mod garment;
pub mod policy;

pub use agent::{Agent, Body, GarmentRequirement, MaterialReactions, OccupationPriority, Role};
pub use garment::{can_wear_together, Durability, Garment, GarmentDef, ThermalProfile};
pub use policy::{OutfitPolicy, PolicyKind};
