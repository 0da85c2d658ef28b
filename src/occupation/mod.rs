//! Occupation-derived attribute weights

pub mod aggregate;
pub mod weights;

pub use aggregate::{occupation_priorities, priority_multiplier};
pub use weights::OccupationWeights;
