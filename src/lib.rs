//! Arc Outfitter - garment desirability scoring
//!
//! Scores how much an agent wants to wear a garment, from weighted and
//! normalized garment attributes plus thermal comfort, role requirements
//! and personal preferences. Hosts decide what to do with the scores.

pub mod attributes;
pub mod core;
pub mod entity;
pub mod occupation;
pub mod scoring;
