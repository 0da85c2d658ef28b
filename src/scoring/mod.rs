//! Garment scoring: thermal comfort model and the score pipeline

pub mod composer;
pub mod thermal;

pub use composer::{Environment, ScoreComposer, SpecialOffsetHook};
pub use thermal::{assess, thermal_comfort_score, ThermalAssessment};
