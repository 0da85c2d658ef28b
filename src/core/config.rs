//! Scoring configuration with documented constants
//!
//! All magic numbers used by the scoring pipeline are collected here with
//! explanations of their purpose and how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::curve::SimpleCurve;
use crate::core::error::{OutfitError, Result};

/// How role requirements affect the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleBonusMode {
    /// Add `required_bonus` / `allowed_bonus`
    #[default]
    Additive,
    /// Multiply by `required_factor` / `allowed_factor`
    Multiplicative,
}

/// Configuration for the scoring pipeline
///
/// Defaults are the tuned values the scorer ships with.
/// Changing them shifts how strongly each modifier competes with the
/// weighted attribute term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // === BASE TERM ===
    /// Constant every garment starts from
    pub base_score: f32,

    /// Sum of absolute priority weights after normalization
    ///
    /// Bounds the attribute term regardless of how many attributes are
    /// prioritized. With normalized values in [-1, 1] the attribute term
    /// stays within [-budget, budget].
    pub total_weight_budget: f32,

    // === NORMALIZATION ===
    /// Minimum observed spread before an adaptive range produces non-zero values
    pub range_tolerance: f32,

    /// Tolerance of the static (catalog-scanned) range source
    ///
    /// Deviations closer than this to the baseline normalize to 0.
    pub static_range_tolerance: f32,

    /// Tolerance when checking whether a priority still has its default weight
    pub default_match_tolerance: f32,

    // === ROLE REQUIREMENTS ===
    pub role_bonus_mode: RoleBonusMode,
    /// Additive bonus for garments a role requires
    ///
    /// Large enough to dominate every other term: a required garment
    /// should always beat an optional one.
    pub required_bonus: f32,
    /// Additive bonus for garments a role allows
    pub allowed_bonus: f32,
    /// Multiplicative factor for required garments
    pub required_factor: f32,
    /// Multiplicative factor for allowed garments
    pub allowed_factor: f32,
    /// Factor applied when a garment is below a role's minimum quality
    pub low_quality_factor: f32,

    // === SOCIAL MODIFIERS ===
    /// Factor for garments not suited to the agent's gender
    ///
    /// A steep penalty rather than an exclusion so that a mismatched
    /// garment can still win when nothing else is available.
    pub incorrect_gender_factor: f32,
    /// Subtracted when the agent dislikes the garment's material
    pub material_penalty: f32,
    /// Applied after `material_penalty` if the score is still positive
    pub material_factor: f32,
    /// Added when the agent likes the garment's material
    pub material_bonus: f32,
    /// Subtracted for garments worn by a corpse
    pub corpse_penalty: f32,
    /// Applied after `corpse_penalty` if the score is still positive
    pub corpse_factor: f32,

    // === VARIANT TOGGLES ===
    pub vision_blocking_enabled: bool,
    pub vision_blocking_penalty: f32,
    pub ownership_penalty_enabled: bool,
    /// Subtracted when a garment is restricted to another ownership class
    pub ownership_penalty: f32,

    // === CURVES ===
    /// Maps `current / max` durability to a score factor
    ///
    /// Superlinear: a garment at half durability keeps only a quarter of
    /// its score, one at three quarters keeps all of it.
    pub durability_curve: SimpleCurve,

    /// Maps a thermal benefit (degrees) to a score contribution
    pub insulation_curve: SimpleCurve,
}

/// Maximum score contribution of one thermal bound
pub const MAX_INSULATION_SCORE: f32 = 2.0;

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 0.1,
            total_weight_budget: 10.0,

            range_tolerance: 0.001,
            static_range_tolerance: 0.01,
            default_match_tolerance: 0.01,

            role_bonus_mode: RoleBonusMode::Additive,
            required_bonus: 1000.0,
            allowed_bonus: 100.0,
            required_factor: 2.0,
            allowed_factor: 1.25,
            low_quality_factor: 0.25,

            incorrect_gender_factor: 0.01,
            material_penalty: 1.0,
            material_factor: 0.2,
            material_bonus: 0.2,
            corpse_penalty: 1.0,
            corpse_factor: 0.2,

            vision_blocking_enabled: true,
            vision_blocking_penalty: 1.0,
            ownership_penalty_enabled: true,
            ownership_penalty: 1.0,

            durability_curve: SimpleCurve::new(&[
                (0.0, 0.0),
                (0.25, 0.1),
                (0.5, 0.25),
                (0.75, 1.0),
            ]),
            insulation_curve: SimpleCurve::new(&[
                (-10.0, -MAX_INSULATION_SCORE),
                (-5.0, -6.0 * MAX_INSULATION_SCORE),
                (0.0, 0.0),
                (5.0, 0.6 * MAX_INSULATION_SCORE),
                (10.0, MAX_INSULATION_SCORE),
            ]),
        }
    }
}

impl ScoringConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.total_weight_budget > 0.0) {
            return Err(OutfitError::InvalidConfig(format!(
                "total_weight_budget ({}) must be positive",
                self.total_weight_budget
            )));
        }

        if !(self.range_tolerance > 0.0) || !(self.static_range_tolerance > 0.0) {
            return Err(OutfitError::InvalidConfig("Range tolerances must be positive".into()));
        }

        // Factors are penalties in (0, 1]
        for (name, value) in [
            ("incorrect_gender_factor", self.incorrect_gender_factor),
            ("low_quality_factor", self.low_quality_factor),
            ("material_factor", self.material_factor),
            ("corpse_factor", self.corpse_factor),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(OutfitError::InvalidConfig(format!(
                    "{} ({}) should be in (0, 1]",
                    name, value
                )));
            }
        }

        // Required must outrank allowed in either mode
        if self.required_bonus < self.allowed_bonus || self.required_factor < self.allowed_factor {
            return Err(OutfitError::InvalidConfig(
                "required role effect should be >= allowed role effect".into(),
            ));
        }

        if !self.durability_curve.is_well_formed() {
            return Err(OutfitError::InvalidConfig("durability_curve is malformed".into()));
        }
        if !self.insulation_curve.is_well_formed() {
            return Err(OutfitError::InvalidConfig("insulation_curve is malformed".into()));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ScoringConfig> = OnceLock::new();

/// Get the global scoring config (initializes with defaults if not set)
pub fn config() -> &'static ScoringConfig {
    CONFIG.get_or_init(ScoringConfig::default)
}

/// Set the global scoring config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ScoringConfig) -> std::result::Result<(), ScoringConfig> {
    CONFIG.set(config)
}
