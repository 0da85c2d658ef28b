pub mod config;
pub mod curve;
pub mod error;
pub mod types;

pub use config::{RoleBonusMode, ScoringConfig};
pub use curve::SimpleCurve;
pub use error::{OutfitError, Result};
