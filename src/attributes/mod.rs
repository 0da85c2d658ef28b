//! Garment attributes: catalog, normalization ranges and priorities

pub mod catalog;
pub mod priority;
pub mod range;

pub use catalog::{Attribute, AttributeCatalog};
pub use priority::{
    normalize_weights, set_default_priority, set_default_priority_by_name, AttributePriority,
    PriorityResolver,
};
pub use range::{AttributeRange, RangeSource, RangeTable, StaticRangeTable};
