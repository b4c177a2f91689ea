//! Rule-based field recognizers for qualifying-totals tables.

pub mod age_group;
pub mod patterns;
pub mod weight_class;

pub use age_group::AgeGroupNormalizer;
pub use patterns::*;
pub use weight_class::{find_weight_total, normalize_weight_class, WeightTotalMatch};
