//! Typed mesh model and the validation/normalization pass that produces it.

pub mod model;
pub mod normalize;
