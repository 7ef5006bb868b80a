//! Closed-schema coercion of untrusted mesh JSON.
//!
//! The primitives here are pure and independent; [`crate::mesh::normalize`] composes them into
//! the full document walk.

pub mod coerce;
pub mod path;

pub use coerce::{
    check_range, coerce_color, coerce_interpolation, coerce_layer_name, coerce_list,
    coerce_number, coerce_object,
};
pub use path::{SchemaPath, SchemaPathElem};
