//! Translation of a validated [`crate::Mesh`] into host authoring calls.

pub mod layer;
pub mod transform;

pub use layer::synthesize;
pub use transform::{mesh_to_screen, project};
