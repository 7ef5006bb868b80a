//! Outer driver: precondition, validation, and synthesis inside one undo group.

pub mod driver;

pub use driver::{ImportSummary, UNDO_GROUP_NAME, import_mesh, import_mesh_path, read_mesh_text};
