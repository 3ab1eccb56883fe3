//! Command handlers.
//!
//! Handlers take the repository and an output writer explicitly so they can
//! be driven from tests.

pub mod practice;
pub mod sections;

pub use practice::practice;
pub use sections::{
    delete_section, export_library, import_library, list_sections, move_section, resolve_section,
};
