//! assessment-domain
//!
//! Pure domain models for the area assessment checklist (form, sections,
//! items, instances, header and follow-up data) plus the static template.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod checklist;
pub mod form;
pub mod instance;
pub mod status;
pub mod template;

pub use checklist::*;
pub use form::*;
pub use instance::*;
pub use status::*;
pub use template::*;
