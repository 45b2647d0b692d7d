//! assessment-core
//!
//! Form state, validation, filtered views and export coordination for the
//! area assessment checklist. Depends on assessment-domain. No CLI, no
//! terminal I/O; rendering and mail handoff are traits implemented by callers.

pub mod coordinate;
pub mod error;
pub mod export_service;
pub mod form_store;
pub mod mutations;
pub mod preview;
pub mod projection;
pub mod report_service;
pub mod summary_service;
pub mod validation_service;

pub use coordinate::*;
pub use error::CoreError;
pub use export_service::*;
pub use form_store::*;
pub use preview::*;
pub use projection::*;
pub use report_service::*;
pub use summary_service::*;
pub use validation_service::*;
