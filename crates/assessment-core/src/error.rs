use thiserror::Error;
use uuid::Uuid;

use crate::coordinate::{InstanceCoord, ItemCoord};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Section {0} does not exist")]
    SectionNotFound(usize),
    #[error("Item {0} does not exist")]
    ItemOutOfRange(ItemCoord),
    #[error("Instance {0} does not exist")]
    InstanceOutOfRange(InstanceCoord),
    #[error("Unknown item id: {0}")]
    UnknownItem(String),
    #[error("Instance not found: {0}")]
    InstanceNotFound(Uuid),
    #[error("An export is already in progress")]
    ExportInProgress,
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Mail handoff failed: {0}")]
    Mail(String),
}
