//! Answer instances and the opaque photo handle attached to them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::Status;

/// Opaque binary attachment. Identity is per value: attaching the same file
/// twice produces two distinct photos.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: Uuid,
    pub file_name: String,
    pub media_type: String,
    bytes: Arc<[u8]>,
}

impl Photo {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One occurrence of an item's answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Durable identity assigned at creation; never derived from position.
    pub id: Uuid,
    pub status: Option<Status>,
    #[serde(default)]
    pub description: String,
    #[serde(skip)]
    pub photo: Option<Photo>,
}

impl Instance {
    /// Creates an unanswered instance with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: None,
            description: String::new(),
            photo: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_not_ok(&self) -> bool {
        self.status == Some(Status::NotOk)
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}
