//! Stored file reference model.

use crate::model::ids::FileId;
use serde::{Deserialize, Serialize};

/// Reference to a file on disk; photo slots point at these rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: FileId,
    pub name: String,
    /// Unique within the catalog.
    pub path: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: FileId::UNSAVED,
            name: name.into(),
            path: path.into(),
        }
    }
}
