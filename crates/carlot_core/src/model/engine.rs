//! Engine model.

use crate::model::ids::EngineId;
use serde::{Deserialize, Serialize};

/// Engine fitted to a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    pub id: EngineId,
    pub name: String,
}

impl Engine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EngineId::UNSAVED,
            name: name.into(),
        }
    }
}
