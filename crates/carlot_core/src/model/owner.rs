//! Owner model.

use crate::model::ids::{OwnerId, UserId};
use serde::{Deserialize, Serialize};

/// Person appearing in a car's ownership history, backed by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub user_id: UserId,
}

impl Owner {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: OwnerId::UNSAVED,
            name: name.into(),
            user_id,
        }
    }
}
