//! User account model.

use crate::model::ids::UserId;
use serde::{Deserialize, Serialize};

/// Account able to author posts, back owners and participate in posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned key; [`UserId::UNSAVED`] until persisted.
    pub id: UserId,
    /// Unique within the catalog.
    pub login: String,
    pub password: String,
}

impl User {
    /// Creates an account not yet persisted.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: UserId::UNSAVED,
            login: login.into(),
            password: password.into(),
        }
    }
}
