//! Post model and the facts attached to it.

use crate::model::ids::{
    CarId, FileId, ParticipationId, PostId, PostPhotoId, PriceHistoryId, UserId,
};
use serde::{Deserialize, Serialize};

/// Classified ad for one car.
///
/// Holds lookup keys to its author and car; the attached collections live
/// in their own tables and are hydrated by the aggregate assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub description: String,
    /// Unix epoch milliseconds, supplied by the caller at creation.
    pub created: i64,
    pub user_id: UserId,
    pub car_id: CarId,
}

impl Post {
    pub fn new(
        description: impl Into<String>,
        created: i64,
        user_id: UserId,
        car_id: CarId,
    ) -> Self {
        Self {
            id: PostId::UNSAVED,
            description: description.into(),
            created,
            user_id,
            car_id,
        }
    }
}

/// Photo slot of a post; `sort` controls display order within the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPhoto {
    pub id: PostPhotoId,
    pub post_id: PostId,
    pub file_id: FileId,
    pub sort: i64,
}

impl PostPhoto {
    pub fn new(post_id: PostId, file_id: FileId, sort: i64) -> Self {
        Self {
            id: PostPhotoId::UNSAVED,
            post_id,
            file_id,
            sort,
        }
    }
}

/// Price change recorded against a post. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub id: PriceHistoryId,
    pub post_id: PostId,
    pub price_before: i64,
    pub price_after: i64,
    /// Unix epoch milliseconds.
    pub created: i64,
}

impl PriceHistory {
    pub fn new(post_id: PostId, price_before: i64, price_after: i64, created: i64) -> Self {
        Self {
            id: PriceHistoryId::UNSAVED,
            post_id,
            price_before,
            price_after,
            created,
        }
    }
}

/// A user taking part in a post. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub id: ParticipationId,
    pub post_id: PostId,
    pub user_id: UserId,
}

impl Participation {
    pub fn new(post_id: PostId, user_id: UserId) -> Self {
        Self {
            id: ParticipationId::UNSAVED,
            post_id,
            user_id,
        }
    }
}
