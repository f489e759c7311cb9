//! Typed row keys.
//!
//! Each entity carries its own key newtype over the store-assigned integer
//! id, so keys of different tables cannot be mixed up and aggregate merging
//! can hash on root identity without ambiguity. `0` is the sentinel for rows
//! not yet persisted; SQLite assigns real ids starting at 1.

use serde::{Deserialize, Serialize};

/// Key of a `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Sentinel for an account not yet persisted.
    pub const UNSAVED: UserId = UserId(0);
}

/// Key of an `engines` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EngineId(pub i64);

impl EngineId {
    pub const UNSAVED: EngineId = EngineId(0);
}

/// Key of a `cars` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarId(pub i64);

impl CarId {
    pub const UNSAVED: CarId = CarId(0);
}

/// Key of an `owners` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl OwnerId {
    pub const UNSAVED: OwnerId = OwnerId(0);
}

/// Key of a `history_owners` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HistoryOwnerId(pub i64);

impl HistoryOwnerId {
    pub const UNSAVED: HistoryOwnerId = HistoryOwnerId(0);
}

/// Key of a `files` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub i64);

impl FileId {
    pub const UNSAVED: FileId = FileId(0);
}

/// Key of a `posts` row. Root identity for aggregate assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl PostId {
    pub const UNSAVED: PostId = PostId(0);
}

/// Key of a `post_photos` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostPhotoId(pub i64);

impl PostPhotoId {
    pub const UNSAVED: PostPhotoId = PostPhotoId(0);
}

/// Key of a `price_history` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceHistoryId(pub i64);

impl PriceHistoryId {
    pub const UNSAVED: PriceHistoryId = PriceHistoryId(0);
}

/// Key of a `participations` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipationId(pub i64);

impl ParticipationId {
    pub const UNSAVED: ParticipationId = ParticipationId(0);
}
