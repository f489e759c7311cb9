//! Transactional data-access engine for a used-car catalog.
//! Repositories stay fail-soft at the boundary; everything beneath them
//! reports errors explicitly and runs inside a single transaction.

pub mod aggregate;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use aggregate::{
    load_post_aggregates, CarProfile, OwnershipEntry, PhotoAttachment, PostAggregate, PostFilter,
};
pub use db::{
    open_db, open_db_in_memory, DbError, DbResult, Store, StoreError, StoreResult, StoreSession,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::car::{Car, HistoryOwner, OwnershipIntervalError};
pub use model::engine::Engine;
pub use model::file::FileRef;
pub use model::ids::{
    CarId, EngineId, FileId, HistoryOwnerId, OwnerId, ParticipationId, PostId, PostPhotoId,
    PriceHistoryId, UserId,
};
pub use model::owner::Owner;
pub use model::post::{Participation, Post, PostPhoto, PriceHistory};
pub use model::user::User;
pub use repo::car_repo::CarRepository;
pub use repo::engine_repo::EngineRepository;
pub use repo::file_repo::FileRepository;
pub use repo::history_owner_repo::HistoryOwnerRepository;
pub use repo::owner_repo::OwnerRepository;
pub use repo::participation_repo::ParticipationRepository;
pub use repo::post_photo_repo::PostPhotoRepository;
pub use repo::post_repo::PostRepository;
pub use repo::price_history_repo::PriceHistoryRepository;
pub use repo::user_repo::UserRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
