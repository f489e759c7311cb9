//! Repository façades over the transactional engine.
//!
//! # Responsibility
//! - Translate entity calls into engine invocations.
//! - Enforce the fail-soft boundary: failures are logged here and replaced
//!   with safe defaults; callers above this layer never see a store error.
//!
//! # Invariants
//! - The engine and assembler below this layer never swallow failures.
//! - A failed write leaves the input value unchanged; a failed read yields
//!   an empty value.

use crate::db::StoreResult;
use log::error;

pub mod car_repo;
pub mod engine_repo;
pub mod file_repo;
pub mod history_owner_repo;
pub mod owner_repo;
pub mod participation_repo;
pub mod post_photo_repo;
pub mod post_repo;
pub mod price_history_repo;
pub mod user_repo;

/// Fail-soft boundary shared by every façade method.
///
/// Logs the failure under `op` and substitutes the type's default: empty
/// option, empty list, unit.
pub(crate) fn or_default<T: Default>(op: &'static str, outcome: StoreResult<T>) -> T {
    match outcome {
        Ok(value) => value,
        Err(err) => {
            error!("event={op} module=repo status=error error={err}");
            T::default()
        }
    }
}

/// Fail-soft variant for `create`: on failure the caller's snapshot comes
/// back unchanged, its id still unsaved.
pub(crate) fn or_unsaved<T>(op: &'static str, fallback: T, outcome: StoreResult<T>) -> T {
    match outcome {
        Ok(value) => value,
        Err(err) => {
            error!("event={op} module=repo status=error error={err}");
            fallback
        }
    }
}
