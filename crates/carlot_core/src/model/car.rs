//! Car model and its ownership history records.
//!
//! # Invariants
//! - A closed ownership interval must not end before it starts.

use crate::model::ids::{CarId, EngineId, HistoryOwnerId, OwnerId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Car advertised by posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub engine_id: EngineId,
}

impl Car {
    pub fn new(name: impl Into<String>, engine_id: EngineId) -> Self {
        Self {
            id: CarId::UNSAVED,
            name: name.into(),
            engine_id,
        }
    }
}

/// Links a car to one owner over a validity interval.
///
/// Created and deleted independently of the car and owner lifecycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOwner {
    pub id: HistoryOwnerId,
    pub car_id: CarId,
    pub owner_id: OwnerId,
    /// Unix epoch milliseconds.
    pub start_at: i64,
    /// Unix epoch milliseconds; `None` while the ownership is still open.
    pub end_at: Option<i64>,
}

impl HistoryOwner {
    pub fn new(car_id: CarId, owner_id: OwnerId, start_at: i64, end_at: Option<i64>) -> Self {
        Self {
            id: HistoryOwnerId::UNSAVED,
            car_id,
            owner_id,
            start_at,
            end_at,
        }
    }

    /// Checks the interval invariant.
    ///
    /// Write paths must call this before touching the store.
    pub fn validate(&self) -> Result<(), OwnershipIntervalError> {
        if let Some(end_at) = self.end_at {
            if end_at < self.start_at {
                return Err(OwnershipIntervalError {
                    start_at: self.start_at,
                    end_at,
                });
            }
        }
        Ok(())
    }
}

/// Ownership interval ending before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipIntervalError {
    pub start_at: i64,
    pub end_at: i64,
}

impl Display for OwnershipIntervalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ownership interval ends at {} before starting at {}",
            self.end_at, self.start_at
        )
    }
}

impl Error for OwnershipIntervalError {}

#[cfg(test)]
mod tests {
    use super::HistoryOwner;
    use crate::model::ids::{CarId, OwnerId};

    #[test]
    fn open_interval_is_valid() {
        let record = HistoryOwner::new(CarId(1), OwnerId(1), 1_000, None);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn closed_interval_may_be_zero_length() {
        let record = HistoryOwner::new(CarId(1), OwnerId(1), 1_000, Some(1_000));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let record = HistoryOwner::new(CarId(1), OwnerId(1), 1_000, Some(999));
        let err = record.validate().expect_err("inverted interval must fail");
        assert_eq!(err.start_at, 1_000);
        assert_eq!(err.end_at, 999);
    }
}
