//! Ownership history repository façade.
//!
//! # Invariants
//! - Write paths validate the interval before touching the store.

use crate::db::{Store, StoreError, StoreResult};
use crate::model::car::HistoryOwner;
use crate::model::ids::{CarId, HistoryOwnerId, OwnerId};
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const HISTORY_OWNER_SELECT_SQL: &str =
    "SELECT id, car_id, owner_id, start_at, end_at FROM history_owners";

/// Fail-soft CRUD over `history_owners`.
pub struct HistoryOwnerRepository<'db> {
    store: &'db Store,
}

impl<'db> HistoryOwnerRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, record: HistoryOwner) -> HistoryOwner {
        let created = record
            .validate()
            .map_err(|err| StoreError::InvalidData(err.to_string()))
            .and_then(|()| {
                self.store.insert(
                    "INSERT INTO history_owners (car_id, owner_id, start_at, end_at)
                     VALUES (:car_id, :owner_id, :start_at, :end_at);",
                    named_params! {
                        ":car_id": record.car_id.0,
                        ":owner_id": record.owner_id.0,
                        ":start_at": record.start_at,
                        ":end_at": record.end_at,
                    },
                )
            })
            .map(|id| HistoryOwner {
                id: HistoryOwnerId(id),
                ..record.clone()
            });
        or_unsaved("history_owner_create", record, created)
    }

    pub fn find_by_id(&self, id: HistoryOwnerId) -> Option<HistoryOwner> {
        or_default(
            "history_owner_find_by_id",
            self.store.optional(
                &format!("{HISTORY_OWNER_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_history_owner_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<HistoryOwner> {
        or_default(
            "history_owner_find_all",
            self.store.list(
                &format!("{HISTORY_OWNER_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_history_owner_row,
            ),
        )
    }

    pub fn update(&self, record: &HistoryOwner) {
        let outcome = record
            .validate()
            .map_err(|err| StoreError::InvalidData(err.to_string()))
            .and_then(|()| {
                self.store.execute(
                    "UPDATE history_owners
                     SET car_id = :car_id, owner_id = :owner_id,
                         start_at = :start_at, end_at = :end_at
                     WHERE id = :id;",
                    named_params! {
                        ":car_id": record.car_id.0,
                        ":owner_id": record.owner_id.0,
                        ":start_at": record.start_at,
                        ":end_at": record.end_at,
                        ":id": record.id.0,
                    },
                )
            })
            .map(|_| ());
        or_default("history_owner_update", outcome)
    }

    pub fn delete(&self, id: HistoryOwnerId) {
        or_default(
            "history_owner_delete",
            self.store
                .execute(
                    "DELETE FROM history_owners WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_history_owner_row(row: &Row<'_>) -> StoreResult<HistoryOwner> {
    Ok(HistoryOwner {
        id: HistoryOwnerId(row.get("id")?),
        car_id: CarId(row.get("car_id")?),
        owner_id: OwnerId(row.get("owner_id")?),
        start_at: row.get("start_at")?,
        end_at: row.get("end_at")?,
    })
}
