//! Price history repository façade.
//!
//! Price changes are append-only facts: created, listed, and removed by
//! cleanup paths, never updated.

use crate::db::{Store, StoreResult};
use crate::model::ids::{PostId, PriceHistoryId};
use crate::model::post::PriceHistory;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const PRICE_HISTORY_SELECT_SQL: &str =
    "SELECT id, post_id, price_before, price_after, created FROM price_history";

pub struct PriceHistoryRepository<'db> {
    store: &'db Store,
}

impl<'db> PriceHistoryRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, change: PriceHistory) -> PriceHistory {
        let created = self
            .store
            .insert(
                "INSERT INTO price_history (post_id, price_before, price_after, created)
                 VALUES (:post_id, :price_before, :price_after, :created);",
                named_params! {
                    ":post_id": change.post_id.0,
                    ":price_before": change.price_before,
                    ":price_after": change.price_after,
                    ":created": change.created,
                },
            )
            .map(|id| PriceHistory {
                id: PriceHistoryId(id),
                ..change.clone()
            });
        or_unsaved("price_history_create", change, created)
    }

    pub fn find_by_id(&self, id: PriceHistoryId) -> Option<PriceHistory> {
        or_default(
            "price_history_find_by_id",
            self.store.optional(
                &format!("{PRICE_HISTORY_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_price_history_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<PriceHistory> {
        or_default(
            "price_history_find_all",
            self.store.list(
                &format!("{PRICE_HISTORY_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_price_history_row,
            ),
        )
    }

    pub fn delete(&self, id: PriceHistoryId) {
        or_default(
            "price_history_delete",
            self.store
                .execute(
                    "DELETE FROM price_history WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_price_history_row(row: &Row<'_>) -> StoreResult<PriceHistory> {
    Ok(PriceHistory {
        id: PriceHistoryId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        price_before: row.get("price_before")?,
        price_after: row.get("price_after")?,
        created: row.get("created")?,
    })
}
