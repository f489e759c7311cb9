//! Participation repository façade.
//!
//! Participations are append-only facts: created, listed, and removed by
//! cleanup paths, never updated.

use crate::db::{Store, StoreResult};
use crate::model::ids::{ParticipationId, PostId, UserId};
use crate::model::post::Participation;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const PARTICIPATION_SELECT_SQL: &str = "SELECT id, post_id, user_id FROM participations";

pub struct ParticipationRepository<'db> {
    store: &'db Store,
}

impl<'db> ParticipationRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, participation: Participation) -> Participation {
        let created = self
            .store
            .insert(
                "INSERT INTO participations (post_id, user_id) VALUES (:post_id, :user_id);",
                named_params! {
                    ":post_id": participation.post_id.0,
                    ":user_id": participation.user_id.0,
                },
            )
            .map(|id| Participation {
                id: ParticipationId(id),
                ..participation.clone()
            });
        or_unsaved("participation_create", participation, created)
    }

    pub fn find_by_id(&self, id: ParticipationId) -> Option<Participation> {
        or_default(
            "participation_find_by_id",
            self.store.optional(
                &format!("{PARTICIPATION_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_participation_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<Participation> {
        or_default(
            "participation_find_all",
            self.store.list(
                &format!("{PARTICIPATION_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_participation_row,
            ),
        )
    }

    pub fn delete(&self, id: ParticipationId) {
        or_default(
            "participation_delete",
            self.store
                .execute(
                    "DELETE FROM participations WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_participation_row(row: &Row<'_>) -> StoreResult<Participation> {
    Ok(Participation {
        id: ParticipationId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        user_id: UserId(row.get("user_id")?),
    })
}
