//! Owner repository façade.

use crate::db::{Store, StoreResult};
use crate::model::ids::{OwnerId, UserId};
use crate::model::owner::Owner;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const OWNER_SELECT_SQL: &str = "SELECT id, name, user_id FROM owners";

/// Fail-soft CRUD over `owners`.
pub struct OwnerRepository<'db> {
    store: &'db Store,
}

impl<'db> OwnerRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, owner: Owner) -> Owner {
        let created = self
            .store
            .insert(
                "INSERT INTO owners (name, user_id) VALUES (:name, :user_id);",
                named_params! { ":name": owner.name, ":user_id": owner.user_id.0 },
            )
            .map(|id| Owner {
                id: OwnerId(id),
                ..owner.clone()
            });
        or_unsaved("owner_create", owner, created)
    }

    pub fn find_by_id(&self, id: OwnerId) -> Option<Owner> {
        or_default(
            "owner_find_by_id",
            self.store.optional(
                &format!("{OWNER_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_owner_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<Owner> {
        or_default(
            "owner_find_all",
            self.store.list(
                &format!("{OWNER_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_owner_row,
            ),
        )
    }

    pub fn update(&self, owner: &Owner) {
        or_default(
            "owner_update",
            self.store
                .execute(
                    "UPDATE owners SET name = :name, user_id = :user_id WHERE id = :id;",
                    named_params! {
                        ":name": owner.name,
                        ":user_id": owner.user_id.0,
                        ":id": owner.id.0,
                    },
                )
                .map(|_| ()),
        )
    }

    pub fn delete(&self, id: OwnerId) {
        or_default(
            "owner_delete",
            self.store
                .execute(
                    "DELETE FROM owners WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_owner_row(row: &Row<'_>) -> StoreResult<Owner> {
    Ok(Owner {
        id: OwnerId(row.get("id")?),
        name: row.get("name")?,
        user_id: UserId(row.get("user_id")?),
    })
}
