//! Engine repository façade.

use crate::db::{Store, StoreResult};
use crate::model::engine::Engine;
use crate::model::ids::EngineId;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const ENGINE_SELECT_SQL: &str = "SELECT id, name FROM engines";

/// Fail-soft CRUD over `engines`.
pub struct EngineRepository<'db> {
    store: &'db Store,
}

impl<'db> EngineRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, engine: Engine) -> Engine {
        let created = self
            .store
            .insert(
                "INSERT INTO engines (name) VALUES (:name);",
                named_params! { ":name": engine.name },
            )
            .map(|id| Engine {
                id: EngineId(id),
                ..engine.clone()
            });
        or_unsaved("engine_create", engine, created)
    }

    pub fn find_by_id(&self, id: EngineId) -> Option<Engine> {
        or_default(
            "engine_find_by_id",
            self.store.optional(
                &format!("{ENGINE_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_engine_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<Engine> {
        or_default(
            "engine_find_all",
            self.store.list(
                &format!("{ENGINE_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_engine_row,
            ),
        )
    }

    pub fn update(&self, engine: &Engine) {
        or_default(
            "engine_update",
            self.store
                .execute(
                    "UPDATE engines SET name = :name WHERE id = :id;",
                    named_params! { ":name": engine.name, ":id": engine.id.0 },
                )
                .map(|_| ()),
        )
    }

    pub fn delete(&self, id: EngineId) {
        or_default(
            "engine_delete",
            self.store
                .execute(
                    "DELETE FROM engines WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_engine_row(row: &Row<'_>) -> StoreResult<Engine> {
    Ok(Engine {
        id: EngineId(row.get("id")?),
        name: row.get("name")?,
    })
}
