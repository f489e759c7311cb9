//! Car repository façade.

use crate::db::{Store, StoreResult};
use crate::model::car::Car;
use crate::model::ids::{CarId, EngineId};
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const CAR_SELECT_SQL: &str = "SELECT id, name, engine_id FROM cars";

/// Fail-soft CRUD over `cars`.
pub struct CarRepository<'db> {
    store: &'db Store,
}

impl<'db> CarRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, car: Car) -> Car {
        let created = self
            .store
            .insert(
                "INSERT INTO cars (name, engine_id) VALUES (:name, :engine_id);",
                named_params! { ":name": car.name, ":engine_id": car.engine_id.0 },
            )
            .map(|id| Car {
                id: CarId(id),
                ..car.clone()
            });
        or_unsaved("car_create", car, created)
    }

    pub fn find_by_id(&self, id: CarId) -> Option<Car> {
        or_default(
            "car_find_by_id",
            self.store.optional(
                &format!("{CAR_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_car_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<Car> {
        or_default(
            "car_find_all",
            self.store.list(
                &format!("{CAR_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_car_row,
            ),
        )
    }

    pub fn update(&self, car: &Car) {
        or_default(
            "car_update",
            self.store
                .execute(
                    "UPDATE cars SET name = :name, engine_id = :engine_id WHERE id = :id;",
                    named_params! {
                        ":name": car.name,
                        ":engine_id": car.engine_id.0,
                        ":id": car.id.0,
                    },
                )
                .map(|_| ()),
        )
    }

    /// Removes the car; absent ids are a no-op. A car still referenced by
    /// posts or history records stays in place (foreign keys restrict).
    pub fn delete(&self, id: CarId) {
        or_default(
            "car_delete",
            self.store
                .execute(
                    "DELETE FROM cars WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_car_row(row: &Row<'_>) -> StoreResult<Car> {
    Ok(Car {
        id: CarId(row.get("id")?),
        name: row.get("name")?,
        engine_id: EngineId(row.get("engine_id")?),
    })
}
