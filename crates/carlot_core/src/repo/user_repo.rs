//! User repository façade.
//!
//! # Responsibility
//! - Fail-soft CRUD over `users`, plus login lookups.
//!
//! # Invariants
//! - `login` is unique; a duplicate insert degrades to the unchanged input.

use crate::db::{Store, StoreResult};
use crate::model::ids::UserId;
use crate::model::user::User;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const USER_SELECT_SQL: &str = "SELECT id, login, password FROM users";

pub struct UserRepository<'db> {
    store: &'db Store,
}

impl<'db> UserRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    /// Persists a new account and returns it with the assigned id; on
    /// failure the input comes back unchanged.
    pub fn create(&self, user: User) -> User {
        let created = self
            .store
            .insert(
                "INSERT INTO users (login, password) VALUES (:login, :password);",
                named_params! { ":login": user.login, ":password": user.password },
            )
            .map(|id| User {
                id: UserId(id),
                ..user.clone()
            });
        or_unsaved("user_create", user, created)
    }

    /// Replaces the persisted state from the caller's snapshot.
    pub fn update(&self, user: &User) {
        or_default(
            "user_update",
            self.store
                .execute(
                    "UPDATE users SET login = :login, password = :password WHERE id = :id;",
                    named_params! {
                        ":login": user.login,
                        ":password": user.password,
                        ":id": user.id.0,
                    },
                )
                .map(|_| ()),
        )
    }

    /// Removes the account; absent ids are a no-op.
    pub fn delete(&self, id: UserId) {
        or_default(
            "user_delete",
            self.store
                .execute(
                    "DELETE FROM users WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }

    /// Lists every account ordered by id.
    pub fn find_all(&self) -> Vec<User> {
        or_default(
            "user_find_all",
            self.store.list(
                &format!("{USER_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_user_row,
            ),
        )
    }

    pub fn find_by_id(&self, id: UserId) -> Option<User> {
        or_default(
            "user_find_by_id",
            self.store.optional(
                &format!("{USER_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_user_row,
            ),
        )
    }

    /// Exact-login lookup; logins are unique in the schema.
    pub fn find_by_login(&self, login: &str) -> Option<User> {
        or_default(
            "user_find_by_login",
            self.store.optional(
                &format!("{USER_SELECT_SQL} WHERE login = :login;"),
                named_params! { ":login": login },
                parse_user_row,
            ),
        )
    }

    /// Substring match over logins, ordered by id.
    ///
    /// The key is wrapped in `%`; wildcard characters inside it are not
    /// escaped and act as wildcards.
    pub fn find_by_login_like(&self, key: &str) -> Vec<User> {
        let pattern = format!("%{key}%");
        or_default(
            "user_find_by_login_like",
            self.store.list(
                &format!("{USER_SELECT_SQL} WHERE login LIKE :pattern ORDER BY id ASC;"),
                named_params! { ":pattern": pattern },
                parse_user_row,
            ),
        )
    }
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    Ok(User {
        id: UserId(row.get("id")?),
        login: row.get("login")?,
        password: row.get("password")?,
    })
}
