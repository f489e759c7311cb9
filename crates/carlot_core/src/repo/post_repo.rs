//! Post repository façade and the aggregate loads.
//!
//! # Responsibility
//! - Fail-soft CRUD over `posts` rows.
//! - The filtered aggregate loads, each delegating to the assembler inside
//!   a single transaction.
//!
//! # See also
//! - docs/architecture/aggregate-loading.md

use crate::aggregate::{load_post_aggregates, PostAggregate, PostFilter};
use crate::db::{Store, StoreResult};
use crate::model::ids::{CarId, PostId, UserId};
use crate::model::post::Post;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const POST_SELECT_SQL: &str = "SELECT id, description, created, user_id, car_id FROM posts";

pub struct PostRepository<'db> {
    store: &'db Store,
}

impl<'db> PostRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, post: Post) -> Post {
        let created = self
            .store
            .insert(
                "INSERT INTO posts (description, created, user_id, car_id)
                 VALUES (:description, :created, :user_id, :car_id);",
                named_params! {
                    ":description": post.description,
                    ":created": post.created,
                    ":user_id": post.user_id.0,
                    ":car_id": post.car_id.0,
                },
            )
            .map(|id| Post {
                id: PostId(id),
                ..post.clone()
            });
        or_unsaved("post_create", post, created)
    }

    /// Row-shape lookup; the attached collections stay in the store. Use the
    /// aggregate loads for the full graph.
    pub fn find_by_id(&self, id: PostId) -> Option<Post> {
        or_default(
            "post_find_by_id",
            self.store.optional(
                &format!("{POST_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_post_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<Post> {
        or_default(
            "post_find_all",
            self.store.list(
                &format!("{POST_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_post_row,
            ),
        )
    }

    /// Replaces the persisted row from the caller's snapshot; attached
    /// collections are managed through their own repositories.
    pub fn update(&self, post: &Post) {
        or_default(
            "post_update",
            self.store
                .execute(
                    "UPDATE posts
                     SET description = :description, created = :created,
                         user_id = :user_id, car_id = :car_id
                     WHERE id = :id;",
                    named_params! {
                        ":description": post.description,
                        ":created": post.created,
                        ":user_id": post.user_id.0,
                        ":car_id": post.car_id.0,
                        ":id": post.id.0,
                    },
                )
                .map(|_| ()),
        )
    }

    /// Removes the post; absent ids are a no-op. A post still carrying
    /// photos, price changes or participations stays in place (foreign keys
    /// restrict).
    pub fn delete(&self, id: PostId) {
        or_default(
            "post_delete",
            self.store
                .execute(
                    "DELETE FROM posts WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }

    /// Loads every post with its full graph, newest first.
    pub fn find_all_aggregates(&self) -> Vec<PostAggregate> {
        self.load_aggregates("post_find_all_aggregates", PostFilter::All)
    }

    /// Loads posts created within `[from_ms, to_ms]`, both ends inclusive,
    /// newest first.
    pub fn find_all_created_between(&self, from_ms: i64, to_ms: i64) -> Vec<PostAggregate> {
        self.load_aggregates(
            "post_find_all_created_between",
            PostFilter::CreatedBetween { from_ms, to_ms },
        )
    }

    /// Loads posts carrying at least one photo, newest first.
    pub fn find_all_with_photos(&self) -> Vec<PostAggregate> {
        self.load_aggregates("post_find_all_with_photos", PostFilter::HasPhotos)
    }

    /// Loads posts whose car name contains `key` case-insensitively, newest
    /// first. Wildcards inside `key` are not escaped.
    pub fn find_all_by_car_name_like(&self, key: &str) -> Vec<PostAggregate> {
        self.load_aggregates(
            "post_find_all_by_car_name_like",
            PostFilter::CarNameLike(key.to_string()),
        )
    }

    fn load_aggregates(&self, op: &'static str, filter: PostFilter) -> Vec<PostAggregate> {
        or_default(
            op,
            self.store
                .query(|session| load_post_aggregates(session, &filter)),
        )
    }
}

fn parse_post_row(row: &Row<'_>) -> StoreResult<Post> {
    Ok(Post {
        id: PostId(row.get("id")?),
        description: row.get("description")?,
        created: row.get("created")?,
        user_id: UserId(row.get("user_id")?),
        car_id: CarId(row.get("car_id")?),
    })
}
