//! Post photo repository façade.
//!
//! No update path: a photo slot is replaced by delete-and-create.

use crate::db::{Store, StoreResult};
use crate::model::ids::{FileId, PostId, PostPhotoId};
use crate::model::post::PostPhoto;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const POST_PHOTO_SELECT_SQL: &str = "SELECT id, post_id, file_id, sort FROM post_photos";

pub struct PostPhotoRepository<'db> {
    store: &'db Store,
}

impl<'db> PostPhotoRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    pub fn create(&self, photo: PostPhoto) -> PostPhoto {
        let created = self
            .store
            .insert(
                "INSERT INTO post_photos (post_id, file_id, sort)
                 VALUES (:post_id, :file_id, :sort);",
                named_params! {
                    ":post_id": photo.post_id.0,
                    ":file_id": photo.file_id.0,
                    ":sort": photo.sort,
                },
            )
            .map(|id| PostPhoto {
                id: PostPhotoId(id),
                ..photo.clone()
            });
        or_unsaved("post_photo_create", photo, created)
    }

    pub fn find_by_id(&self, id: PostPhotoId) -> Option<PostPhoto> {
        or_default(
            "post_photo_find_by_id",
            self.store.optional(
                &format!("{POST_PHOTO_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_post_photo_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<PostPhoto> {
        or_default(
            "post_photo_find_all",
            self.store.list(
                &format!("{POST_PHOTO_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_post_photo_row,
            ),
        )
    }

    pub fn delete(&self, id: PostPhotoId) {
        or_default(
            "post_photo_delete",
            self.store
                .execute(
                    "DELETE FROM post_photos WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_post_photo_row(row: &Row<'_>) -> StoreResult<PostPhoto> {
    Ok(PostPhoto {
        id: PostPhotoId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        file_id: FileId(row.get("file_id")?),
        sort: row.get("sort")?,
    })
}
