//! File reference repository façade.
//!
//! No update path: file rows are immutable once written, matching the
//! append-only handling of uploaded content.

use crate::db::{Store, StoreResult};
use crate::model::file::FileRef;
use crate::model::ids::FileId;
use crate::repo::{or_default, or_unsaved};
use rusqlite::{named_params, Row};

const FILE_SELECT_SQL: &str = "SELECT id, name, path FROM files";

pub struct FileRepository<'db> {
    store: &'db Store,
}

impl<'db> FileRepository<'db> {
    pub fn new(store: &'db Store) -> Self {
        Self { store }
    }

    /// Persists a new file row; `path` is unique, duplicates degrade to the
    /// unchanged input.
    pub fn create(&self, file: FileRef) -> FileRef {
        let created = self
            .store
            .insert(
                "INSERT INTO files (name, path) VALUES (:name, :path);",
                named_params! { ":name": file.name, ":path": file.path },
            )
            .map(|id| FileRef {
                id: FileId(id),
                ..file.clone()
            });
        or_unsaved("file_create", file, created)
    }

    pub fn find_by_id(&self, id: FileId) -> Option<FileRef> {
        or_default(
            "file_find_by_id",
            self.store.optional(
                &format!("{FILE_SELECT_SQL} WHERE id = :id;"),
                named_params! { ":id": id.0 },
                parse_file_row,
            ),
        )
    }

    pub fn find_all(&self) -> Vec<FileRef> {
        or_default(
            "file_find_all",
            self.store.list(
                &format!("{FILE_SELECT_SQL} ORDER BY id ASC;"),
                [],
                parse_file_row,
            ),
        )
    }

    pub fn delete(&self, id: FileId) {
        or_default(
            "file_delete",
            self.store
                .execute(
                    "DELETE FROM files WHERE id = :id;",
                    named_params! { ":id": id.0 },
                )
                .map(|_| ()),
        )
    }
}

fn parse_file_row(row: &Row<'_>) -> StoreResult<FileRef> {
    Ok(FileRef {
        id: FileId(row.get("id")?),
        name: row.get("name")?,
        path: row.get("path")?,
    })
}
