use carlot_core::{open_db_in_memory, Store, StoreError, StoreResult};
use rusqlite::named_params;

#[test]
fn query_commits_on_success() {
    let store = open_store();

    store
        .query(|session| {
            session.insert(
                "INSERT INTO engines (name) VALUES (:name);",
                named_params! { ":name": "V8" },
            )
        })
        .unwrap();

    assert_eq!(engine_count(&store), 1);
}

#[test]
fn run_commits_commands() {
    let store = open_store();

    store
        .run(|session| {
            session.execute(
                "INSERT INTO engines (name) VALUES (:name);",
                named_params! { ":name": "V6" },
            )?;
            Ok(())
        })
        .unwrap();

    assert_eq!(engine_count(&store), 1);
}

#[test]
fn query_rolls_back_when_work_fails() {
    let store = open_store();

    let result: StoreResult<()> = store.query(|session| {
        session.insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )?;
        Err(StoreError::InvalidData("forced failure".to_string()))
    });

    assert!(matches!(result, Err(StoreError::InvalidData(_))));
    assert_eq!(engine_count(&store), 0);
}

#[test]
fn statements_in_one_unit_of_work_share_the_transaction() {
    let store = open_store();

    let count = store
        .query(|session| {
            session.insert(
                "INSERT INTO engines (name) VALUES (:name);",
                named_params! { ":name": "V6" },
            )?;
            session.optional("SELECT COUNT(*) FROM engines;", [], |row| {
                Ok(row.get::<_, i64>(0)?)
            })
        })
        .unwrap();

    assert_eq!(count, Some(1));
}

#[test]
fn insert_returns_store_assigned_ids_starting_at_one() {
    let store = open_store();

    let first = store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )
        .unwrap();
    let second = store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V6" },
        )
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[test]
fn optional_handles_zero_one_and_many_rows() {
    let store = open_store();

    let absent = store
        .optional(
            "SELECT id FROM engines WHERE name = :name;",
            named_params! { ":name": "V8" },
            |row| Ok(row.get::<_, i64>("id")?),
        )
        .unwrap();
    assert_eq!(absent, None);

    store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )
        .unwrap();
    let found = store
        .optional(
            "SELECT id FROM engines WHERE name = :name;",
            named_params! { ":name": "V8" },
            |row| Ok(row.get::<_, i64>("id")?),
        )
        .unwrap();
    assert_eq!(found, Some(1));

    store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )
        .unwrap();
    let ambiguous = store.optional(
        "SELECT id FROM engines WHERE name = :name;",
        named_params! { ":name": "V8" },
        |row| Ok(row.get::<_, i64>("id")?),
    );
    assert!(matches!(ambiguous, Err(StoreError::NonUniqueResult)));
}

#[test]
fn execute_returns_affected_row_count() {
    let store = open_store();

    store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )
        .unwrap();
    store
        .insert(
            "INSERT INTO engines (name) VALUES (:name);",
            named_params! { ":name": "V8" },
        )
        .unwrap();

    let updated = store
        .execute(
            "UPDATE engines SET name = :next WHERE name = :current;",
            named_params! { ":next": "V12", ":current": "V8" },
        )
        .unwrap();
    assert_eq!(updated, 2);

    let deleted = store
        .execute(
            "DELETE FROM engines WHERE name = :name;",
            named_params! { ":name": "absent" },
        )
        .unwrap();
    assert_eq!(deleted, 0);
}

fn open_store() -> Store {
    Store::new(open_db_in_memory().unwrap())
}

fn engine_count(store: &Store) -> i64 {
    store
        .optional("SELECT COUNT(*) FROM engines;", [], |row| {
            Ok(row.get::<_, i64>(0)?)
        })
        .unwrap()
        .unwrap()
}
