//! Transaction-scoped query engine over a single SQLite connection.
//!
//! # Responsibility
//! - Serve one session per engine call and release it on every exit path.
//! - Wrap each unit of work in exactly one transaction: commit on success,
//!   roll back on failure.
//! - Bind named parameters and materialize rows for callers.
//!
//! # Invariants
//! - No call leaves a transaction open past its own boundary.
//! - Failures are never swallowed here; the repository layer decides how to
//!   degrade.
//! - Every statement issued by one unit of work observes the same
//!   transactional snapshot.
//!
//! # See also
//! - docs/architecture/aggregate-loading.md

use super::DbError;
use rusqlite::{Connection, Params, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Engine-level failure surfaced to the repository layer.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A query expected at most one row and produced more.
    NonUniqueResult,
    /// A value failed validation or a persisted row failed to materialize.
    InvalidData(String),
    /// The session lock was poisoned by a panic on another thread.
    SessionPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NonUniqueResult => write!(f, "query expected at most one row"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
            Self::SessionPoisoned => write!(f, "store session lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NonUniqueResult | Self::InvalidData(_) | Self::SessionPoisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Shared handle over one SQLite connection, serving per-call sessions.
///
/// Each engine call locks the connection for exactly its own duration; the
/// guard is released on every exit path, panics included. Calls from
/// different threads therefore serialize at this handle.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Wraps a bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `work` inside one transaction and returns its result.
    ///
    /// Commits when `work` returns `Ok`. On `Err` the transaction is dropped
    /// without commit, which rolls it back; the failure propagates untouched.
    pub fn query<T>(
        &self,
        work: impl FnOnce(&StoreSession<'_>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let guard = self.acquire()?;
        let tx = Transaction::new_unchecked(&guard, TransactionBehavior::Immediate)?;
        let session = StoreSession { tx };
        let value = work(&session)?;
        session.tx.commit()?;
        Ok(value)
    }

    /// Command shape of [`Store::query`]: a unit of work without a result.
    pub fn run(&self, work: impl FnOnce(&StoreSession<'_>) -> StoreResult<()>) -> StoreResult<()> {
        self.query(work)
    }

    /// Executes one write statement in its own transaction, returning the
    /// affected-row count.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        self.query(|session| session.execute(sql, params))
    }

    /// Executes one insert in its own transaction, returning the
    /// store-assigned row id.
    pub fn insert(&self, sql: &str, params: impl Params) -> StoreResult<i64> {
        self.query(|session| session.insert(sql, params))
    }

    /// Runs one query expected to produce at most one row.
    pub fn optional<T>(
        &self,
        sql: &str,
        params: impl Params,
        map: impl FnMut(&Row<'_>) -> StoreResult<T>,
    ) -> StoreResult<Option<T>> {
        self.query(|session| session.optional(sql, params, map))
    }

    /// Runs one query and returns every row in store order.
    pub fn list<T>(
        &self,
        sql: &str,
        params: impl Params,
        map: impl FnMut(&Row<'_>) -> StoreResult<T>,
    ) -> StoreResult<Vec<T>> {
        self.query(|session| session.list(sql, params, map))
    }

    fn acquire(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::SessionPoisoned)
    }
}

/// Live transaction handed to units of work.
///
/// Every statement runs on the same transaction; nothing is visible outside
/// until the owning [`Store::query`] commits.
pub struct StoreSession<'conn> {
    tx: Transaction<'conn>,
}

impl StoreSession<'_> {
    /// Executes a write statement, returning the affected-row count.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        Ok(self.tx.execute(sql, params)?)
    }

    /// Executes an insert and returns the store-assigned row id.
    pub fn insert(&self, sql: &str, params: impl Params) -> StoreResult<i64> {
        self.tx.execute(sql, params)?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Runs a query expected to produce at most one row.
    ///
    /// Returns `Ok(None)` on zero rows and [`StoreError::NonUniqueResult`]
    /// when a second row shows up.
    pub fn optional<T>(
        &self,
        sql: &str,
        params: impl Params,
        mut map: impl FnMut(&Row<'_>) -> StoreResult<T>,
    ) -> StoreResult<Option<T>> {
        let mut stmt = self.tx.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let value = match rows.next()? {
            Some(row) => map(row)?,
            None => return Ok(None),
        };
        if rows.next()?.is_some() {
            return Err(StoreError::NonUniqueResult);
        }
        Ok(Some(value))
    }

    /// Runs a query and materializes every row in store-returned order.
    pub fn list<T>(
        &self,
        sql: &str,
        params: impl Params,
        mut map: impl FnMut(&Row<'_>) -> StoreResult<T>,
    ) -> StoreResult<Vec<T>> {
        let mut stmt = self.tx.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(map(row)?);
        }
        Ok(items)
    }
}
