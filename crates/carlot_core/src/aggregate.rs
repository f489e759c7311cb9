//! Post aggregate assembly.
//!
//! # Responsibility
//! - Load posts matching a filter together with their full object graph:
//!   author, car, engine, ownership history, photos, price history and
//!   participations.
//!
//! # Invariants
//! - To-one associations resolve inside the root query. Every to-many
//!   collection is hydrated in its own pass; two to-many collections never
//!   share a query, which rules out cartesian-product row blowup.
//! - All passes run on one transactional snapshot; a failing pass aborts the
//!   whole load, never yielding a partially hydrated aggregate.
//! - Result order is `created DESC, id DESC`, fixed by the root pass;
//!   collection passes attach in place without reordering.
//!
//! # See also
//! - docs/architecture/aggregate-loading.md

use crate::db::{StoreResult, StoreSession};
use crate::model::car::{Car, HistoryOwner};
use crate::model::engine::Engine;
use crate::model::file::FileRef;
use crate::model::ids::{
    CarId, EngineId, FileId, HistoryOwnerId, OwnerId, ParticipationId, PostId, PostPhotoId,
    PriceHistoryId, UserId,
};
use crate::model::owner::Owner;
use crate::model::post::{Participation, Post, PostPhoto, PriceHistory};
use crate::model::user::User;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row, ToSql};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

const ROOT_SELECT_SQL: &str = "SELECT
    p.id AS post_id,
    p.description,
    p.created,
    p.user_id,
    p.car_id,
    u.login AS author_login,
    u.password AS author_password,
    c.name AS car_name,
    c.engine_id,
    e.name AS engine_name
FROM posts p
JOIN users u ON u.id = p.user_id
JOIN cars c ON c.id = p.car_id
JOIN engines e ON e.id = c.engine_id";

const OWNERSHIP_SELECT_SQL: &str = "SELECT
    ho.id AS history_owner_id,
    ho.car_id,
    ho.owner_id,
    ho.start_at,
    ho.end_at,
    o.name AS owner_name,
    o.user_id AS owner_user_id,
    u.login AS owner_login,
    u.password AS owner_password
FROM history_owners ho
JOIN owners o ON o.id = ho.owner_id
JOIN users u ON u.id = o.user_id";

const PHOTO_SELECT_SQL: &str = "SELECT
    pp.id AS post_photo_id,
    pp.post_id,
    pp.file_id,
    pp.sort,
    f.name AS file_name,
    f.path AS file_path
FROM post_photos pp
JOIN files f ON f.id = pp.file_id";

const PRICE_SELECT_SQL: &str =
    "SELECT id, post_id, price_before, price_after, created FROM price_history";

const PARTICIPATION_SELECT_SQL: &str = "SELECT id, post_id, user_id FROM participations";

/// Filter applied by the root pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// Every post; compiles to the root query without a where clause.
    All,
    /// Creation time within `[from_ms, to_ms]`, both ends inclusive.
    CreatedBetween { from_ms: i64, to_ms: i64 },
    /// Posts carrying at least one photo, checked with an existential
    /// subquery rather than a null test.
    HasPhotos,
    /// Case-insensitive car-name substring. `%` and `_` inside the key are
    /// not escaped and act as wildcards.
    CarNameLike(String),
}

impl PostFilter {
    fn predicate(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::CreatedBetween { .. } => Some("p.created BETWEEN :from AND :to"),
            Self::HasPhotos => {
                Some("EXISTS (SELECT 1 FROM post_photos pp WHERE pp.post_id = p.id)")
            }
            Self::CarNameLike(_) => Some("lower(c.name) LIKE lower(:pattern)"),
        }
    }

    fn bind_values(&self) -> Vec<(&'static str, Value)> {
        match self {
            Self::All | Self::HasPhotos => Vec::new(),
            Self::CreatedBetween { from_ms, to_ms } => vec![
                (":from", Value::Integer(*from_ms)),
                (":to", Value::Integer(*to_ms)),
            ],
            Self::CarNameLike(key) => vec![(":pattern", Value::Text(format!("%{key}%")))],
        }
    }
}

/// One fully hydrated post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAggregate {
    pub post: Post,
    pub author: User,
    pub car: CarProfile,
    /// Ordered by `sort`, then id.
    pub photos: Vec<PhotoAttachment>,
    /// Ordered by change time, then id.
    pub price_history: Vec<PriceHistory>,
    pub participations: Vec<Participation>,
}

/// Car of a post with engine and ownership history resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarProfile {
    pub car: Car,
    pub engine: Engine,
    /// Ordered by interval start, then id.
    pub ownerships: Vec<OwnershipEntry>,
}

/// One ownership interval with its owner and the owner's account resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipEntry {
    pub record: HistoryOwner,
    pub owner: Owner,
    pub owner_user: User,
}

/// One photo slot with its file reference resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoAttachment {
    pub photo: PostPhoto,
    pub file: FileRef,
}

/// Loads every post matching `filter` with its full graph attached.
///
/// Runs entirely on the session's transaction: one root pass resolves the
/// filter and the to-one associations, then one pass per to-many collection,
/// each scoped to the candidate set through an IN-list and merged in place.
/// An empty candidate set short-circuits the collection passes.
pub fn load_post_aggregates(
    session: &StoreSession<'_>,
    filter: &PostFilter,
) -> StoreResult<Vec<PostAggregate>> {
    let mut aggregates = root_pass(session, filter)?;
    if aggregates.is_empty() {
        return Ok(aggregates);
    }

    attach_ownerships(session, &mut aggregates)?;
    attach_photos(session, &mut aggregates)?;
    attach_price_history(session, &mut aggregates)?;
    attach_participations(session, &mut aggregates)?;

    Ok(aggregates)
}

fn root_pass(session: &StoreSession<'_>, filter: &PostFilter) -> StoreResult<Vec<PostAggregate>> {
    let mut sql = ROOT_SELECT_SQL.to_string();
    if let Some(predicate) = filter.predicate() {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }
    sql.push_str(" ORDER BY p.created DESC, p.id DESC");

    let binds = filter.bind_values();
    let params: Vec<(&str, &dyn ToSql)> = binds
        .iter()
        .map(|(name, value)| (*name, value as &dyn ToSql))
        .collect();

    session.list(&sql, params.as_slice(), parse_root_row)
}

fn attach_ownerships(
    session: &StoreSession<'_>,
    aggregates: &mut [PostAggregate],
) -> StoreResult<()> {
    // Several posts may advertise the same car; every such slot receives the
    // car's full history.
    let mut slots_by_car: HashMap<CarId, Vec<usize>> = HashMap::new();
    let mut car_ids: BTreeSet<CarId> = BTreeSet::new();
    for (index, aggregate) in aggregates.iter().enumerate() {
        slots_by_car
            .entry(aggregate.post.car_id)
            .or_default()
            .push(index);
        car_ids.insert(aggregate.post.car_id);
    }

    let sql = format!(
        "{OWNERSHIP_SELECT_SQL} WHERE ho.car_id IN ({}) ORDER BY ho.start_at ASC, ho.id ASC",
        in_placeholders(car_ids.len())
    );
    let entries = session.list(
        &sql,
        params_from_iter(car_ids.iter().map(|id| id.0)),
        parse_ownership_row,
    )?;

    for (car_id, entry) in entries {
        if let Some(slots) = slots_by_car.get(&car_id) {
            for &index in slots {
                aggregates[index].car.ownerships.push(entry.clone());
            }
        }
    }
    Ok(())
}

fn attach_photos(session: &StoreSession<'_>, aggregates: &mut [PostAggregate]) -> StoreResult<()> {
    let slot_by_post = index_by_post(aggregates);

    let sql = format!(
        "{PHOTO_SELECT_SQL} WHERE pp.post_id IN ({}) ORDER BY pp.sort ASC, pp.id ASC",
        in_placeholders(aggregates.len())
    );
    let attachments = session.list(
        &sql,
        params_from_iter(post_id_values(aggregates)),
        parse_photo_row,
    )?;

    for (post_id, attachment) in attachments {
        if let Some(&index) = slot_by_post.get(&post_id) {
            aggregates[index].photos.push(attachment);
        }
    }
    Ok(())
}

fn attach_price_history(
    session: &StoreSession<'_>,
    aggregates: &mut [PostAggregate],
) -> StoreResult<()> {
    let slot_by_post = index_by_post(aggregates);

    let sql = format!(
        "{PRICE_SELECT_SQL} WHERE post_id IN ({}) ORDER BY created ASC, id ASC",
        in_placeholders(aggregates.len())
    );
    let changes = session.list(
        &sql,
        params_from_iter(post_id_values(aggregates)),
        parse_price_row,
    )?;

    for change in changes {
        if let Some(&index) = slot_by_post.get(&change.post_id) {
            aggregates[index].price_history.push(change);
        }
    }
    Ok(())
}

fn attach_participations(
    session: &StoreSession<'_>,
    aggregates: &mut [PostAggregate],
) -> StoreResult<()> {
    let slot_by_post = index_by_post(aggregates);

    let sql = format!(
        "{PARTICIPATION_SELECT_SQL} WHERE post_id IN ({}) ORDER BY id ASC",
        in_placeholders(aggregates.len())
    );
    let participations = session.list(
        &sql,
        params_from_iter(post_id_values(aggregates)),
        parse_participation_row,
    )?;

    for participation in participations {
        if let Some(&index) = slot_by_post.get(&participation.post_id) {
            aggregates[index].participations.push(participation);
        }
    }
    Ok(())
}

// The root pass yields one row per post, so post ids index uniquely.
fn index_by_post(aggregates: &[PostAggregate]) -> HashMap<PostId, usize> {
    aggregates
        .iter()
        .enumerate()
        .map(|(index, aggregate)| (aggregate.post.id, index))
        .collect()
}

fn post_id_values(aggregates: &[PostAggregate]) -> impl Iterator<Item = i64> + '_ {
    aggregates.iter().map(|aggregate| aggregate.post.id.0)
}

fn in_placeholders(count: usize) -> String {
    let mut placeholders = String::with_capacity(count.saturating_mul(3));
    for index in 0..count {
        if index > 0 {
            placeholders.push_str(", ");
        }
        placeholders.push('?');
    }
    placeholders
}

fn parse_root_row(row: &Row<'_>) -> StoreResult<PostAggregate> {
    let user_id = UserId(row.get("user_id")?);
    let car_id = CarId(row.get("car_id")?);
    let engine_id = EngineId(row.get("engine_id")?);

    Ok(PostAggregate {
        post: Post {
            id: PostId(row.get("post_id")?),
            description: row.get("description")?,
            created: row.get("created")?,
            user_id,
            car_id,
        },
        author: User {
            id: user_id,
            login: row.get("author_login")?,
            password: row.get("author_password")?,
        },
        car: CarProfile {
            car: Car {
                id: car_id,
                name: row.get("car_name")?,
                engine_id,
            },
            engine: Engine {
                id: engine_id,
                name: row.get("engine_name")?,
            },
            ownerships: Vec::new(),
        },
        photos: Vec::new(),
        price_history: Vec::new(),
        participations: Vec::new(),
    })
}

fn parse_ownership_row(row: &Row<'_>) -> StoreResult<(CarId, OwnershipEntry)> {
    let car_id = CarId(row.get("car_id")?);
    let owner_id = OwnerId(row.get("owner_id")?);
    let owner_user_id = UserId(row.get("owner_user_id")?);

    let entry = OwnershipEntry {
        record: HistoryOwner {
            id: HistoryOwnerId(row.get("history_owner_id")?),
            car_id,
            owner_id,
            start_at: row.get("start_at")?,
            end_at: row.get("end_at")?,
        },
        owner: Owner {
            id: owner_id,
            name: row.get("owner_name")?,
            user_id: owner_user_id,
        },
        owner_user: User {
            id: owner_user_id,
            login: row.get("owner_login")?,
            password: row.get("owner_password")?,
        },
    };
    Ok((car_id, entry))
}

fn parse_photo_row(row: &Row<'_>) -> StoreResult<(PostId, PhotoAttachment)> {
    let post_id = PostId(row.get("post_id")?);
    let file_id = FileId(row.get("file_id")?);

    let attachment = PhotoAttachment {
        photo: PostPhoto {
            id: PostPhotoId(row.get("post_photo_id")?),
            post_id,
            file_id,
            sort: row.get("sort")?,
        },
        file: FileRef {
            id: file_id,
            name: row.get("file_name")?,
            path: row.get("file_path")?,
        },
    };
    Ok((post_id, attachment))
}

fn parse_price_row(row: &Row<'_>) -> StoreResult<PriceHistory> {
    Ok(PriceHistory {
        id: PriceHistoryId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        price_before: row.get("price_before")?,
        price_after: row.get("price_after")?,
        created: row.get("created")?,
    })
}

fn parse_participation_row(row: &Row<'_>) -> StoreResult<Participation> {
    Ok(Participation {
        id: ParticipationId(row.get("id")?),
        post_id: PostId(row.get("post_id")?),
        user_id: UserId(row.get("user_id")?),
    })
}

#[cfg(test)]
mod tests {
    use super::{in_placeholders, PostFilter};
    use rusqlite::types::Value;

    #[test]
    fn all_filter_has_no_predicate_and_no_binds() {
        assert_eq!(PostFilter::All.predicate(), None);
        assert!(PostFilter::All.bind_values().is_empty());
    }

    #[test]
    fn created_between_binds_both_ends() {
        let filter = PostFilter::CreatedBetween {
            from_ms: 10,
            to_ms: 20,
        };
        assert_eq!(filter.predicate(), Some("p.created BETWEEN :from AND :to"));
        assert_eq!(
            filter.bind_values(),
            vec![
                (":from", Value::Integer(10)),
                (":to", Value::Integer(20)),
            ]
        );
    }

    #[test]
    fn car_name_key_is_wrapped_but_not_escaped() {
        let filter = PostFilter::CarNameLike("a%a".to_string());
        assert_eq!(
            filter.bind_values(),
            vec![(":pattern", Value::Text("%a%a%".to_string()))]
        );
    }

    #[test]
    fn has_photos_uses_existential_subquery() {
        let predicate = PostFilter::HasPhotos.predicate().expect("predicate");
        assert!(predicate.starts_with("EXISTS"));
        assert!(!predicate.contains("IS NOT NULL"));
    }

    #[test]
    fn placeholders_match_count() {
        assert_eq!(in_placeholders(1), "?");
        assert_eq!(in_placeholders(3), "?, ?, ?");
    }
}
