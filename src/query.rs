//! Query engine: substring filter plus descending sort
//!
//! Works over any [`Entity`]. Filtering is a case-insensitive substring test
//! against the concatenation of the entity's two searchable fields. Sorting is
//! descending on one field and stable, so equal keys keep their input order.
//! Entities without a value for the sort key go after all entities that have
//! one.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use crate::core::{Error, Result};
use crate::storage::Store;
use crate::types::{Entity, EntityId};

/// Listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Substring to search for; empty matches everything
    #[serde(default)]
    pub q: String,

    /// Field to sort by, descending
    #[serde(default, rename = "sort-by")]
    pub sort_by: Option<String>,
}

impl ListQuery {
    /// Build a query from its parts
    pub fn new(q: impl Into<String>, sort_by: Option<&str>) -> Self {
        Self {
            q: q.into(),
            sort_by: sort_by.map(str::to_string),
        }
    }
}

/// One listing result: the entity with its identifier alongside its fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listed<E> {
    /// Identifier of the entity
    pub id: EntityId,

    /// The entity itself
    #[serde(flatten)]
    pub entity: E,
}

/// Check a requested sort key against the kind's allow-list
///
/// Falls back to the kind's default key when none is requested.
pub fn resolve_sort_key<E: Entity>(requested: Option<&str>) -> Result<&'static str> {
    match requested {
        None => Ok(E::DEFAULT_SORT_KEY),
        Some(key) => E::SORT_KEYS
            .iter()
            .copied()
            .find(|allowed| *allowed == key)
            .ok_or_else(|| {
                Error::invalid(format!(
                    "'sort-by' must be one of: {}",
                    E::SORT_KEYS.join(", ")
                ))
            }),
    }
}

/// Whether `entity` contains the lower-cased `needle` in its searchable text
pub fn matches<E: Entity>(entity: &E, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let (first, second) = entity.searchable_text();
    let mut haystack = String::with_capacity(first.len() + second.len());
    haystack.push_str(first);
    haystack.push_str(second);
    haystack.to_lowercase().contains(needle)
}

/// Filter `entities` by `query_substring` and sort them descending by key
///
/// `sort_key` falls back to `default_sort_key` when absent. The relative
/// order of the input is preserved among equal keys.
pub fn filter_and_sort<'a, E, I>(
    entities: I,
    query_substring: &str,
    sort_key: Option<&str>,
    default_sort_key: &str,
) -> Vec<(&'a EntityId, &'a E)>
where
    E: Entity,
    I: IntoIterator<Item = (&'a EntityId, &'a E)>,
{
    let needle = query_substring.to_lowercase();
    let key = sort_key.unwrap_or(default_sort_key);

    let mut selected: Vec<(&EntityId, &E)> = entities
        .into_iter()
        .filter(|(_, entity)| matches(*entity, &needle))
        .collect();

    selected.sort_by(|(_, a), (_, b)| descending(a.sort_value(key), b.sort_value(key)));
    selected
}

fn descending<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Run a listing against a store
///
/// Entries are fed to the engine in identifier order so ties come out the
/// same way on every call. Results are copied out so the read lock is
/// released before the caller renders them.
pub fn list<E: Entity>(store: &Store<E>, query: &ListQuery) -> Result<Vec<Listed<E>>> {
    let key = resolve_sort_key::<E>(query.sort_by.as_deref())?;

    let view = store.all();
    let mut entries: Vec<(&EntityId, &E)> = view.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let results = filter_and_sort(entries, &query.q, Some(key), E::DEFAULT_SORT_KEY)
        .into_iter()
        .map(|(id, entity)| Listed {
            id: id.clone(),
            entity: entity.clone(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "{} query q={:?} sort-by={} matched {}/{}",
        E::KIND,
        query.q,
        key,
        results.len(),
        view.len()
    );
    Ok(results)
}
