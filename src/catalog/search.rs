//! Two-tier plant search: substring matching first, fuzzy name matching only
//! when the substring pass finds nothing.

use tracing::debug;

use super::fuzzy::partial_ratio;
use super::store::CatalogStore;
use super::{CatalogEntry, Plant};
use crate::error::Result;

/// Fuzzy scores must be strictly above this to count as a match
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 60;

/// Maximum number of autocomplete suggestions
pub const DEFAULT_AUTOCOMPLETE_LIMIT: usize = 10;

/// Case-insensitive substring test against name, species and description.
///
/// `query_lower` must already be lower-cased.
pub fn matches_exact<E: CatalogEntry + ?Sized>(entry: &E, query_lower: &str) -> bool {
    let contains = |field: &str| !field.is_empty() && field.to_lowercase().contains(query_lower);

    contains(entry.name())
        || entry.species().is_some_and(contains)
        || entry.description().is_some_and(contains)
}

/// Fuzzy pass: entries whose lower-cased name scores above `threshold`
fn fuzzy_pass<'a, E: CatalogEntry>(query_lower: &str, entries: &'a [E], threshold: u8) -> Vec<&'a E> {
    entries
        .iter()
        .filter(|entry| partial_ratio(query_lower, &entry.name().to_lowercase()) > threshold)
        .collect()
}

/// Search `entries` for `query` using the default fuzzy threshold
pub fn search<'a, E: CatalogEntry>(query: &str, entries: &'a [E]) -> Vec<&'a E> {
    search_with_threshold(query, entries, DEFAULT_FUZZY_THRESHOLD)
}

/// Search `entries` for `query`.
///
/// An empty query returns every entry. Otherwise the substring matches are
/// returned, or, if there are none, the fuzzy name matches. Order always
/// follows `entries`.
pub fn search_with_threshold<'a, E: CatalogEntry>(
    query: &str,
    entries: &'a [E],
    threshold: u8,
) -> Vec<&'a E> {
    if query.is_empty() {
        return entries.iter().collect();
    }

    let query_lower = query.to_lowercase();
    let exact: Vec<&E> = entries
        .iter()
        .filter(|entry| matches_exact(*entry, &query_lower))
        .collect();

    if !exact.is_empty() {
        debug!("Search '{}': {} exact matches", query, exact.len());
        return exact;
    }

    let fuzzy = fuzzy_pass(&query_lower, entries, threshold);
    debug!("Search '{}': no exact matches, {} fuzzy matches", query, fuzzy.len());
    fuzzy
}

/// Store-backed plant search.
///
/// The substring pass is delegated to the store; the fuzzy pass runs over the
/// full plant list only when that comes back empty.
pub async fn search_plants<S: CatalogStore + ?Sized>(
    store: &S,
    query: &str,
    threshold: u8,
) -> Result<Vec<Plant>> {
    if query.is_empty() {
        return store.plants().await;
    }

    let exact = store.plants_matching(query).await?;
    if !exact.is_empty() {
        debug!("Search '{}': {} exact matches", query, exact.len());
        return Ok(exact);
    }

    let all = store.plants().await?;
    let query_lower = query.to_lowercase();
    let fuzzy: Vec<Plant> = fuzzy_pass(&query_lower, &all, threshold)
        .into_iter()
        .cloned()
        .collect();

    debug!("Search '{}': no exact matches, {} fuzzy matches", query, fuzzy.len());
    Ok(fuzzy)
}

/// Names starting with `term` (case-insensitive), at most `limit` of them
pub fn autocomplete<E: CatalogEntry>(term: &str, entries: &[E], limit: usize) -> Vec<String> {
    if term.is_empty() {
        return Vec::new();
    }

    let term_lower = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name().to_lowercase().starts_with(&term_lower))
        .take(limit)
        .map(|entry| entry.name().to_string())
        .collect()
}
