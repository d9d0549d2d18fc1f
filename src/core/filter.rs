//! Free-text search over a catalog of server records.

use crate::core::catalog::ServerRecord;

/// Filters a catalog by free-text query and connection-variant substring.
///
/// Returns an order-preserving subsequence of `servers` where:
/// - the variant label contains `variant` (case-insensitive substring,
///   so "tcp" selects TCP across regular, static and multipoint classes);
/// - and, if `query` is non-empty, the country, alternate search word or
///   city starts with it (case-insensitive prefix, any one suffices).
///
/// Truncation to the configured maximum entry count is the caller's
/// concern; the filter returns all matches.
#[must_use]
pub fn filter_servers<'a>(
    servers: &'a [ServerRecord],
    query: &str,
    variant: &str,
) -> Vec<&'a ServerRecord> {
    let query = query.to_lowercase();
    let variant = variant.to_lowercase();

    servers
        .iter()
        .filter(|s| s.variant.label().to_lowercase().contains(&variant))
        .filter(|s| {
            query.is_empty()
                || s.country.to_lowercase().starts_with(&query)
                || s.alt_word.to_lowercase().starts_with(&query)
                || s.city.to_lowercase().starts_with(&query)
        })
        .collect()
}
