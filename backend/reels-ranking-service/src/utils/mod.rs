// Utility functions for reels-ranking-service

/// Split a comma-separated relational field into trimmed, non-empty parts.
///
/// A missing field yields an empty list.
pub fn split_field(field: Option<&str>) -> Vec<String> {
    field
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
