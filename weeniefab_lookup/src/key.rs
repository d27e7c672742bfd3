/// Derive the canonical key of a lookup table from its raw column header.
///
/// Everything up to and including the first `" - "` is a table number prefix and is dropped,
/// then the remainder is trimmed and spaces become underscores:
///
/// ```
/// use weeniefab_lookup::canonical_key;
///
/// assert_eq!(canonical_key("Table 3 - Damage Type"), "Damage_Type");
/// assert_eq!(canonical_key("DAMAGE_TYPE_INT"), "DAMAGE_TYPE_INT");
/// ```
pub fn canonical_key(raw: &str) -> String {
    let tail = match raw.find(" - ") {
        Some(idx) => &raw[idx + 3..],
        None => raw,
    };
    tail.trim().replace(' ', "_")
}

/// Case folding applied to keys before they are used to address the table map.
pub(crate) fn fold_key(key: &str) -> String {
    key.to_lowercase()
}
