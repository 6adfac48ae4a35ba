/// Validates a decorator or parameter identifier.
///
/// Checks:
/// - Non-empty
/// - Starts with an ASCII letter or `_`
/// - Remaining characters are ASCII alphanumeric or `_`
pub fn validate_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates an invocation marker: exactly three non-alphanumeric,
/// non-whitespace characters.
pub fn validate_marker(marker: &str) -> bool {
    marker.chars().count() == 3
        && marker.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace() && c != '_')
}

/// Case-folded lookup key for a decorator name.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
