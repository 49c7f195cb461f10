//! Value literals found on the right-hand side of `.meta` lines.

use glam::Vec3;

/// Split `key = value` at the first `=`.
///
/// The key is trimmed, the value is returned as written. Fails if there is
/// no `=`, the key is blank, or nothing follows the `=`.
#[must_use]
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Unwrap a `"quoted"` string literal.
#[must_use]
pub fn unwrap_string(raw: &str) -> Option<&str> {
    raw.trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
}

/// Unwrap a `(x, y, z)` literal. Extra components past the third are ignored.
#[must_use]
pub fn unwrap_vec3(raw: &str) -> Option<Vec3> {
    let inner = raw.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut fields = inner.split(',');
    let mut next = || fields.next()?.trim().parse::<f32>().ok();
    Some(Vec3::new(next()?, next()?, next()?))
}

/// Parse a decimal integer, ignoring surrounding whitespace.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
