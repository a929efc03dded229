/// Make a display name safe to use as a file or directory name.
///
/// Alphanumerics, `-`, `_`, and `.` pass through; everything else (spaces,
/// path separators, timestamp colons, emoji) becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}
