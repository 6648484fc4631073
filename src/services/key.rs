/// Derives the remote object key from an optional caller-supplied path
/// prefix and the file's original name.
///
/// A non-empty prefix is joined to the name with exactly one `/`; an absent
/// or empty prefix yields the name unchanged. The name itself is not
/// validated.
pub fn resolve(prefix: Option<&str>, original_name: &str) -> String {
    match prefix {
        None => original_name.to_string(),
        Some(p) if p.is_empty() => original_name.to_string(),
        Some(p) if p.ends_with('/') => format!("{}{}", p, original_name),
        Some(p) => format!("{}/{}", p, original_name),
    }
}
