//! Server address normalization

/// Canonicalizes a user-supplied server address into a base URL
///
/// Whitespace is trimmed, the whole string is lowercased, every trailing `/`
/// is removed and `https://` is prepended when no `http://`/`https://`
/// scheme is present. The function is idempotent.
///
/// ```
/// use pmoaudiobookshelf::url::normalize_server_url;
///
/// assert_eq!(normalize_server_url("  Books.Example.COM/// "), "https://books.example.com");
/// assert_eq!(normalize_server_url("http://10.0.0.2:13378/"), "http://10.0.0.2:13378");
/// ```
pub fn normalize_server_url(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    // Les slashes du schéma lui-même ne sont jamais retirés
    for scheme in ["https://", "http://"] {
        if let Some(rest) = lowered.strip_prefix(scheme) {
            return format!("{}{}", scheme, rest.trim_end_matches('/'));
        }
    }

    format!("https://{}", lowered.trim_end_matches('/'))
}
