//! Filename validation and normalization.

/// Extensions accepted by `POST /process`.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Whether the filename has a dot and its last extension (case-insensitive) is allowed.
pub fn is_allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| {
            let extension = extension.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&extension.as_str())
        })
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Path separators become word breaks, characters outside `[A-Za-z0-9_.-]` are dropped,
/// whitespace runs collapse to `_`, and leading/trailing `.`/`_` are stripped. The result may be
/// empty. It is never used as a storage path.
///
/// Non-ASCII characters are dropped rather than transliterated (`résumé.pdf` becomes
/// `rsum.pdf`). The extension is always ASCII for accepted uploads, so dispatch is unaffected.
pub fn sanitize_file_name(file_name: &str) -> String {
    let flattened: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}
