//! Shared key generation for storage backends.
//!
//! Key format: `movies/{millis}_{filename}`. The millisecond component makes
//! keys unique per attempt even when two users upload files sharing a name.

use cinelog_core::constants::PHOTO_KEY_PREFIX;

/// Reduce a client-supplied filename to a storage-safe form: path separators
/// and anything outside `[A-Za-z0-9._-]` become `_`. An empty result falls
/// back to `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    let trimmed = name.trim_matches('.').to_string();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

/// Generate the storage key for a cover photo upload happening now.
pub fn photo_key(filename: &str) -> String {
    photo_key_at(chrono::Utc::now().timestamp_millis(), filename)
}

/// Generate the storage key for a cover photo upload at a given timestamp.
pub fn photo_key_at(millis: i64, filename: &str) -> String {
    format!(
        "{}/{}_{}",
        PHOTO_KEY_PREFIX,
        millis,
        sanitize_filename(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_key_ends_with_filename() {
        let key = photo_key_at(1_700_000_000_000, "poster.jpg");
        assert_eq!(key, "movies/1700000000000_poster.jpg");
        assert!(key.ends_with("_poster.jpg"));
    }

    #[test]
    fn test_photo_keys_differ_across_attempts() {
        let a = photo_key_at(1_700_000_000_000, "poster.jpg");
        let b = photo_key_at(1_700_000_000_001, "poster.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn test_photo_key_time_component_is_monotonic() {
        let earlier = photo_key(" poster.jpg");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = photo_key(" poster.jpg");
        assert!(later > earlier);
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir\\poster.jpg"), "poster.jpg");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my poster (1).jpg"), "my_poster__1_.jpg");
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("..."), "file");
    }
}
