//! Static lookup tables for TMDB language codes and genre ids
//!
//! TMDB listings only carry codes and numeric ids; these tables supply the
//! display names stored alongside them the first time each one is seen.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en", "English"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("zh", "Chinese"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("hi", "Hindi"),
        ("th", "Thai"),
        ("id", "Indonesian"),
        ("tr", "Turkish"),
        ("ar", "Arabic"),
        ("pl", "Polish"),
        ("nl", "Dutch"),
        ("sv", "Swedish"),
        ("no", "Norwegian"),
        ("da", "Danish"),
        ("fi", "Finnish"),
        ("cs", "Czech"),
        ("hu", "Hungarian"),
        ("ro", "Romanian"),
    ])
});

static GENRE_NAMES: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ])
});

/// Display name for an ISO 639-1 code, or the code itself when unknown
pub fn language_name(code: &str) -> String {
    LANGUAGE_NAMES
        .get(code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Display name for a TMDB genre id, or `Genre {id}` when unknown
pub fn genre_name(tmdb_id: i32) -> String {
    GENRE_NAMES
        .get(&tmdb_id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Genre {}", tmdb_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(LANGUAGE_NAMES.len(), 24);
        assert_eq!(GENRE_NAMES.len(), 19);
    }

    #[test]
    fn test_known_language() {
        assert_eq!(language_name("en"), "English");
        assert_eq!(language_name("id"), "Indonesian");
        assert_eq!(language_name("ro"), "Romanian");
    }

    #[test]
    fn test_unknown_language_falls_back_to_code() {
        assert_eq!(language_name("xx"), "xx");
        assert_eq!(language_name(""), "");
    }

    #[test]
    fn test_known_genre() {
        assert_eq!(genre_name(28), "Action");
        assert_eq!(genre_name(878), "Science Fiction");
        assert_eq!(genre_name(10770), "TV Movie");
    }

    #[test]
    fn test_unknown_genre() {
        assert_eq!(genre_name(1), "Genre 1");
    }
}
