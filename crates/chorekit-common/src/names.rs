//! File-name cleaning for release-style media names.
//!
//! Downloaded or ripped media often carries group tags, dotted words and
//! underscores (`[Group] Some_Show.S01E02.[1080p].mkv`). The batch re-encoder
//! writes its outputs under the cleaned name.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TAG_GROUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\{[^}]*\}").expect("valid tag regex"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._]+").expect("valid separator regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Clean a file name, keeping its extension (lowercased).
///
/// Bracketed and braced tags are dropped, dots and underscores inside the stem
/// become spaces, and runs of whitespace collapse. If nothing is left of the
/// stem, the original stem is kept.
///
/// # Examples
///
/// ```
/// use chorekit_common::names::clean_file_name;
///
/// assert_eq!(clean_file_name("Some.Movie.2020.MKV"), "Some Movie 2020.mkv");
/// assert_eq!(clean_file_name("movie.mkv"), "movie.mkv");
/// ```
pub fn clean_file_name(name: &str) -> String {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    let cleaned = clean_stem(&stem);
    let stem = if cleaned.is_empty() { stem } else { cleaned };

    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn clean_stem(stem: &str) -> String {
    let without_tags = TAG_GROUPS.replace_all(stem, " ");
    let spaced = SEPARATORS.replace_all(&without_tags, " ");
    let collapsed = WHITESPACE.replace_all(&spaced, " ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || c == '-')
        .to_string()
}
