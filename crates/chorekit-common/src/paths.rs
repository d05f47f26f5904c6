//! Path utilities for media artifacts.
//!
//! File type detection by extension, plus the naming rule used for every
//! artifact an edit step produces next to its input.

use std::path::{Path, PathBuf};

/// List of recognised video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "ts", "webm", "mov", "wmv", "flv",
];

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use chorekit_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.MP4")));
/// assert!(!is_video_file(Path::new("subtitle.srt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get the list of video file extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

/// Path of the artifact derived from `path` by an operation named `suffix`.
///
/// The artifact lives next to its source as `<stem>_<suffix>.<ext>`. Because
/// the stem only ever grows, a chain of derived paths never revisits an
/// earlier one.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use chorekit_common::paths::derived_path;
///
/// assert_eq!(
///     derived_path(Path::new("/videos/clip.mkv"), "trim"),
///     PathBuf::from("/videos/clip_trim.mkv")
/// );
/// ```
pub fn derived_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    path.with_file_name(name)
}

/// Append `default_ext` to `name` unless it already ends in a video extension.
///
/// # Examples
///
/// ```
/// use chorekit_common::paths::with_video_extension;
///
/// assert_eq!(with_video_extension("episode", "mp4"), "episode.mp4");
/// assert_eq!(with_video_extension("episode.ts", "mp4"), "episode.ts");
/// ```
pub fn with_video_extension(name: &str, default_ext: &str) -> String {
    if is_video_file(Path::new(name)) {
        name.to_string()
    } else {
        format!("{name}.{default_ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("movie.mkv")));
        assert!(is_video_file(Path::new("movie.mp4")));
        assert!(is_video_file(Path::new("movie.ts")));
        assert!(is_video_file(Path::new("movie.webm")));

        // Case insensitive
        assert!(is_video_file(Path::new("movie.MKV")));
        assert!(is_video_file(Path::new("movie.Mp4")));

        // Not video files
        assert!(!is_video_file(Path::new("subtitle.srt")));
        assert!(!is_video_file(Path::new("document.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
        assert!(!is_video_file(Path::new("")));
    }

    #[test]
    fn test_video_extensions() {
        let exts = video_extensions();
        assert_eq!(exts.len(), 9);
        assert!(exts.contains(&"mkv"));
        assert!(exts.contains(&"flv"));
    }

    #[test]
    fn test_derived_path_chain_never_repeats() {
        let original = PathBuf::from("/tmp/clip.mkv");
        let first = derived_path(&original, "trim");
        let second = derived_path(&first, "speed");
        let third = derived_path(&second, "append");

        assert_eq!(first, PathBuf::from("/tmp/clip_trim.mkv"));
        assert_eq!(second, PathBuf::from("/tmp/clip_trim_speed.mkv"));
        assert_eq!(third, PathBuf::from("/tmp/clip_trim_speed_append.mkv"));
        assert_ne!(third, original);
    }

    #[test]
    fn test_derived_path_without_extension() {
        assert_eq!(
            derived_path(Path::new("dir/raw"), "mute"),
            PathBuf::from("dir/raw_mute")
        );
    }

    #[test]
    fn test_with_video_extension() {
        assert_eq!(with_video_extension("video.MKV", "mp4"), "video.MKV");
        assert_eq!(with_video_extension("stream.m3u8", "mp4"), "stream.m3u8.mp4");
        assert_eq!(with_video_extension("download", "mp4"), "download.mp4");
    }
}
