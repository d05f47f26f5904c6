//! Audio-only edits; the video stream is copied untouched.

use super::path_arg;
use std::path::Path;

pub(super) fn mute_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-an".into(),
        "-c:v".into(),
        "copy".into(),
        path_arg(output),
    ]
}

pub(super) fn volume_args(input: &Path, output: &Path, level: &str) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-filter:a".into(),
        format!("volume={level}"),
        "-c:v".into(),
        "copy".into(),
        path_arg(output),
    ]
}
