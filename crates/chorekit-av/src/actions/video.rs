//! Picture edits; audio is copied untouched.

use super::path_arg;
use std::path::Path;

pub(super) fn crop_args(input: &Path, output: &Path, area: &str) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-filter:v".into(),
        format!("crop={area}"),
        "-c:a".into(),
        "copy".into(),
        path_arg(output),
    ]
}
