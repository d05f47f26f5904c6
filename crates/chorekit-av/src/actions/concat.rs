//! Concatenation of two files with the ffmpeg concat demuxer.

use super::path_arg;
use crate::{Ffmpeg, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `head` followed by `tail` into `output` without re-encoding.
pub(super) fn append(ffmpeg: &Ffmpeg, head: &Path, tail: &Path, output: &Path) -> Result<()> {
    let mut list = NamedTempFile::new()?;
    list.write_all(concat_list(&std::path::absolute(head)?, &std::path::absolute(tail)?).as_bytes())?;
    list.flush()?;

    tracing::info!("appending {} onto {}", tail.display(), head.display());

    ffmpeg.run(vec![
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        path_arg(list.path()),
        "-c".into(),
        "copy".into(),
        path_arg(output),
    ])
}

/// Concat demuxer list naming `files` in order.
fn concat_list(head: &Path, tail: &Path) -> String {
    [head, tail]
        .iter()
        .map(|p| format!("file '{}'\n", escape_quotes(&path_arg(p))))
        .collect()
}

fn escape_quotes(s: &str) -> String {
    s.replace('\'', r"'\''")
}
