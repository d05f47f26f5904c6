//! Full re-encode at a quality preset.

use super::path_arg;
use crate::{Ffmpeg, QualityPreset, Result};
use std::path::Path;

/// ffmpeg arguments re-encoding `input` into `output` at `preset`.
///
/// The picture is scaled to the preset height keeping the aspect ratio; audio
/// becomes AAC.
pub fn encode_args(input: &Path, output: &Path, preset: QualityPreset) -> Vec<String> {
    vec![
        "-i".into(),
        path_arg(input),
        "-c:v".into(),
        preset.codec().into(),
        "-preset".into(),
        "medium".into(),
        "-crf".into(),
        preset.crf().to_string(),
        "-vf".into(),
        format!("scale=-2:{}", preset.height()),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "192k".into(),
        path_arg(output),
    ]
}

/// Re-encode `input` into `output`.
pub fn encode(ffmpeg: &Ffmpeg, input: &Path, output: &Path, preset: QualityPreset) -> Result<()> {
    tracing::info!(
        "encoding {} -> {} ({})",
        input.display(),
        output.display(),
        preset
    );
    ffmpeg.run(encode_args(input, output, preset))
}
