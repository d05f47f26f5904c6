//! Video edit actions.
//!
//! Each [`Edit`] reads one input file and writes a brand-new artifact to the
//! output path it is given; inputs are never modified in place.
//! [`Edit::output_for`] gives the conventional artifact name
//! (see [`chorekit_common::paths::derived_path`]).

mod audio;
mod concat;
mod encode;
mod timing;
mod video;

pub use encode::{encode, encode_args};

use crate::{Error, Ffmpeg, QualityPreset, Result};
use chorekit_common::paths::derived_path;
use std::path::{Path, PathBuf};

/// A single video transformation with its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Splice the input onto the end of `into`.
    Append { into: PathBuf },
    /// Resample-based tempo change; pitch follows the tempo.
    Tempo { factor: f64, reference: f64 },
    /// Pitch-preserving speed change.
    Speed { factor: f64 },
    /// Keep the range `start..end` (to the end when `end` is absent).
    Trim { start: String, end: Option<String> },
    /// Shift the audio track by `seconds` (negative pulls it earlier).
    Delay { seconds: f64 },
    /// Drop every audio stream.
    Mute,
    /// Apply an ffmpeg volume expression (`0.5`, `6dB`, ...).
    Volume { level: String },
    /// Crop the picture to an ffmpeg `w:h[:x:y]` area.
    Crop { area: String },
    /// Re-encode at a quality preset.
    Reencode { preset: QualityPreset },
}

impl Edit {
    /// Short name, also used as the artifact suffix.
    pub fn name(&self) -> &'static str {
        match self {
            Edit::Append { .. } => "append",
            Edit::Tempo { .. } => "tempo",
            Edit::Speed { .. } => "speed",
            Edit::Trim { .. } => "trim",
            Edit::Delay { .. } => "delay",
            Edit::Mute => "mute",
            Edit::Volume { .. } => "volume",
            Edit::Crop { .. } => "crop",
            Edit::Reencode { .. } => "reencode",
        }
    }

    /// Where this edit writes its result for `input`.
    pub fn output_for(&self, input: &Path) -> PathBuf {
        derived_path(input, self.name())
    }

    /// Reject arguments ffmpeg would choke on.
    pub fn validate(&self) -> Result<()> {
        let positive = |what: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidInput(format!(
                    "{} {what} must be a positive number, got {value}",
                    self.name()
                )))
            }
        };

        match self {
            Edit::Tempo { factor, reference } => {
                positive("factor", *factor)?;
                positive("reference rate", *reference)
            }
            Edit::Speed { factor } => positive("factor", *factor),
            Edit::Delay { seconds } if !seconds.is_finite() => Err(Error::InvalidInput(format!(
                "delay must be finite, got {seconds}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Apply `edit` to `input`, writing the result to `output`.
///
/// An existing file at `output` is overwritten.
pub fn apply_edit(ffmpeg: &Ffmpeg, input: &Path, edit: &Edit, output: &Path) -> Result<()> {
    edit.validate()?;
    if input == output {
        return Err(Error::InvalidInput(format!(
            "{} would overwrite its own input {}",
            edit.name(),
            input.display()
        )));
    }

    match edit {
        Edit::Append { into } => concat::append(ffmpeg, into, input, output)?,
        Edit::Tempo { factor, reference } => {
            ffmpeg.run(timing::tempo_args(input, output, *factor, *reference))?
        }
        Edit::Speed { factor } => ffmpeg.run(timing::speed_args(input, output, *factor))?,
        Edit::Trim { start, end } => {
            ffmpeg.run(timing::trim_args(input, output, start, end.as_deref()))?
        }
        Edit::Delay { seconds } => ffmpeg.run(timing::delay_args(input, output, *seconds))?,
        Edit::Mute => ffmpeg.run(audio::mute_args(input, output))?,
        Edit::Volume { level } => ffmpeg.run(audio::volume_args(input, output, level))?,
        Edit::Crop { area } => ffmpeg.run(video::crop_args(input, output, area))?,
        Edit::Reencode { preset } => ffmpeg.run(encode_args(input, output, *preset))?,
    }

    Ok(())
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
