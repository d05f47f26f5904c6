//! Dispatch of a single edit to the component that performs it.

use chorekit_av::actions::{apply_edit, Edit};
use chorekit_av::Ffmpeg;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Performs one edit step.
///
/// Implementations read `input` and write a new artifact at `output`; the
/// input is never modified.
pub trait Transformer {
    fn apply(&self, input: &Path, edit: &Edit, output: &Path) -> chorekit_av::Result<()>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn apply(&self, input: &Path, edit: &Edit, output: &Path) -> chorekit_av::Result<()> {
        (**self).apply(input, edit, output)
    }
}

/// Transformer that runs every edit through ffmpeg.
///
/// ffmpeg is located on the first edit, so a run without edits works on
/// machines that lack it.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTransformer {
    configured: Option<PathBuf>,
    ffmpeg: OnceCell<Ffmpeg>,
}

impl FfmpegTransformer {
    /// `configured` is an explicit ffmpeg path; `PATH` is searched otherwise.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self {
            configured,
            ffmpeg: OnceCell::new(),
        }
    }

    fn ffmpeg(&self) -> chorekit_av::Result<&Ffmpeg> {
        if let Some(ffmpeg) = self.ffmpeg.get() {
            return Ok(ffmpeg);
        }
        let ffmpeg = Ffmpeg::discover(self.configured.as_deref())?;
        tracing::debug!("using ffmpeg at {}", ffmpeg.path().display());
        Ok(self.ffmpeg.get_or_init(|| ffmpeg))
    }
}

impl Transformer for FfmpegTransformer {
    fn apply(&self, input: &Path, edit: &Edit, output: &Path) -> chorekit_av::Result<()> {
        apply_edit(self.ffmpeg()?, input, edit, output)
    }
}
