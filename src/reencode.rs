//! Batch re-encoding of a file or a directory of files.

use crate::output::{ensure_parent, same_path, DestinationSet, OutputSpec};
use crate::{Error, Result};
use chorekit_av::{actions, Ffmpeg, QualityPreset};
use chorekit_common::names::clean_file_name;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Re-encodes one file at a preset.
pub trait Encoder {
    fn encode(&self, input: &Path, output: &Path, preset: QualityPreset) -> chorekit_av::Result<()>;
}

impl<T: Encoder + ?Sized> Encoder for &T {
    fn encode(&self, input: &Path, output: &Path, preset: QualityPreset) -> chorekit_av::Result<()> {
        (**self).encode(input, output, preset)
    }
}

/// Encoder that shells out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    ffmpeg: Ffmpeg,
}

impl FfmpegEncoder {
    pub fn new(ffmpeg: Ffmpeg) -> Self {
        Self { ffmpeg }
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, input: &Path, output: &Path, preset: QualityPreset) -> chorekit_av::Result<()> {
        actions::encode(&self.ffmpeg, input, output, preset)
    }
}

/// A validated `reencode` request.
#[derive(Debug, Clone)]
pub struct ReencodeJob {
    pub files: Vec<PathBuf>,
    pub preset: QualityPreset,
    pub output: OutputSpec,
}

impl ReencodeJob {
    /// Collect the files under `source` and validate the request.
    ///
    /// A directory contributes its direct children, or its whole subtree when
    /// `recursive` is set. Files are sorted by path.
    pub fn from_source(
        source: &Path,
        recursive: bool,
        quality: Option<&str>,
        default_preset: QualityPreset,
        output_dir: Option<PathBuf>,
        output_name: Option<String>,
    ) -> Result<Self> {
        let files = collect_files(source, recursive)?;

        let preset = match quality {
            Some(name) => name.parse::<QualityPreset>().map_err(Error::Validation)?,
            None => default_preset,
        };

        if let Some(ref dir) = output_dir {
            if dir.is_file() {
                return Err(Error::validation(format!(
                    "output directory '{}' is a file",
                    dir.display()
                )));
            }
        }

        let output = OutputSpec::new(output_name, output_dir, files.len())?;

        Ok(Self {
            files,
            preset,
            output,
        })
    }
}

fn collect_files(source: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }
    if !source.is_dir() {
        return Err(Error::validation(format!(
            "'{}' is neither a file nor a directory",
            source.display()
        )));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| {
            Error::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("failed to walk {}", source.display()))
            }))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    Ok(files)
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReencodeSummary {
    pub encoded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Runs a [`ReencodeJob`] one file at a time.
pub struct BatchReencoder<E> {
    encoder: E,
    default_dir: Option<PathBuf>,
}

impl<E: Encoder> BatchReencoder<E> {
    /// `default_dir` is used for files when the job names no directory.
    pub fn new(encoder: E, default_dir: Option<PathBuf>) -> Self {
        Self {
            encoder,
            default_dir,
        }
    }

    /// Where `file` is written.
    pub fn destination(&self, file: &Path, output: &OutputSpec) -> PathBuf {
        let dir = output
            .dir()
            .or(self.default_dir.as_deref())
            .or_else(|| file.parent())
            .unwrap_or(Path::new("."));
        let name = match output.file_name() {
            Some(name) => name.to_string(),
            None => clean_file_name(&file.file_name().unwrap_or_default().to_string_lossy()),
        };
        dir.join(name)
    }

    /// Encode every file of `job`. The first encoder failure ends the batch.
    pub fn run(&self, job: &ReencodeJob) -> Result<ReencodeSummary> {
        let mut summary = ReencodeSummary::default();
        let total = job.files.len();
        let mut claimed = DestinationSet::new();

        for (i, file) in job.files.iter().enumerate() {
            let destination = claimed.claim(self.destination(file, &job.output));
            if same_path(file, &destination) {
                tracing::warn!(
                    "skipping {}: output would overwrite the source",
                    file.display()
                );
                summary.skipped.push(file.clone());
                continue;
            }

            tracing::info!("[{}/{}] re-encoding {}", i + 1, total, file.display());
            ensure_parent(&destination)?;
            self.encoder.encode(file, &destination, job.preset)?;
            summary.encoded.push(destination);
        }

        tracing::info!(
            "re-encoded {} file(s), skipped {}",
            summary.encoded.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct RecordingEncoder {
        calls: RefCell<Vec<(PathBuf, PathBuf, QualityPreset)>>,
        fail: bool,
    }

    impl Encoder for RecordingEncoder {
        fn encode(&self, input: &Path, output: &Path, preset: QualityPreset) -> chorekit_av::Result<()> {
            self.calls
                .borrow_mut()
                .push((input.to_path_buf(), output.to_path_buf(), preset));
            if self.fail {
                return Err(chorekit_av::Error::tool_failed("ffmpeg", "encoder crashed"));
            }
            fs::write(output, b"encoded")?;
            Ok(())
        }
    }

    fn tree() -> TempDir {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("b.mkv"), b"b").unwrap();
        fs::write(temp.path().join("a.mkv"), b"a").unwrap();
        fs::create_dir(temp.path().join("season")).unwrap();
        fs::write(temp.path().join("season/c.mkv"), b"c").unwrap();
        temp
    }

    fn job(source: &Path, recursive: bool, dir: Option<PathBuf>) -> ReencodeJob {
        ReencodeJob::from_source(source, recursive, None, QualityPreset::default(), dir, None)
            .unwrap()
    }

    #[test]
    fn test_directory_lists_direct_children_sorted() {
        let temp = tree();
        let job = job(temp.path(), false, None);
        assert_eq!(
            job.files,
            vec![temp.path().join("a.mkv"), temp.path().join("b.mkv")]
        );
    }

    #[test]
    fn test_recursive_walks_subtree() {
        let temp = tree();
        let job = job(temp.path(), true, None);
        assert_eq!(job.files.len(), 3);
        assert!(job.files.contains(&temp.path().join("season/c.mkv")));
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let temp = tempdir().unwrap();
        let err = ReencodeJob::from_source(
            &temp.path().join("gone"),
            false,
            None,
            QualityPreset::default(),
            None,
            None,
        )
        .unwrap_err();
        assert_matches!(err, Error::Validation(_));
    }

    #[test]
    fn test_unknown_quality_is_rejected() {
        let temp = tree();
        let err = ReencodeJob::from_source(
            temp.path(),
            false,
            Some("8k"),
            QualityPreset::default(),
            None,
            None,
        )
        .unwrap_err();
        assert_matches!(err, Error::Validation(_));
    }

    #[test]
    fn test_output_name_requires_single_file() {
        let temp = tree();
        let err = ReencodeJob::from_source(
            temp.path(),
            false,
            None,
            QualityPreset::default(),
            None,
            Some("out.mkv".into()),
        )
        .unwrap_err();
        assert_matches!(err, Error::Validation(msg) if msg.contains("exactly one"));
    }

    #[test]
    fn test_same_destination_is_skipped_without_encoding() {
        let temp = tree();
        let encoder = RecordingEncoder::default();
        let reencoder = BatchReencoder::new(&encoder, None);

        // Names are already clean, so each file would land on itself
        let summary = reencoder.run(&job(temp.path(), false, None)).unwrap();

        assert!(encoder.calls.borrow().is_empty());
        assert_eq!(summary.skipped.len(), 2);
        assert_eq!(fs::read(temp.path().join("a.mkv")).unwrap(), b"a");
    }

    #[test]
    fn test_cleaned_names_go_to_output_dir() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("[grp] My.Show.S01E01.MKV");
        fs::write(&source, b"x").unwrap();
        let out = temp.path().join("out");

        let encoder = RecordingEncoder::default();
        let reencoder = BatchReencoder::new(&encoder, None);
        let job = ReencodeJob::from_source(
            &source,
            false,
            Some("720p"),
            QualityPreset::default(),
            Some(out.clone()),
            None,
        )
        .unwrap();

        let summary = reencoder.run(&job).unwrap();

        let expected = out.join("My Show S01E01.mkv");
        assert_eq!(summary.encoded, vec![expected.clone()]);
        assert!(expected.exists());
        assert_eq!(encoder.calls.borrow()[0].2, QualityPreset::Hd720);
    }

    #[test]
    fn test_recursive_name_clashes_get_numbered() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("shows");
        fs::create_dir_all(source.join("a")).unwrap();
        fs::create_dir_all(source.join("b")).unwrap();
        fs::write(source.join("a/ep1.mkv"), b"first").unwrap();
        fs::write(source.join("b/ep1.mkv"), b"second").unwrap();
        let out = temp.path().join("out");

        let encoder = RecordingEncoder::default();
        let reencoder = BatchReencoder::new(&encoder, None);
        let summary = reencoder.run(&job(&source, true, Some(out.clone()))).unwrap();

        assert_eq!(summary.encoded, vec![out.join("ep1.mkv"), out.join("ep1_1.mkv")]);
        let calls = encoder.calls.borrow();
        assert_eq!(calls[0].0, source.join("a/ep1.mkv"));
        assert_eq!(calls[1].0, source.join("b/ep1.mkv"));
        assert!(out.join("ep1.mkv").exists());
        assert!(out.join("ep1_1.mkv").exists());
    }

    #[test]
    fn test_configured_dir_is_the_fallback() {
        let temp = tree();
        let configured = temp.path().join("configured");
        let encoder = RecordingEncoder::default();
        let reencoder = BatchReencoder::new(&encoder, Some(configured.clone()));

        let summary = reencoder.run(&job(temp.path(), false, None)).unwrap();

        assert_eq!(
            summary.encoded,
            vec![configured.join("a.mkv"), configured.join("b.mkv")]
        );
    }

    #[test]
    fn test_encoder_failure_aborts_batch() {
        let temp = tree();
        let encoder = RecordingEncoder {
            fail: true,
            ..Default::default()
        };
        let reencoder = BatchReencoder::new(&encoder, None);

        let err = reencoder
            .run(&job(temp.path(), false, Some(temp.path().join("out"))))
            .unwrap_err();

        assert_matches!(err, Error::ExternalTool(_));
        assert_eq!(encoder.calls.borrow().len(), 1);
    }
}
