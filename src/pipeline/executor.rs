use super::action::ActionKind;
use super::parser::ActionSequence;
use super::transform::Transformer;
use super::workspace::Workspace;
use crate::output::{same_path, OutputResolver, OutputSpec};
use crate::{Error, Result};
use chorekit_av::actions::Edit;
use chorekit_av::QualityPreset;
use std::path::{Path, PathBuf};

/// Applies an action sequence to a file, one edit at a time.
pub struct PipelineExecutor<T> {
    transformer: T,
    resolver: OutputResolver,
    default_preset: QualityPreset,
}

impl<T: Transformer> PipelineExecutor<T> {
    pub fn new(transformer: T, resolver: OutputResolver) -> Self {
        Self {
            transformer,
            resolver,
            default_preset: QualityPreset::default(),
        }
    }

    /// Preset for `reencode` actions that name none.
    pub fn with_default_preset(mut self, preset: QualityPreset) -> Self {
        self.default_preset = preset;
        self
    }

    /// Turn every token into its edit, failing before anything runs.
    ///
    /// A bare `append` always merges with `original`, whatever ran before it.
    pub fn plan(&self, original: &Path, actions: &ActionSequence) -> Result<Vec<Edit>> {
        actions
            .iter()
            .map(|token| match (token.kind, &token.arg) {
                (ActionKind::Append, None) => Ok(Edit::Append {
                    into: original.to_path_buf(),
                }),
                _ => token.to_edit(self.default_preset),
            })
            .collect()
    }

    /// Where the result of running `edits` on `input` is placed.
    pub fn destination(&self, input: &Path, edits: &[Edit], output: &OutputSpec) -> PathBuf {
        let produced = edits
            .iter()
            .fold(input.to_path_buf(), |current, edit| edit.output_for(&current));
        self.resolver.resolve(output, &produced)
    }

    /// Run `actions` over `input` and place the result according to `output`.
    ///
    /// Intermediates live in a [`Workspace`] that is removed before
    /// returning, on success and on failure alike. `input` itself is never
    /// modified or deleted.
    pub fn run(&self, input: &Path, actions: &ActionSequence, output: &OutputSpec) -> Result<PathBuf> {
        let edits = self.plan(input, actions)?;
        let destination = self.destination(input, &edits, output);

        if edits.is_empty() {
            // No work: the caller's file is copied, never moved
            return self.resolver.place(input, &destination, true);
        }
        if same_path(&destination, input) {
            return Err(Error::validation(format!(
                "output {} would overwrite the input",
                destination.display()
            )));
        }

        let workspace = Workspace::new(input)?;
        let total = edits.len();
        let mut current = input.to_path_buf();

        for (i, edit) in edits.iter().enumerate() {
            let next = workspace.artifact(&current, edit);
            tracing::info!(
                "[{}/{}] applying '{}' on {}",
                i + 1,
                total,
                edit.name(),
                current.display()
            );
            self.transformer.apply(&current, edit, &next)?;
            current = next;
        }

        let placed = self.resolver.place(&current, &destination, false)?;
        tracing::info!("result written to {}", placed.display());
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parse_actions;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Writes a small file per edit and records what it was asked to do.
    #[derive(Default)]
    struct RecordingTransformer {
        calls: RefCell<Vec<(PathBuf, Edit)>>,
        produced: RefCell<Vec<PathBuf>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingTransformer {
        fn failing_on(name: &'static str) -> Self {
            Self {
                fail_on: Some(name),
                ..Default::default()
            }
        }
    }

    impl Transformer for RecordingTransformer {
        fn apply(&self, input: &Path, edit: &Edit, output: &Path) -> chorekit_av::Result<()> {
            self.calls.borrow_mut().push((input.to_path_buf(), edit.clone()));
            if self.fail_on == Some(edit.name()) {
                return Err(chorekit_av::Error::tool_failed("ffmpeg", "exited with status 1"));
            }
            fs::write(output, edit.name())?;
            self.produced.borrow_mut().push(output.to_path_buf());
            Ok(())
        }
    }

    fn setup() -> (TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let input = temp.path().join("clip.mkv");
        fs::write(&input, b"original").unwrap();
        (temp, input)
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn executor(transformer: &RecordingTransformer) -> PipelineExecutor<&RecordingTransformer> {
        PipelineExecutor::new(transformer, OutputResolver::default())
    }

    #[test]
    fn test_intermediates_are_removed() {
        let (temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "speed=2", "mute"]).unwrap();

        let result = executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap();

        assert_eq!(result, temp.path().join("clip_trim_speed_mute.mkv"));
        assert_eq!(fs::read_to_string(&result).unwrap(), "mute");
        for path in transformer.produced.borrow().iter() {
            assert!(!path.exists(), "{} should have been removed", path.display());
        }
        // Only the input and the result remain, no workspace
        assert_eq!(entries(temp.path()), ["clip.mkv", "clip_trim_speed_mute.mkv"]);
        assert_eq!(fs::read(&input).unwrap(), b"original");
    }

    #[test]
    fn test_each_step_consumes_the_previous_artifact() {
        let (_temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "speed=2", "mute"]).unwrap();

        executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap();

        let calls = transformer.calls.borrow();
        let produced = transformer.produced.borrow();
        assert_eq!(calls[0].0, input);
        assert_eq!(calls[1].0, produced[0]);
        assert_eq!(calls[2].0, produced[1]);
    }

    #[test]
    fn test_bare_append_merges_with_original() {
        let (_temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "speed=2", "append"]).unwrap();

        executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap();

        let calls = transformer.calls.borrow();
        let (append_input, append_edit) = &calls[2];
        assert_eq!(append_edit, &Edit::Append { into: input.clone() });
        // The working file fed to append is the speed result, not the input
        assert_ne!(append_input, &input);
        assert!(append_input.ends_with("clip_trim_speed.mkv"));
    }

    #[test]
    fn test_explicit_append_target() {
        let (temp, input) = setup();
        let intro = temp.path().join("intro.mkv");
        fs::write(&intro, b"intro").unwrap();

        let transformer = RecordingTransformer::default();
        let token = format!("append={}", intro.display());
        let actions = parse_actions([token.as_str()]).unwrap();

        executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap();

        let calls = transformer.calls.borrow();
        assert_eq!(calls[0].1, Edit::Append { into: intro.clone() });
        assert!(intro.exists());
    }

    #[test]
    fn test_failing_step_still_cleans_up() {
        let (temp, input) = setup();
        let transformer = RecordingTransformer::failing_on("mute");
        let actions = parse_actions(["trim=10", "speed=2", "mute", "crop=10:10"]).unwrap();

        let err = executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap_err();
        assert_matches!(err, Error::ExternalTool(_));

        // crop never ran
        assert_eq!(transformer.calls.borrow().len(), 3);
        assert_eq!(entries(temp.path()), ["clip.mkv"]);
    }

    #[test]
    fn test_failing_placement_still_cleans_up() {
        let (temp, input) = setup();
        // A regular file where the output directory should be created
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let spec = OutputSpec::new(None, Some(blocker.join("out")), 1).unwrap();

        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "mute"]).unwrap();

        let err = executor(&transformer).run(&input, &actions, &spec).unwrap_err();

        assert_matches!(err, Error::Io(_));
        assert_eq!(transformer.produced.borrow().len(), 2);
        assert_eq!(entries(temp.path()), ["blocker", "clip.mkv"]);
        assert_eq!(fs::read(&input).unwrap(), b"original");
    }

    #[test]
    fn test_output_named_like_an_intermediate_survives() {
        let (temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let spec = OutputSpec::new(Some("clip_trim.mkv".into()), None, 1).unwrap();
        let actions = parse_actions(["trim=10", "mute"]).unwrap();

        let result = executor(&transformer).run(&input, &actions, &spec).unwrap();

        assert_eq!(result, temp.path().join("clip_trim.mkv"));
        assert_eq!(fs::read_to_string(&result).unwrap(), "mute");
        assert_eq!(entries(temp.path()), ["clip.mkv", "clip_trim.mkv"]);
    }

    #[test]
    fn test_output_over_the_input_is_rejected_before_any_step() {
        let (_temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let spec = OutputSpec::new(Some("clip.mkv".into()), None, 1).unwrap();
        let actions = parse_actions(["mute"]).unwrap();

        let err = executor(&transformer).run(&input, &actions, &spec).unwrap_err();

        assert_matches!(err, Error::Validation(msg) if msg.contains("overwrite the input"));
        assert!(transformer.calls.borrow().is_empty());
        assert_eq!(fs::read(&input).unwrap(), b"original");
    }

    #[test]
    fn test_unrelated_file_with_intermediate_name_is_untouched() {
        let (temp, input) = setup();
        let bystander = temp.path().join("clip_trim.mkv");
        fs::write(&bystander, b"keep me").unwrap();

        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "mute"]).unwrap();

        let result = executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap();

        assert_eq!(result, temp.path().join("clip_trim_mute.mkv"));
        assert_eq!(fs::read(&bystander).unwrap(), b"keep me");
        assert_ne!(transformer.produced.borrow()[0], bystander);
    }

    #[test]
    fn test_invalid_argument_fails_before_any_step() {
        let (temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let actions = parse_actions(["trim=10", "speed=fast"]).unwrap();

        let err = executor(&transformer)
            .run(&input, &actions, &OutputSpec::default())
            .unwrap_err();

        assert_matches!(err, Error::Validation(_));
        assert!(transformer.calls.borrow().is_empty());
        assert_eq!(entries(temp.path()), ["clip.mkv"]);
    }

    #[test]
    fn test_empty_sequence_returns_input() {
        let (temp, input) = setup();
        let transformer = RecordingTransformer::default();

        let result = executor(&transformer)
            .run(&input, &ActionSequence::new(), &OutputSpec::default())
            .unwrap();

        assert_eq!(result, input);
        assert!(transformer.calls.borrow().is_empty());
        assert_eq!(entries(temp.path()), ["clip.mkv"]);
    }

    #[test]
    fn test_empty_sequence_copies_to_other_directory() {
        let (temp, input) = setup();
        let out_dir = temp.path().join("out");
        let transformer = RecordingTransformer::default();
        let spec = OutputSpec::new(None, Some(out_dir.clone()), 1).unwrap();

        let result = executor(&transformer)
            .run(&input, &ActionSequence::new(), &spec)
            .unwrap();

        assert_eq!(result, out_dir.join("clip.mkv"));
        assert!(result.exists());
        assert!(input.exists());
    }

    #[test]
    fn test_final_artifact_moves_to_named_output() {
        let (temp, input) = setup();
        let out_dir = temp.path().join("nested/out");
        let transformer = RecordingTransformer::default();
        let spec = OutputSpec::new(Some("final.mkv".into()), Some(out_dir.clone()), 1).unwrap();
        let actions = parse_actions(["mute", "volume=2"]).unwrap();

        let result = executor(&transformer).run(&input, &actions, &spec).unwrap();

        assert_eq!(result, out_dir.join("final.mkv"));
        assert_eq!(fs::read_to_string(&result).unwrap(), "volume");
        assert_eq!(entries(temp.path()), ["clip.mkv", "nested"]);
    }

    #[test]
    fn test_destination_follows_edit_names() {
        let transformer = RecordingTransformer::default();
        let executor = PipelineExecutor::new(&transformer, OutputResolver::new(Some("/videos".into())));
        let edits = [Edit::Mute, Edit::Speed { factor: 2.0 }];

        assert_eq!(
            executor.destination(Path::new("/in/clip.mp4"), &edits, &OutputSpec::default()),
            PathBuf::from("/videos/clip_mute_speed.mp4")
        );
    }

    #[test]
    fn test_default_preset_reaches_reencode() {
        let (_temp, input) = setup();
        let transformer = RecordingTransformer::default();
        let executor = executor(&transformer).with_default_preset(QualityPreset::Sd480);
        let actions = parse_actions(["reencode"]).unwrap();

        let edits = executor.plan(&input, &actions).unwrap();
        assert_eq!(edits, [Edit::Reencode { preset: QualityPreset::Sd480 }]);
    }
}
