//! The `vedit` pipeline: parse action tokens, run them in order, place the
//! result.

pub mod action;
pub mod executor;
pub mod parser;
pub mod transform;
pub mod workspace;

pub use action::{ActionArg, ActionKind, ActionToken, DEFAULT_REFERENCE_RATE};
pub use executor::PipelineExecutor;
pub use parser::{parse_actions, parse_token, ActionSequence};
pub use transform::{FfmpegTransformer, Transformer};
pub use workspace::Workspace;

use crate::output::OutputSpec;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A fully validated `vedit` request.
#[derive(Debug, Clone)]
pub struct VideoJob {
    pub input: PathBuf,
    pub actions: ActionSequence,
    pub output: OutputSpec,
}

impl VideoJob {
    /// Validate the input file, the action tokens and the output request.
    pub fn new<S: AsRef<str>>(
        input: &Path,
        raw_actions: &[S],
        output_dir: Option<PathBuf>,
        output_name: Option<String>,
    ) -> Result<Self> {
        if !input.is_file() {
            return Err(Error::validation(format!(
                "input file not found: {}",
                input.display()
            )));
        }

        let actions = parse_actions(raw_actions)?;
        let output = OutputSpec::new(output_name, output_dir, 1)?;

        Ok(Self {
            input: input.to_path_buf(),
            actions,
            output,
        })
    }

    /// Run the job on `executor`, returning where the result landed.
    pub fn run<T: Transformer>(&self, executor: &PipelineExecutor<T>) -> Result<PathBuf> {
        executor.run(&self.input, &self.actions, &self.output)
    }
}
