//! Handle to the ffmpeg executable.

use crate::command::ToolCommand;
use crate::tools::get_tool_path;
use crate::Result;
use std::path::{Path, PathBuf};

/// Located ffmpeg binary.
///
/// Every command built from it is non-interactive (`-y`) and quiet
/// (`-loglevel error`), so stderr carries only real failures.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    path: PathBuf,
}

impl Ffmpeg {
    /// Use the ffmpeg binary at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate ffmpeg, preferring a configured path over `PATH` lookup.
    pub fn discover(configured: Option<&Path>) -> Result<Self> {
        get_tool_path("ffmpeg", configured).map(Self::new)
    }

    /// Path of the ffmpeg binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh command with the common leading flags applied.
    pub fn command(&self) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.path.clone());
        cmd.args(["-hide_banner", "-loglevel", "error", "-y"]);
        cmd
    }

    /// Run ffmpeg with `args` after the common leading flags.
    pub fn run(&self, args: Vec<String>) -> Result<()> {
        self.command().args(args).execute()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_non_interactive() {
        let cmd = Ffmpeg::new("/usr/bin/ffmpeg").command();
        assert!(cmd.get_args().contains(&"-y".to_string()));
        assert!(cmd.get_args().contains(&"error".to_string()));
    }
}
