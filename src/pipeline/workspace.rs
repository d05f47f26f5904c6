//! Scratch directory holding the intermediates of one pipeline run.

use chorekit_av::actions::Edit;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Hidden directory beside the input that receives every intermediate.
///
/// Removed on drop, together with whatever is still in it.
pub struct Workspace {
    dir: Option<TempDir>,
}

impl Workspace {
    /// Create a workspace beside `input`.
    pub fn new(input: &Path) -> io::Result<Self> {
        let parent = match input.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let dir = tempfile::Builder::new()
            .prefix(".chorekit-")
            .tempdir_in(parent)?;
        tracing::debug!("workspace at {}", dir.path().display());

        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    /// Path inside the workspace for the artifact `edit` derives from
    /// `current`.
    pub fn artifact(&self, current: &Path, edit: &Edit) -> PathBuf {
        let derived = edit.output_for(current);
        match derived.file_name() {
            Some(name) => self.path().join(name),
            None => self.path().join(edit.name()),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => tracing::debug!("removed workspace {}", path.display()),
            Err(e) => tracing::warn!("failed to remove workspace {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_sits_beside_input() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("clip.mkv");
        let workspace = Workspace::new(&input).unwrap();

        assert_eq!(workspace.path().parent(), Some(temp.path()));
        assert!(workspace
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(".chorekit-"));
    }

    #[test]
    fn test_artifact_names_grow_inside_workspace() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("clip.mkv");
        let workspace = Workspace::new(&input).unwrap();

        let first = workspace.artifact(&input, &Edit::Mute);
        let second = workspace.artifact(&first, &Edit::Speed { factor: 2.0 });

        assert_eq!(first, workspace.path().join("clip_mute.mkv"));
        assert_eq!(second, workspace.path().join("clip_mute_speed.mkv"));
    }

    #[test]
    fn test_drop_removes_contents() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("clip.mkv");
        let workspace = Workspace::new(&input).unwrap();
        let dir = workspace.path().to_path_buf();
        fs::write(dir.join("clip_mute.mkv"), b"x").unwrap();

        drop(workspace);

        assert!(!dir.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
