//! Output naming and final placement of produced artifacts.

use crate::{Error, Result};
use chorekit_common::paths::derived_path;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a command's result should go.
///
/// An explicit file name is only accepted when the command works on exactly
/// one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSpec {
    file_name: Option<String>,
    dir: Option<PathBuf>,
}

impl OutputSpec {
    /// Build a spec for a command that will produce `item_count` results.
    pub fn new(file_name: Option<String>, dir: Option<PathBuf>, item_count: usize) -> Result<Self> {
        if let Some(ref name) = file_name {
            if name.trim().is_empty() {
                return Err(Error::validation("output name cannot be empty"));
            }
            if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name.as_str()) {
                return Err(Error::validation(format!(
                    "output name '{name}' must be a plain file name; use --output-dir for directories"
                )));
            }
            if item_count != 1 {
                return Err(Error::validation(format!(
                    "an explicit output name needs exactly one input, got {item_count}"
                )));
            }
        }

        Ok(Self { file_name, dir })
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Decides final artifact locations and moves artifacts there.
#[derive(Debug, Clone, Default)]
pub struct OutputResolver {
    default_dir: Option<PathBuf>,
}

impl OutputResolver {
    /// `default_dir` is used when the spec names no directory; without one,
    /// results stay in the directory they were produced in.
    pub fn new(default_dir: Option<PathBuf>) -> Self {
        Self { default_dir }
    }

    /// Destination for `source` under `spec`.
    pub fn resolve(&self, spec: &OutputSpec, source: &Path) -> PathBuf {
        let dir = spec
            .dir()
            .or(self.default_dir.as_deref())
            .or_else(|| source.parent())
            .unwrap_or_else(|| Path::new(""));

        match (spec.file_name(), source.file_name()) {
            (Some(name), _) => dir.join(name),
            (None, Some(name)) => dir.join(name),
            (None, None) => dir.to_path_buf(),
        }
    }

    /// Move (or with `keep_source`, copy) `source` to `destination`.
    ///
    /// Missing parent directories are created. Identical paths are a no-op.
    pub fn place(&self, source: &Path, destination: &Path, keep_source: bool) -> Result<PathBuf> {
        if same_path(source, destination) {
            tracing::debug!("{} is already in place", source.display());
            return Ok(source.to_path_buf());
        }

        ensure_parent(destination)?;

        if keep_source {
            tracing::info!("copying {} to {}", source.display(), destination.display());
            fs::copy(source, destination)?;
        } else {
            tracing::info!("moving {} to {}", source.display(), destination.display());
            move_file(source, destination)?;
        }

        Ok(destination.to_path_buf())
    }
}

/// Destinations already handed out within one batch.
///
/// A repeated destination is renamed `<stem>_<n>.<ext>` with the lowest
/// free `n`, so no two items of a batch write the same file.
#[derive(Debug, Default)]
pub struct DestinationSet {
    seen: HashSet<PathBuf>,
}

impl DestinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `base`, or the first free numbered variant of it.
    pub fn claim(&mut self, base: PathBuf) -> PathBuf {
        let mut candidate = base.clone();
        let mut n = 1;
        while !self.seen.insert(absolute(&candidate)) {
            candidate = derived_path(&base, &n.to_string());
            n += 1;
        }
        if candidate != base {
            tracing::warn!(
                "{} is already taken in this batch, writing {} instead",
                base.display(),
                candidate.display()
            );
        }
        candidate
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::info!("creating output directory at {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Compare two paths after making them absolute.
pub fn same_path(a: &Path, b: &Path) -> bool {
    absolute(a) == absolute(b)
}

fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, destination) {
        // rename cannot cross filesystems
        tracing::debug!("rename failed ({}), copying instead", e);
        fs::copy(source, destination)?;
        fs::remove_file(source)?;
    }
    Ok(())
}
