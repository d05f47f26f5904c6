//! # chorekit-av
//!
//! ffmpeg-backed video processing for chorekit.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`check_tools`], [`Ffmpeg::discover`]) -- find the
//!   ffmpeg binary on `PATH` or at a configured location.
//! - **Command execution** ([`ToolCommand`]) -- blocking builder for running
//!   external processes; a non-zero exit becomes [`Error::ToolFailed`].
//! - **Edits** ([`actions::Edit`], [`actions::apply_edit`]) -- single-step
//!   transforms that each write a new artifact.
//! - **Encoding** ([`QualityPreset`], [`actions::encode`]) -- re-encode at a
//!   fixed quality preset.
//!
//! ## Example
//!
//! ```no_run
//! use chorekit_av::actions::{apply_edit, Edit};
//! use chorekit_av::Ffmpeg;
//! use std::path::Path;
//!
//! let ffmpeg = Ffmpeg::discover(None)?;
//! let input = Path::new("clip.mkv");
//! let output = Edit::Mute.output_for(input);
//! apply_edit(&ffmpeg, input, &Edit::Mute, &output)?;
//! assert!(output.ends_with("clip_mute.mkv"));
//! # Ok::<(), chorekit_av::Error>(())
//! ```

pub mod actions;
pub mod command;
mod error;
pub mod ffmpeg;
pub mod preset;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use ffmpeg::Ffmpeg;
pub use preset::QualityPreset;
pub use tools::{check_tools, get_tool_path, require_tool, ToolInfo};
