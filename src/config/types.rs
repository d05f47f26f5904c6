use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub reencode: ReencodeConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output directory. When unset, results land next to their input
    /// (or in the working directory for downloads).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReencodeConfig {
    /// Preset used by `reencode` and the `reencode` action when none is given
    #[serde(default = "default_quality")]
    pub quality: String,
}

fn default_quality() -> String {
    "1080p".to_string()
}

impl Default for ReencodeConfig {
    fn default() -> Self {
        Self {
            quality: default_quality(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadConfig {
    /// Index substituted for the first chunk of a chunked download
    #[serde(default)]
    pub first_chunk: u32,

    /// Upper bound on the chunks of one chunked download
    #[serde(default = "default_max_chunks")]
    pub max_chunks: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_max_chunks() -> u32 {
    10_000
}

fn default_user_agent() -> String {
    format!("chorekit/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            first_chunk: 0,
            max_chunks: default_max_chunks(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}
