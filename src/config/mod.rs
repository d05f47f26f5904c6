mod types;

pub use types::*;

use anyhow::{Context, Result};
use chorekit_av::QualityPreset;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    expand_paths(&mut config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./chorekit.toml",
        "$XDG_CONFIG_HOME/chorekit/config.toml",
        "~/.config/chorekit/config.toml",
    ];

    for path_str in default_paths {
        // Unset variables just rule the candidate out
        let Ok(path) = shellexpand::full(path_str) else {
            continue;
        };
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    fn expand(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
    }

    if let Some(dir) = config.output.dir.as_mut() {
        *dir = expand(dir);
    }
    if let Some(ffmpeg) = config.tools.ffmpeg_path.as_mut() {
        *ffmpeg = expand(ffmpeg);
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    config
        .reencode
        .quality
        .parse::<QualityPreset>()
        .map_err(|e| anyhow::anyhow!("Invalid [reencode] quality: {}", e))?;

    if config.download.max_chunks == 0 {
        anyhow::bail!("[download] max_chunks must be at least 1");
    }

    if config.download.user_agent.trim().is_empty() {
        anyhow::bail!("[download] user_agent cannot be empty");
    }

    if let Some(ref dir) = config.output.dir {
        if dir.is_file() {
            anyhow::bail!("[output] dir {:?} is a file, not a directory", dir);
        }
    }

    Ok(())
}
