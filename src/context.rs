//! Per-invocation application context.
//!
//! [`AppContext`] is built once from the loaded [`Config`] and handed to each
//! command. It owns the settings components need and builds the components
//! themselves, so nothing reads configuration from a global.

use crate::config::Config;
use crate::download::{DownloadOrchestrator, HttpFetcher};
use crate::output::OutputResolver;
use crate::pipeline::{FfmpegTransformer, PipelineExecutor};
use crate::reencode::{BatchReencoder, FfmpegEncoder};
use crate::{Error, Result};
use chorekit_av::{Ffmpeg, QualityPreset};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppContext {
    config: Config,
    default_quality: QualityPreset,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let default_quality = config
            .reencode
            .quality
            .parse::<QualityPreset>()
            .map_err(Error::Validation)?;

        Ok(Self {
            config,
            default_quality,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Configured default output directory, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        self.config.output.dir.as_deref()
    }

    /// Preset used when a command or action names none.
    pub fn default_quality(&self) -> QualityPreset {
        self.default_quality
    }

    /// Locate ffmpeg. Only commands that encode need it.
    pub fn ffmpeg(&self) -> Result<Ffmpeg> {
        let ffmpeg = Ffmpeg::discover(self.config.tools.ffmpeg_path.as_deref())?;
        tracing::debug!("using ffmpeg at {}", ffmpeg.path().display());
        Ok(ffmpeg)
    }

    /// ffmpeg is only looked up once an edit actually runs.
    pub fn executor(&self) -> PipelineExecutor<FfmpegTransformer> {
        let transformer = FfmpegTransformer::new(self.config.tools.ffmpeg_path.clone());
        let resolver = OutputResolver::new(self.output_dir().map(Path::to_path_buf));
        PipelineExecutor::new(transformer, resolver).with_default_preset(self.default_quality)
    }

    pub fn reencoder(&self) -> Result<BatchReencoder<FfmpegEncoder>> {
        let encoder = FfmpegEncoder::new(self.ffmpeg()?);
        Ok(BatchReencoder::new(
            encoder,
            self.output_dir().map(Path::to_path_buf),
        ))
    }

    pub fn downloader(&self) -> Result<DownloadOrchestrator<HttpFetcher>> {
        let download = &self.config.download;
        let fetcher = HttpFetcher::new(&download.user_agent)?
            .with_first_chunk(u64::from(download.first_chunk))
            .with_max_chunks(u64::from(download.max_chunks));
        Ok(DownloadOrchestrator::new(fetcher))
    }

    /// Directory downloads land in when none is given on the command line.
    pub fn download_dir(&self) -> PathBuf {
        self.output_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
