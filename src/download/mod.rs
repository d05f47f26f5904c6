//! URL downloads, including numbered chunk series.
//!
//! A URL containing the [`CHUNK_MARKER`] describes a series of chunks
//! (`https://cdn.example/seg_{}.ts`); chunks are fetched in order and
//! concatenated into a single file.

mod fetch;

pub use fetch::{Fetcher, HttpFetcher};

use crate::output::{DestinationSet, OutputSpec};
use crate::{Error, Result};
use chorekit_common::paths::with_video_extension;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the chunk index in chunked URLs.
pub const CHUNK_MARKER: &str = "{}";

/// Whether `candidate` is an absolute `http`/`https` URL with a host.
pub fn is_valid_url(candidate: &str) -> bool {
    reqwest::Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

/// Interpret `source` as a URL, or as a file listing one URL per line.
///
/// Lines that are not valid URLs are dropped.
pub fn resolve_urls(source: &str) -> Result<Vec<String>> {
    let source = source.trim();
    if is_valid_url(source) {
        return Ok(vec![source.to_string()]);
    }

    let path = Path::new(source);
    if !path.is_file() {
        return Err(Error::validation(format!(
            "'{source}' is neither a valid URL nor a readable file"
        )));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::validation(format!("failed to read '{source}': {e}")))?;
    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| is_valid_url(line))
        .map(String::from)
        .collect();

    if urls.is_empty() {
        return Err(Error::validation(format!("no valid URLs found in '{source}'")));
    }
    Ok(urls)
}

/// Local file name for the resource at `url`.
///
/// Uses the last path segment with the chunk marker removed, adding `.mp4`
/// when it carries no video extension.
pub fn file_name_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    // The first segment is the host
    let segment = path
        .split('/')
        .skip(1)
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or_default()
        .replace(CHUNK_MARKER, "");

    let name = match segment.rsplit_once('.') {
        Some((stem, ext)) => {
            let stem = stem.trim_matches(|c: char| matches!(c, '_' | '-' | '.' | ' '));
            if stem.is_empty() {
                String::new()
            } else {
                format!("{stem}.{ext}")
            }
        }
        None => segment
            .trim_matches(|c: char| matches!(c, '_' | '-' | ' '))
            .to_string(),
    };

    let name = if name.is_empty() { "download".to_string() } else { name };
    with_video_extension(&name, "mp4")
}

/// A validated `download` request.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub urls: Vec<String>,
    pub output_dir: PathBuf,
    pub output: OutputSpec,
}

impl DownloadJob {
    /// Resolve and validate a download request without touching the network.
    pub fn from_source(source: &str, output_dir: PathBuf, output_name: Option<String>) -> Result<Self> {
        let urls = resolve_urls(source)?;
        if output_dir.is_file() {
            return Err(Error::validation(format!(
                "output directory '{}' is a file",
                output_dir.display()
            )));
        }
        let output = OutputSpec::new(output_name, Some(output_dir.clone()), urls.len())?;

        Ok(Self {
            urls,
            output_dir,
            output,
        })
    }

    /// Destination for every URL, in order.
    ///
    /// Names derived from different URLs that collide get a numeric suffix.
    pub fn destinations(&self) -> Vec<PathBuf> {
        let mut claimed = DestinationSet::new();
        self.urls
            .iter()
            .map(|url| {
                let name = match self.output.file_name() {
                    Some(name) => name.to_string(),
                    None => file_name_from_url(url),
                };
                claimed.claim(self.output_dir.join(name))
            })
            .collect()
    }
}

/// Runs a [`DownloadJob`] one URL at a time.
pub struct DownloadOrchestrator<F> {
    fetcher: F,
}

impl<F: Fetcher> DownloadOrchestrator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Download every URL of `job`, returning the files written.
    pub fn run(&self, job: &DownloadJob) -> Result<Vec<PathBuf>> {
        if !job.output_dir.exists() {
            tracing::info!("creating output directory {}", job.output_dir.display());
            std::fs::create_dir_all(&job.output_dir)?;
        }

        let total = job.urls.len();
        let mut written = Vec::with_capacity(total);
        for (i, (url, destination)) in job.urls.iter().zip(job.destinations()).enumerate() {
            tracing::info!(
                "[{}/{}] downloading {} -> {}",
                i + 1,
                total,
                url,
                destination.display()
            );

            if url.contains(CHUNK_MARKER) {
                let chunks = self.fetcher.fetch_chunked(url, &destination)?;
                tracing::info!("merged {} chunk(s) into {}", chunks, destination.display());
            } else {
                let bytes = self.fetcher.fetch(url, &destination)?;
                tracing::debug!("wrote {} bytes", bytes);
            }
            written.push(destination);
        }

        Ok(written)
    }
}
