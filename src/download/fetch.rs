//! HTTP transfers behind the [`Fetcher`] seam.

use super::CHUNK_MARKER;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Transfers remote resources into local files.
pub trait Fetcher {
    /// Download `url` into `destination`, returning the bytes written.
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64>;

    /// Download the numbered series described by `template` into
    /// `destination`, returning the number of chunks written.
    fn fetch_chunked(&self, template: &str, destination: &Path) -> Result<usize>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        (**self).fetch(url, destination)
    }

    fn fetch_chunked(&self, template: &str, destination: &Path) -> Result<usize> {
        (**self).fetch_chunked(template, destination)
    }
}

/// Chunk ceiling for a series when none is configured.
pub const DEFAULT_MAX_CHUNKS: u64 = 10_000;

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    first_chunk: u64,
    max_chunks: u64,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::fetch("<client>", e.to_string()))?;

        Ok(Self {
            client,
            first_chunk: 0,
            max_chunks: DEFAULT_MAX_CHUNKS,
        })
    }

    /// Index substituted for the first chunk of a series.
    pub fn with_first_chunk(mut self, first_chunk: u64) -> Self {
        self.first_chunk = first_chunk;
        self
    }

    /// Fail a series that is still answering after `max_chunks` chunks.
    pub fn with_max_chunks(mut self, max_chunks: u64) -> Self {
        self.max_chunks = max_chunks.max(1);
        self
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        self.client
            .get(url)
            .send()
            .map_err(|e| Error::fetch(url, e.to_string()))
    }

    fn fetch_into(&self, url: &str, file: &mut File) -> Result<u64> {
        let mut response = self
            .get(url)?
            .error_for_status()
            .map_err(|e| Error::fetch(url, e.to_string()))?;
        response
            .copy_to(file)
            .map_err(|e| Error::fetch(url, e.to_string()))
    }

    fn fetch_series(&self, template: &str, file: &mut File) -> Result<usize> {
        let mut chunks = 0usize;
        let mut index = self.first_chunk;

        loop {
            let url = template.replace(CHUNK_MARKER, &index.to_string());
            if chunks as u64 >= self.max_chunks {
                return Err(Error::fetch(
                    url,
                    format!("series exceeded max_chunks ({})", self.max_chunks),
                ));
            }

            let mut response = self.get(&url)?;
            let status = response.status();

            if !status.is_success() {
                if chunks == 0 {
                    return Err(Error::fetch(
                        url,
                        format!("first chunk returned {status}"),
                    ));
                }
                tracing::debug!("chunk {} returned {}, series complete", index, status);
                break;
            }

            let written = response
                .copy_to(file)
                .map_err(|e| Error::fetch(url.as_str(), e.to_string()))?;
            tracing::debug!("chunk {}: {} bytes", index, written);

            chunks += 1;
            index += 1;
        }

        Ok(chunks)
    }
}

/// Run `write` against a fresh `destination`, removing it if `write` fails.
fn with_fresh_file<T>(destination: &Path, write: impl FnOnce(&mut File) -> Result<T>) -> Result<T> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(destination)?;

    let result = write(&mut file);
    if result.is_err() {
        drop(file);
        if let Err(e) = std::fs::remove_file(destination) {
            tracing::warn!(
                "failed to remove partial download {}: {}",
                destination.display(),
                e
            );
        }
    }
    result
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        with_fresh_file(destination, |file| self.fetch_into(url, file))
    }

    fn fetch_chunked(&self, template: &str, destination: &Path) -> Result<usize> {
        with_fresh_file(destination, |file| self.fetch_series(template, file))
    }
}
