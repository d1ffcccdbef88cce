//! Download utilities
//!
//! Async file downloading with SHA256 verification and throttled progress.

use crate::config::NetworkConfig;
use crate::util::hash;
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("checksum mismatch for {path:?}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

/// Bytes received so far for a running download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received: u64,
    /// Content length, if the server sent one
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Completion in percent, when the total size is known
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some((self.received as f64 / total as f64 * 100.0).min(100.0)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Destination already held a file with the expected checksum
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// HTTP downloader shared by all callers
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    throttle: Duration,
}

impl Downloader {
    pub fn new(config: &NetworkConfig) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(
            client,
            Duration::from_millis(config.progress_throttle_ms),
        ))
    }

    pub fn with_client(client: reqwest::Client, throttle: Duration) -> Self {
        Self { client, throttle }
    }

    /// Download `url` to `dest`.
    ///
    /// When `checksum` is given and `dest` already matches it, nothing is
    /// fetched. Any other existing file is replaced. The body is written to
    /// `<dest>.part` and only renamed into place once the checksum matches.
    pub async fn download_file<F>(
        &self,
        url: &str,
        dest: &Path,
        checksum: Option<&str>,
        mut progress: F,
    ) -> Result<DownloadOutcome, DownloadError>
    where
        F: FnMut(DownloadProgress),
    {
        if dest.exists() {
            if let Some(expected) = checksum {
                tracing::debug!("Checking existing {:?} against {}", dest, expected);
                if hash::verify_sha256(dest, expected)? {
                    tracing::info!("{:?} is up to date, skipping download", dest);
                    return Ok(DownloadOutcome::AlreadyPresent);
                }
            }
            std::fs::remove_file(dest)?;
        }

        tracing::info!("Downloading {} -> {:?}", url, dest);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let part = part_path(dest);
        let (bytes, actual) = match self.write_body(response, &part, &mut progress).await {
            Ok(result) => result,
            Err(e) => {
                let _ = std::fs::remove_file(&part);
                return Err(e);
            }
        };

        if let Some(expected) = checksum {
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                std::fs::remove_file(&part)?;
                return Err(DownloadError::ChecksumMismatch {
                    path: dest.to_path_buf(),
                    expected: expected.trim().to_lowercase(),
                    actual,
                });
            }
        }

        tokio::fs::rename(&part, dest).await?;
        tracing::info!("Downloaded {} bytes to {:?}", bytes, dest);

        Ok(DownloadOutcome::Downloaded { bytes })
    }

    /// Stream the response body to `path`, returning its size and SHA256
    async fn write_body<F>(
        &self,
        response: reqwest::Response,
        path: &Path,
        progress: &mut F,
    ) -> Result<(u64, String), DownloadError>
    where
        F: FnMut(DownloadProgress),
    {
        let total = response.content_length();
        let mut file = tokio::fs::File::create(path).await?;
        let mut hasher = Sha256::new();
        let mut received = 0u64;
        let mut last_report: Option<Instant> = None;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            hasher.update(&chunk);
            received += chunk.len() as u64;

            if last_report.is_none_or(|at| at.elapsed() >= self.throttle) {
                progress(DownloadProgress { received, total });
                last_report = Some(Instant::now());
            }
        }

        file.flush().await?;
        file.sync_all().await?;

        progress(DownloadProgress {
            received,
            total: Some(total.unwrap_or(received)),
        });

        Ok((received, format!("{:x}", hasher.finalize())))
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
