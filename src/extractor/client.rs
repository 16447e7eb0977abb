//! Subprocess invocation of the external extraction tool.
//!
//! Two operations are wrapped: metadata-only search and full
//! download+transcode. Both shell out to the tool (yt-dlp by default)
//! and never let a failure escape untyped.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::models::{DownloadedArtifact, ExtractedEntry, SearchResult, TargetFormat};

/// Stream selector handed to the extraction tool: prefer an m4a audio-only
/// stream, fall back to webm, fall back to whatever best audio is left.
const AUDIO_FORMAT_SELECTOR: &str = "bestaudio[ext=m4a]/bestaudio[ext=webm]/bestaudio";

/// Errors that can occur while searching.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search process failed: {0}")]
    ProcessFailed(String),

    #[error("unparseable search output: {0}")]
    InvalidOutput(String),

    #[error("no results")]
    NoResults,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while downloading and transcoding.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{0}")]
    ExtractionFailed(String),

    #[error("extraction tool reported no output filename")]
    MissingFilename,

    #[error("transcoded file missing at {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request download configuration, materialized for each call and
/// passed by value into the process invocation.
#[derive(Clone, Debug)]
pub struct DownloadOptions {
    pub target: TargetFormat,
    pub output_template: PathBuf,
    pub ffmpeg_location: PathBuf,
    pub socket_timeout_secs: u64,
    pub retries: u32,
}

/// Client for the external extraction tool.
pub struct ExtractorClient {
    bin: PathBuf,
    downloads_dir: PathBuf,
    ffmpeg_location: PathBuf,
    socket_timeout_secs: u64,
    retries: u32,
}

impl ExtractorClient {
    pub fn new(
        bin: PathBuf,
        downloads_dir: PathBuf,
        ffmpeg_location: PathBuf,
        socket_timeout_secs: u64,
        retries: u32,
    ) -> Self {
        Self {
            bin,
            downloads_dir,
            ffmpeg_location,
            socket_timeout_secs,
            retries,
        }
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Metadata-only search. Returns at most `max_results` results.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let args = search_args(query, max_results, self.socket_timeout_secs, self.retries);
        debug!("Running search: {:?} {:?}", self.bin, args);

        let output = Command::new(&self.bin)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Search process exited with {}: {}", output.status, stderr);
            return Err(SearchError::ProcessFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut results = Vec::new();
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            let entry: ExtractedEntry = serde_json::from_str(line)
                .map_err(|err| SearchError::InvalidOutput(err.to_string()))?;
            results.push(SearchResult::from(entry));
        }

        if results.is_empty() {
            return Err(SearchError::NoResults);
        }
        results.truncate(max_results);
        Ok(results)
    }

    /// Download the best audio stream of a video and transcode it.
    ///
    /// The final artifact path is the tool's reported output filename with
    /// its container extension swapped for the target format's extension.
    pub async fn download_and_transcode(
        &self,
        video_id: &str,
        target: TargetFormat,
    ) -> Result<DownloadedArtifact, DownloadError> {
        let options = DownloadOptions {
            target,
            output_template: self.downloads_dir.join("%(title)s.%(ext)s"),
            ffmpeg_location: self.ffmpeg_location.clone(),
            socket_timeout_secs: self.socket_timeout_secs,
            retries: self.retries,
        };

        let url = watch_url(video_id);
        info!("Downloading {} as {}", url, target.extension());

        let args = download_args(&url, options);
        let output = Command::new(&self.bin)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Download process exited with {}: {}", output.status, stderr);
            return Err(DownloadError::ExtractionFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reported = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(DownloadError::MissingFilename)?;

        let file_path = transcoded_path(Path::new(reported), target);
        if !file_path.exists() {
            return Err(DownloadError::ArtifactMissing(file_path));
        }

        Ok(DownloadedArtifact {
            file_path,
            format: target,
        })
    }
}

/// Canonical watch URL for a video id.
fn watch_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/watch?v={}",
        urlencoding::encode(video_id)
    )
}

fn search_args(
    query: &str,
    max_results: usize,
    socket_timeout_secs: u64,
    retries: u32,
) -> Vec<OsString> {
    vec![
        "--dump-json".into(),
        "--skip-download".into(),
        "--no-warnings".into(),
        "--format".into(),
        "bestaudio".into(),
        "--socket-timeout".into(),
        socket_timeout_secs.to_string().into(),
        "--retries".into(),
        retries.to_string().into(),
        format!("ytsearch{}:{}", max_results, query).into(),
    ]
}

fn download_args(url: &str, options: DownloadOptions) -> Vec<OsString> {
    vec![
        "--format".into(),
        AUDIO_FORMAT_SELECTOR.into(),
        "--output".into(),
        options.output_template.into_os_string(),
        "--ffmpeg-location".into(),
        options.ffmpeg_location.into_os_string(),
        "--extract-audio".into(),
        "--audio-format".into(),
        options.target.codec().into(),
        "--audio-quality".into(),
        options.target.quality().into(),
        "--no-playlist".into(),
        "--no-warnings".into(),
        "--socket-timeout".into(),
        options.socket_timeout_secs.to_string().into(),
        "--retries".into(),
        options.retries.to_string().into(),
        "--print".into(),
        "filename".into(),
        "--no-simulate".into(),
        url.into(),
    ]
}

/// Final artifact path: the reported filename with its container extension
/// swapped for the target codec's.
fn transcoded_path(reported: &Path, target: TargetFormat) -> PathBuf {
    reported.with_extension(target.extension())
}
