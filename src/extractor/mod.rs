mod client;
mod models;

pub use client::{DownloadError, DownloadOptions, ExtractorClient, SearchError};
pub use models::{DownloadedArtifact, ExtractedEntry, SearchResult, TargetFormat};
