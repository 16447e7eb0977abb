//! Models for the extraction tool's JSON output and the API surface built on it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target codec for the transcoding step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetFormat {
    Flac,
    Mp3,
}

impl TargetFormat {
    /// File extension of the transcoded artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Flac => "flac",
            TargetFormat::Mp3 => "mp3",
        }
    }

    /// Codec name understood by the extraction tool's audio postprocessor.
    pub fn codec(&self) -> &'static str {
        self.extension()
    }

    /// Postprocessor quality: lossless for FLAC, top bitrate tier for MP3.
    pub fn quality(&self) -> &'static str {
        match self {
            TargetFormat::Flac => "0",
            TargetFormat::Mp3 => "320K",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            TargetFormat::Flac => "audio/flac",
            TargetFormat::Mp3 => "audio/mpeg",
        }
    }
}

/// One line of the extraction tool's per-entry JSON output.
///
/// Only the fields this server consumes are modeled; `duration` and
/// `thumbnail` are frequently absent for some extractors and must not
/// fail deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct ExtractedEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Direct URL of the selected audio stream.
    pub url: String,
}

/// A single search hit as served to clients.
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub duration: Option<u64>,
    pub thumbnail: Option<String>,
    pub audio_url: String,
}

impl From<ExtractedEntry> for SearchResult {
    fn from(entry: ExtractedEntry) -> Self {
        SearchResult {
            id: entry.id,
            title: entry.title,
            duration: entry.duration.map(|secs| secs.round() as u64),
            thumbnail: entry.thumbnail,
            audio_url: entry.url,
        }
    }
}

/// A transcoded file sitting in the downloads directory.
#[derive(Clone, Debug)]
pub struct DownloadedArtifact {
    pub file_path: PathBuf,
    pub format: TargetFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_entry() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Some Song",
            "duration": 212.8,
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg",
            "url": "https://media.example/stream"
        }"#;

        let entry: ExtractedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "dQw4w9WgXcQ");
        assert_eq!(entry.title, "Some Song");

        let result = SearchResult::from(entry);
        assert_eq!(result.duration, Some(213));
        assert_eq!(result.audio_url, "https://media.example/stream");
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let json = r#"{"id": "abc123", "title": "Untitled", "url": "https://media.example/x"}"#;

        let entry: ExtractedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.duration, None);
        assert_eq!(entry.thumbnail, None);

        let result = SearchResult::from(entry);
        assert_eq!(result.duration, None);
        assert_eq!(result.thumbnail, None);
    }

    #[test]
    fn rejects_entry_without_stream_url() {
        let json = r#"{"id": "abc123", "title": "Untitled"}"#;
        assert!(serde_json::from_str::<ExtractedEntry>(json).is_err());
    }

    #[test]
    fn search_result_serializes_nullable_fields() {
        let result = SearchResult {
            id: "abc".to_string(),
            title: "A Title".to_string(),
            duration: None,
            thumbnail: None,
            audio_url: "https://media.example/a".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value["duration"].is_null());
        assert!(value["thumbnail"].is_null());
    }

    #[test]
    fn target_format_properties() {
        assert_eq!(TargetFormat::Flac.extension(), "flac");
        assert_eq!(TargetFormat::Flac.quality(), "0");
        assert_eq!(TargetFormat::Flac.content_type(), "audio/flac");
        assert_eq!(TargetFormat::Mp3.extension(), "mp3");
        assert_eq!(TargetFormat::Mp3.quality(), "320K");
        assert_eq!(TargetFormat::Mp3.content_type(), "audio/mpeg");
    }
}
