//! Attachment delivery of transcoded files.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::{fs::File, io::BufReader};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::extractor::DownloadedArtifact;

const STREAM_BUFFER_SIZE: usize = 4096 * 16;

/// Stream an artifact back to the client with a save-to-disk disposition.
pub async fn stream_artifact(artifact: &DownloadedArtifact) -> Response {
    let file = match File::open(&artifact.file_path).await {
        Ok(file) => file,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let file_length = match file.metadata().await {
        Ok(metadata) => metadata.len(),
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };
    debug!(
        "Streaming {} ({} bytes)",
        artifact.file_path.display(),
        file_length
    );

    let filename = artifact
        .file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("audio.{}", artifact.format.extension()));

    let file_reader = BufReader::with_capacity(STREAM_BUFFER_SIZE, file);
    let stream = ReaderStream::with_capacity(file_reader, STREAM_BUFFER_SIZE);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.format.content_type())
        .header(header::CONTENT_LENGTH, file_length)
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&filename),
        )
        .body(body)
        .unwrap()
}

/// Content-Disposition value that forces a browser save action. The
/// filename is reduced to header-safe ASCII with quotes escaped.
fn attachment_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let escaped = ascii.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}
