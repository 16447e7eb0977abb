//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own downloads directory and
//! stub extraction binary. When dropped, the server gracefully shuts down
//! and temp resources are cleaned up.

use musicfinder_server::environment::EnvironmentProfile;
use musicfinder_server::extractor::ExtractorClient;
use musicfinder_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Downloads directory, for asserting on written artifacts
    pub downloads_dir: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port.
    pub async fn spawn() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let downloads_dir = temp_dir.path().join("downloads");
        std::fs::create_dir_all(&downloads_dir).expect("Failed to create downloads dir");

        let stub_bin = super::stub::write_stub_extractor(temp_dir.path());

        let environment = EnvironmentProfile::resolve("linux", None);
        let extractor = Arc::new(ExtractorClient::new(
            stub_bin,
            downloads_dir.clone(),
            environment.ffmpeg_location.clone(),
            30,
            3,
        ));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            downloads_dir: downloads_dir.clone(),
            frontend_dir_path: None,
        };

        let app = make_app(config, environment, extractor);

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        TestServer {
            base_url,
            port,
            downloads_dir,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}
