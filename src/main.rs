use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use musicfinder_server::environment::EnvironmentProfile;
use musicfinder_server::extractor::ExtractorClient;
use musicfinder_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory where transcoded files are written.
    #[clap(long, default_value = "downloads")]
    pub downloads_dir: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Host address to bind; defaults per the detected runtime.
    #[clap(long)]
    pub host: Option<String>,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Name or path of the extraction tool binary.
    #[clap(long, default_value = "yt-dlp")]
    pub extractor_bin: PathBuf,

    /// Socket timeout passed to the extraction tool, in seconds.
    #[clap(long, default_value_t = 30)]
    pub socket_timeout_sec: u64,

    /// Retry count passed to the extraction tool.
    #[clap(long, default_value_t = 3)]
    pub retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let environment = EnvironmentProfile::detect();
    info!(
        "Starting MusicFinder on {}{}",
        environment.platform,
        if environment.termux { " (Termux)" } else { "" }
    );

    // Idempotent; downloaded files accumulate here across runs.
    std::fs::create_dir_all(&cli_args.downloads_dir)?;

    let extractor = Arc::new(ExtractorClient::new(
        cli_args.extractor_bin,
        cli_args.downloads_dir.clone(),
        environment.ffmpeg_location.clone(),
        cli_args.socket_timeout_sec,
        cli_args.retries,
    ));

    let host = cli_args
        .host
        .unwrap_or_else(|| environment.default_bind_host().to_string());

    let config = ServerConfig {
        requests_logging_level: cli_args.logging_level,
        port: cli_args.port,
        downloads_dir: cli_args.downloads_dir,
        frontend_dir_path: cli_args.frontend_dir_path,
    };

    info!("Ready to serve at http://{}:{}", host, config.port);
    info!("Metrics available at port {}!", cli_args.metrics_port);
    run_server(config, environment, extractor, host, cli_args.metrics_port).await
}
