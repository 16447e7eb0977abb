pub mod config;
mod download;
mod http_layers;
pub mod inflight;
pub mod metrics;
mod search;
pub mod server;
pub mod state;
mod stream_file;

pub use config::ServerConfig;
pub use http_layers::*;
pub use search::SEARCH_RESULT_LIMIT;
pub use server::{make_app, run_server};
