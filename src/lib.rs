//! MusicFinder Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod environment;
pub mod extractor;
pub mod server;

// Re-export commonly used types for convenience
pub use environment::EnvironmentProfile;
pub use extractor::{ExtractorClient, TargetFormat};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
