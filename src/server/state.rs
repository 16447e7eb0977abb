use axum::extract::FromRef;

use crate::environment::EnvironmentProfile;
use crate::extractor::ExtractorClient;
use std::sync::Arc;
use std::time::Instant;

use super::inflight::InflightRegistry;
use super::ServerConfig;

pub type GuardedExtractor = Arc<ExtractorClient>;
pub type GuardedInflight = Arc<InflightRegistry>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub environment: EnvironmentProfile,
    pub extractor: GuardedExtractor,
    pub inflight: GuardedInflight,
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for EnvironmentProfile {
    fn from_ref(input: &ServerState) -> Self {
        input.environment.clone()
    }
}

impl FromRef<ServerState> for GuardedExtractor {
    fn from_ref(input: &ServerState) -> Self {
        input.extractor.clone()
    }
}

impl FromRef<ServerState> for GuardedInflight {
    fn from_ref(input: &ServerState) -> Self {
        input.inflight.clone()
    }
}
