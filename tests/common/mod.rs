//! Common test infrastructure
//!
//! This module provides the infrastructure for end-to-end tests: a
//! TestServer running the real app against a stub extraction binary, and
//! a TestClient wrapping reqwest. Tests should only import from this
//! module, not from internal submodules.

mod client;
mod server;
mod stub;

// Public API - this is what tests import
pub use client::TestClient;
pub use server::TestServer;
