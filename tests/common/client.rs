//! HTTP client for end-to-end tests
//!
//! When routes or request formats change, update only this file.

use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("home request failed")
    }

    pub async fn search(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/api/search", self.base_url))
            .query(&[("query", query)])
            .send()
            .await
            .expect("search request failed")
    }

    pub async fn download(&self, video_id: &str) -> Response {
        self.client
            .get(format!("{}/download/{}", self.base_url, video_id))
            .send()
            .await
            .expect("download request failed")
    }

    pub async fn download_mp3(&self, video_id: &str) -> Response {
        self.client
            .get(format!("{}/download-mp3/{}", self.base_url, video_id))
            .send()
            .await
            .expect("download-mp3 request failed")
    }

    pub async fn status(&self) -> Response {
        self.client
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .expect("status request failed")
    }
}
