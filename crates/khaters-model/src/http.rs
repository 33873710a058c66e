//! HTTP artifact source for models served from a static directory.

use tracing::debug;

use crate::artifacts::ArtifactSource;

/// Artifact source backed by an HTTP(S) base URL.
///
/// `base_url` should point at the exported model directory, like
/// `https://example.org/model` (no trailing slash).
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ArtifactSource for HttpSource {
    async fn fetch(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let url = format!("{}/{name}", self.base_url);
        debug!(url = %url, "fetching artifact");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned {status}");
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
