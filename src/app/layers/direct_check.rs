use crate::core::candidates::generate_candidates;
use crate::domain::model::{EmailAddress, LayerOutcome, MissReason};
use crate::domain::ports::ResolutionLayer;
use crate::utils::error::Result;
use crate::utils::validation::parse_endpoint;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use url::Url;

enum Probe {
    Found(Url),
    Absent,
    Failed,
}

/// Layer 1：對每個候選 username 的 profile URL 平行送出 HEAD
pub struct DirectCheckLayer {
    client: Client,
    profile_base_url: Url,
}

impl DirectCheckLayer {
    pub fn new(client: Client, profile_base_url: &str) -> Result<Self> {
        let profile_base_url = parse_endpoint("network.profile_base_url", profile_base_url)?;

        Ok(Self {
            client,
            profile_base_url,
        })
    }

    /// username 以 path segment 編碼後接在 base 之後
    pub fn profile_url(&self, username: &str) -> Url {
        let mut url = self.profile_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(username);
        }
        url
    }

    async fn probe(&self, url: Url) -> Probe {
        match self.client.head(url.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => Probe::Found(url),
            Ok(response) => {
                tracing::trace!("HEAD {} -> {}", url, response.status());
                Probe::Absent
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("HEAD {} timed out", url);
                } else {
                    tracing::debug!("HEAD {} failed: {}", url, e);
                }
                Probe::Failed
            }
        }
    }
}

#[async_trait]
impl ResolutionLayer for DirectCheckLayer {
    async fn resolve(&self, email: &EmailAddress, _api_key: Option<&str>) -> LayerOutcome {
        let candidates = generate_candidates(email);
        if candidates.is_empty() {
            return LayerOutcome::Miss(MissReason::NotFound);
        }

        let probes = candidates
            .iter()
            .map(|username| self.probe(self.profile_url(username)));
        let results = join_all(probes).await;

        // 依候選順序取第一個 200
        let mut failures = 0;
        for result in &results {
            match result {
                Probe::Found(url) => return LayerOutcome::Hit(url.to_string()),
                Probe::Failed => failures += 1,
                Probe::Absent => {}
            }
        }

        if failures == results.len() {
            tracing::warn!("⚠️ Every profile probe failed for {}", email);
            LayerOutcome::Miss(MissReason::NetworkFailure)
        } else {
            LayerOutcome::Miss(MissReason::NotFound)
        }
    }
}
