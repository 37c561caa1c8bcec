use crate::utils::error::Result;
use crate::utils::html::AnchorExtractor;
use reqwest::Client;

/// 一般搜尋引擎的結果頁查詢，回傳第一個含 profile 路徑的連結
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
    marker: String,
    extractor: AnchorExtractor,
}

impl SearchClient {
    pub fn new(client: Client, endpoint: String, marker: String) -> Result<Self> {
        Ok(Self {
            client,
            endpoint,
            marker,
            extractor: AnchorExtractor::new()?,
        })
    }

    pub async fn first_profile_link(&self, query: &str) -> Result<Option<String>> {
        tracing::debug!("Searching {} for: {}", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;

        let html = response.text().await?;
        let link = self.extractor.first_matching(&html, &self.marker);
        tracing::debug!(
            "Search returned {} bytes, profile link: {:?}",
            html.len(),
            link
        );
        Ok(link)
    }
}
