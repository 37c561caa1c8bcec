use crate::app::layers::search::SearchClient;
use crate::domain::model::{EmailAddress, Layer, LayerOutcome};
use crate::domain::ports::ResolutionLayer;
use async_trait::async_trait;

/// Layer 2：以引號精確比對 email，限定在 profile 網域
pub struct SearchScrapeLayer {
    search: SearchClient,
    site: String,
}

impl SearchScrapeLayer {
    pub fn new(search: SearchClient, site: String) -> Self {
        Self { search, site }
    }

    pub fn query_for(&self, email: &EmailAddress) -> String {
        format!("\"{}\" site:{}", email, self.site)
    }
}

#[async_trait]
impl ResolutionLayer for SearchScrapeLayer {
    async fn resolve(&self, email: &EmailAddress, _api_key: Option<&str>) -> LayerOutcome {
        let query = self.query_for(email);
        let result = self.search.first_profile_link(&query).await;
        LayerOutcome::from_lookup(Layer::SearchScrape, email, result)
    }
}
