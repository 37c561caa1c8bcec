use crate::app::layers::search::SearchClient;
use crate::domain::model::{EmailAddress, Layer, LayerOutcome};
use crate::domain::ports::ResolutionLayer;
use async_trait::async_trait;

/// Layer 4：以 email 網域推測公司名稱，搜尋 `<公司> <網路名稱>`
pub struct DomainHeuristicLayer {
    search: SearchClient,
    network_name: String,
}

impl DomainHeuristicLayer {
    pub fn new(search: SearchClient, network_name: String) -> Self {
        Self {
            search,
            network_name,
        }
    }

    /// 只去掉結尾的 `.com`，其他 TLD 保留
    pub fn organization(email: &EmailAddress) -> &str {
        let domain = email.domain_part();
        domain.strip_suffix(".com").unwrap_or(domain)
    }

    pub fn query_for(&self, email: &EmailAddress) -> String {
        format!("{} {}", Self::organization(email), self.network_name)
    }
}

#[async_trait]
impl ResolutionLayer for DomainHeuristicLayer {
    async fn resolve(&self, email: &EmailAddress, _api_key: Option<&str>) -> LayerOutcome {
        let query = self.query_for(email);
        let result = self.search.first_profile_link(&query).await;
        LayerOutcome::from_lookup(Layer::DomainHeuristic, email, result)
    }
}
