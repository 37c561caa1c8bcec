pub mod direct_check;
pub mod domain_heuristic;
pub mod paid_api;
pub mod search;
pub mod search_scrape;

pub use direct_check::DirectCheckLayer;
pub use domain_heuristic::DomainHeuristicLayer;
pub use paid_api::PaidApiLayer;
pub use search::SearchClient;
pub use search_scrape::SearchScrapeLayer;

use crate::adapters::http::build_client;
use crate::config::toml_config::ResolverConfig;
use crate::core::resolver::LayerSet;
use crate::utils::error::Result;
use std::sync::Arc;

/// 依配置建立四個正式 layer，共用同一個 HTTP client
pub fn build_layer_set(config: &ResolverConfig) -> Result<LayerSet> {
    let client = build_client(&config.http)?;
    let search = SearchClient::new(
        client.clone(),
        config.search.endpoint.clone(),
        config.network.profile_marker(),
    )?;

    Ok(LayerSet {
        direct_check: Arc::new(DirectCheckLayer::new(
            client.clone(),
            &config.network.profile_base_url,
        )?),
        search_scrape: Arc::new(SearchScrapeLayer::new(
            search.clone(),
            config.network.domain.clone(),
        )),
        paid_api: Arc::new(PaidApiLayer::new(client, config.paid_api.endpoint.clone())),
        domain_heuristic: Arc::new(DomainHeuristicLayer::new(
            search,
            config.network.name.clone(),
        )),
    })
}
