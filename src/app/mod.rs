pub mod layers;

use crate::config::toml_config::ResolverConfig;
use crate::core::ledger::CreditLedger;
use crate::core::resolver::{PacingPolicy, Resolver};
use crate::utils::error::Result;
use std::sync::Arc;

/// 以配置組出正式的 resolver；ledger 由呼叫端持有以便跨批次共用
pub fn build_resolver(config: &ResolverConfig, ledger: Arc<CreditLedger>) -> Result<Resolver> {
    let layers = layers::build_layer_set(config)?;
    let pacing = PacingPolicy::fixed(config.inter_item_delay());
    tracing::debug!(
        "Resolver built: search={}, paid_api={}, delay={:?}",
        config.search.endpoint,
        config.paid_api.endpoint,
        pacing.inter_item_delay
    );
    Ok(Resolver::new(layers, ledger, pacing))
}
