use crate::core::ledger::CreditLedger;
use crate::domain::model::{
    BatchReport, BatchRequest, EmailAddress, Layer, LayerOutcome, MissReason, ResolutionRecord,
    ResolutionState,
};
use crate::domain::ports::ResolutionLayer;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_INTER_ITEM_DELAY: Duration = Duration::from_secs(2);

/// 四個固定順序的策略
#[derive(Clone)]
pub struct LayerSet {
    pub direct_check: Arc<dyn ResolutionLayer>,
    pub search_scrape: Arc<dyn ResolutionLayer>,
    pub paid_api: Arc<dyn ResolutionLayer>,
    pub domain_heuristic: Arc<dyn ResolutionLayer>,
}

impl LayerSet {
    pub fn get(&self, layer: Layer) -> &dyn ResolutionLayer {
        match layer {
            Layer::DirectCheck => self.direct_check.as_ref(),
            Layer::SearchScrape => self.search_scrape.as_ref(),
            Layer::PaidApi => self.paid_api.as_ref(),
            Layer::DomainHeuristic => self.domain_heuristic.as_ref(),
        }
    }
}

/// 批次內相鄰兩個 email 之間的最小間隔；最後一個 email 之後不等待
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub inter_item_delay: Duration,
}

impl PacingPolicy {
    pub fn fixed(inter_item_delay: Duration) -> Self {
        Self { inter_item_delay }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_INTER_ITEM_DELAY)
    }
}

/// 對每個 email 依序跑四個 layer，組出批次報告
pub struct Resolver {
    layers: LayerSet,
    ledger: Arc<CreditLedger>,
    pacing: PacingPolicy,
}

impl Resolver {
    pub fn new(layers: LayerSet, ledger: Arc<CreditLedger>, pacing: PacingPolicy) -> Self {
        Self {
            layers,
            ledger,
            pacing,
        }
    }

    pub fn ledger(&self) -> &Arc<CreditLedger> {
        &self.ledger
    }

    pub async fn resolve_batch(&self, request: &BatchRequest) -> BatchReport {
        let total = request.emails.len();
        let api_key = request.api_key();
        let mut results = Vec::with_capacity(total);

        tracing::info!(
            "🚀 Starting batch of {} emails ({} credits remaining)",
            total,
            self.ledger.remaining()
        );

        for (index, email) in request.emails.iter().enumerate() {
            tracing::info!("🔎 Checking {}/{}: {}", index + 1, total, email);
            results.push(self.resolve_one(email, api_key).await);

            if index + 1 < total && !self.pacing.inter_item_delay.is_zero() {
                tokio::time::sleep(self.pacing.inter_item_delay).await;
            }
        }

        let report = BatchReport {
            results,
            remaining_credits: self.ledger.remaining(),
            completed_at: Some(Utc::now()),
        };

        tracing::info!(
            "✅ Batch finished: {}/{} resolved, {} credits remaining ({} spent overall)",
            report.resolved_count(),
            total,
            report.remaining_credits,
            self.ledger.consumed()
        );
        report
    }

    pub async fn resolve_one(&self, input: &str, api_key: Option<&str>) -> ResolutionRecord {
        let email = match EmailAddress::parse(input) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!("⚠️ Skipping malformed input: {}", e);
                return ResolutionRecord::invalid(input, &e);
            }
        };

        let mut state = ResolutionState::NotStarted;
        while let Some(layer) = state.next_layer() {
            let outcome = self.attempt(layer, &email, api_key).await;
            tracing::debug!("{} for {}: {:?}", layer, email, outcome);
            state = state.advance(layer, outcome);
        }

        let record = ResolutionRecord::from_state(email.as_str(), state);
        match &record.profile_url {
            Some(url) => tracing::info!(
                "✅ {} -> {} (confidence {})",
                email,
                url,
                record.confidence
            ),
            None => tracing::info!("❌ {} unresolved after all layers", email),
        }
        record
    }

    async fn attempt(&self, layer: Layer, email: &EmailAddress, api_key: Option<&str>) -> LayerOutcome {
        if layer.requires_credit() {
            if api_key.is_none() {
                tracing::debug!("{} skipped for {}: no API key", layer, email);
                return LayerOutcome::Miss(MissReason::MissingApiKey);
            }
            // 一旦扣到 credit 就視為已嘗試，不論呼叫結果
            if !self.ledger.try_consume() {
                tracing::debug!("{} skipped for {}: credits exhausted", layer, email);
                return LayerOutcome::Miss(MissReason::CreditsExhausted);
            }
        }

        self.layers.get(layer).resolve(email, api_key).await
    }
}
