use crate::utils::error::{ResolverError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 已驗證的 email：恰好一個 `@`，兩側皆非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    raw: String,
    at: usize,
}

impl EmailAddress {
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        let invalid = |reason: &str| ResolverError::InvalidEmail {
            email: input.to_string(),
            reason: reason.to_string(),
        };

        let at = raw.find('@').ok_or_else(|| invalid("missing '@'"))?;
        if raw[at + 1..].contains('@') {
            return Err(invalid("more than one '@'"));
        }
        if at == 0 {
            return Err(invalid("empty local part"));
        }
        if at + 1 == raw.len() {
            return Err(invalid("empty domain part"));
        }

        Ok(Self {
            raw: raw.to_string(),
            at,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn local_part(&self) -> &str {
        &self.raw[..self.at]
    }

    pub fn domain_part(&self) -> &str {
        &self.raw[self.at + 1..]
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    #[serde(rename = "Layer 1")]
    DirectCheck,
    #[serde(rename = "Layer 2")]
    SearchScrape,
    #[serde(rename = "Layer 3")]
    PaidApi,
    #[serde(rename = "Layer 4")]
    DomainHeuristic,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::DirectCheck,
        Layer::SearchScrape,
        Layer::PaidApi,
        Layer::DomainHeuristic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Layer::DirectCheck => "Layer 1",
            Layer::SearchScrape => "Layer 2",
            Layer::PaidApi => "Layer 3",
            Layer::DomainHeuristic => "Layer 4",
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Layer::DirectCheck => 30,
            Layer::SearchScrape => 25,
            Layer::PaidApi => 40,
            Layer::DomainHeuristic => 20,
        }
    }

    pub fn next(self) -> Option<Layer> {
        match self {
            Layer::DirectCheck => Some(Layer::SearchScrape),
            Layer::SearchScrape => Some(Layer::PaidApi),
            Layer::PaidApi => Some(Layer::DomainHeuristic),
            Layer::DomainHeuristic => None,
        }
    }

    /// 只有付費 API 需要消耗 credit 與 API key
    pub fn requires_credit(self) -> bool {
        matches!(self, Layer::PaidApi)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    NotFound,
    NetworkFailure,
    ParseFailure,
    MissingApiKey,
    CreditsExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOutcome {
    Hit(String),
    Miss(MissReason),
}

impl LayerOutcome {
    /// 把 layer 內部查詢結果轉成 outcome，錯誤一律記錄後視為 miss
    pub fn from_lookup(layer: Layer, email: &EmailAddress, result: Result<Option<String>>) -> Self {
        match result {
            Ok(Some(url)) => LayerOutcome::Hit(url),
            Ok(None) => LayerOutcome::Miss(MissReason::NotFound),
            Err(e) => {
                let reason = if e.is_parse_failure() {
                    MissReason::ParseFailure
                } else {
                    MissReason::NetworkFailure
                };
                tracing::warn!("⚠️ {} failed for {}: {} ({:?})", layer, email, e, reason);
                LayerOutcome::Miss(reason)
            }
        }
    }
}

/// 單一 email 的解析狀態；`Tried(layer)` 表示該 layer 已嘗試且未命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    NotStarted,
    Tried(Layer),
    Resolved { layer: Layer, url: String },
    Exhausted,
}

impl ResolutionState {
    pub fn next_layer(&self) -> Option<Layer> {
        match self {
            ResolutionState::NotStarted => Some(Layer::DirectCheck),
            ResolutionState::Tried(layer) => layer.next(),
            ResolutionState::Resolved { .. } | ResolutionState::Exhausted => None,
        }
    }

    pub fn advance(self, layer: Layer, outcome: LayerOutcome) -> Self {
        match outcome {
            LayerOutcome::Hit(url) => ResolutionState::Resolved { layer, url },
            LayerOutcome::Miss(_) if layer.next().is_none() => ResolutionState::Exhausted,
            LayerOutcome::Miss(_) => ResolutionState::Tried(layer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub email: String,
    pub profile_url: Option<String>,
    pub succeeded_layers: Vec<Layer>,
    pub failed_layers: Vec<Layer>,
    pub confidence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionRecord {
    /// 由終止狀態建立紀錄；成功與失敗 layer 互補於四個 layer
    pub fn from_state(email: &str, state: ResolutionState) -> Self {
        let (profile_url, succeeded) = match state {
            ResolutionState::Resolved { layer, url } => (Some(url), Some(layer)),
            _ => (None, None),
        };

        Self {
            email: email.to_string(),
            profile_url,
            succeeded_layers: succeeded.into_iter().collect(),
            failed_layers: Layer::ALL
                .into_iter()
                .filter(|layer| Some(*layer) != succeeded)
                .collect(),
            confidence: succeeded.map(Layer::weight).unwrap_or(0),
            error: None,
        }
    }

    pub fn invalid(email: &str, error: &ResolverError) -> Self {
        let mut record = Self::from_state(email, ResolutionState::Exhausted);
        record.error = Some(error.to_string());
        record
    }

    pub fn is_resolved(&self) -> bool {
        self.profile_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ResolutionRecord>,
    pub remaining_credits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn empty(remaining_credits: u32) -> Self {
        Self {
            results: Vec::new(),
            remaining_credits,
            completed_at: None,
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_resolved()).count()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    pub emails: Vec<String>,
    #[serde(default, alias = "apolloKey", alias = "apiKey")]
    pub api_key: Option<String>,
}

impl BatchRequest {
    pub fn new(emails: Vec<String>, api_key: Option<String>) -> Self {
        Self { emails, api_key }
    }

    /// 空白 key 視為未提供
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_parts() {
        let email = EmailAddress::parse(" jane.doe@acme.com ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@acme.com");
        assert_eq!(email.local_part(), "jane.doe");
        assert_eq!(email.domain_part(), "acme.com");
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for input in ["nobody", "@acme.com", "jane@", "a@b@c.com", ""] {
            let err = EmailAddress::parse(input).unwrap_err();
            assert!(matches!(err, ResolverError::InvalidEmail { .. }), "{}", input);
        }
    }

    #[test]
    fn test_state_machine_stops_on_hit() {
        let state = ResolutionState::NotStarted;
        assert_eq!(state.next_layer(), Some(Layer::DirectCheck));

        let state = state.advance(Layer::DirectCheck, LayerOutcome::Miss(MissReason::NotFound));
        assert_eq!(state, ResolutionState::Tried(Layer::DirectCheck));
        assert_eq!(state.next_layer(), Some(Layer::SearchScrape));

        let state = state.advance(
            Layer::SearchScrape,
            LayerOutcome::Hit("https://www.linkedin.com/in/jane".to_string()),
        );
        assert_eq!(state.next_layer(), None);
        assert!(matches!(state, ResolutionState::Resolved { layer: Layer::SearchScrape, .. }));
    }

    #[test]
    fn test_state_machine_exhausts_after_last_layer() {
        let mut state = ResolutionState::NotStarted;
        while let Some(layer) = state.next_layer() {
            state = state.advance(layer, LayerOutcome::Miss(MissReason::NetworkFailure));
        }
        assert_eq!(state, ResolutionState::Exhausted);
    }

    #[test]
    fn test_record_partitions_layers() {
        let record = ResolutionRecord::from_state(
            "jane@acme.com",
            ResolutionState::Resolved {
                layer: Layer::PaidApi,
                url: "https://www.linkedin.com/in/jane".to_string(),
            },
        );
        assert_eq!(record.succeeded_layers, vec![Layer::PaidApi]);
        assert_eq!(
            record.failed_layers,
            vec![Layer::DirectCheck, Layer::SearchScrape, Layer::DomainHeuristic]
        );
        assert_eq!(record.confidence, 40);

        let exhausted = ResolutionRecord::from_state("jane@acme.com", ResolutionState::Exhausted);
        assert!(exhausted.succeeded_layers.is_empty());
        assert_eq!(exhausted.failed_layers, Layer::ALL.to_vec());
        assert_eq!(exhausted.confidence, 0);
        assert!(exhausted.profile_url.is_none());
    }

    #[test]
    fn test_record_serializes_layer_labels() {
        let record = ResolutionRecord::from_state("jane@acme.com", ResolutionState::Exhausted);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["failed_layers"][0], "Layer 1");
        assert_eq!(json["failed_layers"][3], "Layer 4");
        assert!(json["profile_url"].is_null());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_batch_request_accepts_original_key_name() {
        let request: BatchRequest =
            serde_json::from_str(r#"{"emails": ["a@b.com"], "apolloKey": "secret"}"#).unwrap();
        assert_eq!(request.api_key(), Some("secret"));

        let blank = BatchRequest::new(vec![], Some("  ".to_string()));
        assert_eq!(blank.api_key(), None);
    }
}
