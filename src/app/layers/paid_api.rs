use crate::domain::model::{EmailAddress, Layer, LayerOutcome, MissReason};
use crate::domain::ports::ResolutionLayer;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct PeopleSearchRequest<'a> {
    q_emails: [&'a str; 1],
    per_page: u32,
}

#[derive(Debug, Deserialize)]
struct PeopleSearchResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    #[serde(default)]
    linkedin_url: Option<String>,
}

/// Layer 3：付費 people-search API。credit 的扣除由 resolver 在呼叫前完成
pub struct PaidApiLayer {
    client: Client,
    endpoint: String,
}

impl PaidApiLayer {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    async fn lookup(&self, email: &EmailAddress, api_key: &str) -> Result<Option<String>> {
        let body = PeopleSearchRequest {
            q_emails: [email.as_str()],
            per_page: 1,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(api_key, Some(""))
            .header(CACHE_CONTROL, "no-cache")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: PeopleSearchResponse = response.json().await?;
        Ok(payload
            .people
            .into_iter()
            .next()
            .and_then(|person| person.linkedin_url)
            .filter(|url| !url.trim().is_empty()))
    }
}

#[async_trait]
impl ResolutionLayer for PaidApiLayer {
    async fn resolve(&self, email: &EmailAddress, api_key: Option<&str>) -> LayerOutcome {
        let Some(api_key) = api_key else {
            return LayerOutcome::Miss(MissReason::MissingApiKey);
        };

        let result = self.lookup(email, api_key).await;
        LayerOutcome::from_lookup(Layer::PaidApi, email, result)
    }
}
