use crate::core::ledger::DEFAULT_INITIAL_CREDITS;
use crate::utils::error::{ResolverError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub network: NetworkConfig,
    pub search: SearchConfig,
    pub paid_api: PaidApiConfig,
    pub pacing: PacingConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// 搜尋關鍵字使用的名稱
    pub name: String,
    /// 用來組 `site:` 與 `<domain>/in/` 比對字串
    pub domain: String,
    pub profile_base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "linkedin".to_string(),
            domain: "linkedin.com".to_string(),
            profile_base_url: "https://www.linkedin.com/in".to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn profile_marker(&self) -> String {
        format!("{}/in/", self.domain)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google.com/search".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidApiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub initial_credits: u32,
}

impl Default for PaidApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.apollo.io/v1/mixed_people/search".to_string(),
            api_key: None,
            initial_credits: DEFAULT_INITIAL_CREDITS,
        }
    }
}

impl PaidApiConfig {
    /// 未替換的 `${VAR}` 或空字串都視為沒有 key
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !(key.starts_with("${") && key.ends_with('}')))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub inter_item_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_item_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (compatible; profile-resolver/0.1)".to_string(),
        }
    }
}

impl HttpConfig {
    /// 每個 HTTP 呼叫（含連線）的上限
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ResolverConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ResolverError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ResolverError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${APOLLO_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ResolverError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn inter_item_delay(&self) -> Duration {
        Duration::from_millis(self.pacing.inter_item_delay_ms)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("network.name", &self.network.name)?;
        validate_non_empty_string("network.domain", &self.network.domain)?;
        validate_url("network.profile_base_url", &self.network.profile_base_url)?;
        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_url("paid_api.endpoint", &self.paid_api.endpoint)?;
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1..=300)?;
        validate_range("pacing.inter_item_delay_ms", self.pacing.inter_item_delay_ms, 0..=60_000)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        Ok(())
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
