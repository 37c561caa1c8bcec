use crate::config::toml_config::ResolverConfig;
use crate::utils::error::{ResolverError, Result};
use crate::utils::validation::{validate_formats, validate_output_dir, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "profile-resolver")]
#[command(about = "Resolve professional-network profile URLs from email addresses")]
pub struct CliConfig {
    #[arg(long, value_delimiter = ',', help = "Comma-separated email addresses")]
    pub emails: Vec<String>,

    #[arg(long, help = "File with one email per line ('#' starts a comment)")]
    pub input: Option<String>,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "People-search API key (overrides paid_api.api_key)")]
    pub api_key: Option<String>,

    #[arg(long = "output", value_name = "DIR", help = "Directory to write the report into")]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Override pacing.inter_item_delay_ms")]
    pub delay_ms: Option<u64>,

    #[arg(long, help = "Override paid_api.initial_credits")]
    pub credits: Option<u32>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入 TOML (若有) 並套用命令列覆蓋
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None => ResolverConfig::default(),
        };

        if let Some(delay) = self.delay_ms {
            config.pacing.inter_item_delay_ms = delay;
        }
        if let Some(credits) = self.credits {
            config.paid_api.initial_credits = credits;
        }
        if let Some(key) = &self.api_key {
            config.paid_api.api_key = Some(key.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// `--emails` 在前，`--input` 檔案內容在後
    pub fn collect_emails(&self) -> Result<Vec<String>> {
        let mut emails: Vec<String> = self
            .emails
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if let Some(path) = &self.input {
            let content = std::fs::read_to_string(path)?;
            emails.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }

        Ok(emails)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.emails.is_empty() && self.input.is_none() {
            return Err(ResolverError::MissingConfigError {
                field: "emails or input".to_string(),
            });
        }
        if let Some(output_path) = &self.output_path {
            validate_output_dir("output", output_path)?;
        }
        validate_formats("formats", &self.formats)?;
        Ok(())
    }
}
