use crate::domain::model::{BatchReport, EmailAddress, LayerOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 單一解析策略；任何錯誤都必須在內部轉成 `LayerOutcome::Miss`
#[async_trait]
pub trait ResolutionLayer: Send + Sync {
    async fn resolve(&self, email: &EmailAddress, api_key: Option<&str>) -> LayerOutcome;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, report: BatchReport);
    async fn latest(&self) -> Option<BatchReport>;
}
