use crate::domain::model::BatchReport;
use crate::domain::ports::ReportStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 只保留最近一次批次結果
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportStore {
    latest: Arc<RwLock<Option<BatchReport>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: BatchReport) {
        let mut latest = self.latest.write().await;
        *latest = Some(report);
    }

    async fn latest(&self) -> Option<BatchReport> {
        self.latest.read().await.clone()
    }
}
