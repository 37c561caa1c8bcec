use crate::core::resolver::Resolver;
use crate::domain::model::{BatchReport, BatchRequest};
use crate::domain::ports::ReportStore;

pub struct ResolutionEngine<S: ReportStore> {
    resolver: Resolver,
    store: S,
}

impl<S: ReportStore> ResolutionEngine<S> {
    pub fn new(resolver: Resolver, store: S) -> Self {
        Self { resolver, store }
    }

    /// 執行批次並保存為最新報告
    pub async fn check_emails(&self, request: &BatchRequest) -> BatchReport {
        let report = self.resolver.resolve_batch(request).await;
        self.store.save(report.clone()).await;
        report
    }

    /// 尚未執行過批次時回傳空報告，附上目前剩餘 credit
    pub async fn last_report(&self) -> BatchReport {
        match self.store.latest().await {
            Some(report) => report,
            None => BatchReport::empty(self.remaining_credits()),
        }
    }

    pub fn remaining_credits(&self) -> u32 {
        self.resolver.ledger().remaining()
    }
}
