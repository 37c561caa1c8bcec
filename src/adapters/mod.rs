// Adapters layer: concrete implementations for external systems (http, storage, report store).

pub mod http;
pub mod report_store;
pub mod storage;

pub use report_store::InMemoryReportStore;
pub use storage::LocalStorage;
