pub mod candidates;
pub mod engine;
pub mod export;
pub mod ledger;
pub mod resolver;

pub use crate::domain::model::{BatchReport, BatchRequest, EmailAddress, Layer, LayerOutcome};
pub use crate::domain::ports::{ReportStore, ResolutionLayer, Storage};
pub use crate::utils::error::Result;
