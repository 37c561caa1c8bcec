pub mod adapters;
#[cfg(feature = "server")]
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemoryReportStore, LocalStorage};
pub use app::build_resolver;
pub use config::ResolverConfig;
pub use crate::core::{
    engine::ResolutionEngine,
    ledger::CreditLedger,
    resolver::{LayerSet, PacingPolicy, Resolver},
};
pub use domain::model::{BatchReport, BatchRequest, EmailAddress, Layer, LayerOutcome, MissReason, ResolutionRecord};
pub use utils::error::{ResolverError, Result};
