pub mod dashboard_service;
pub mod enrichment;
pub mod filter_service;
pub mod metrics_service;
pub mod ranking;
