//! Orchestration layer for the public-opinion monitor
//!
//! Owns the in-memory session state (feed registry, article list, trend
//! report) and the services that mutate it: the fan-out feed aggregator
//! and the AI analysis dispatcher. Background tasks never write the
//! shared lists directly; they post updates to a single queue consumed
//! by the controller task.

pub mod aggregator;
pub mod analysis_service;
pub mod registry;
pub mod state;

pub use aggregator::FeedAggregator;
pub use analysis_service::AnalysisService;
pub use registry::seed_feeds;
pub use state::{AnalysisSlot, MonitorController, MonitorState, StateUpdate};
