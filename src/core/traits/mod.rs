//! Core traits module
//!
//! Interfaces the router consumes from its external collaborators.

pub mod connectivity;
pub mod decision_sink;
pub mod provider;

pub use connectivity::{AlwaysReachable, ConnectivityProbe, StaticConnectivity};
pub use decision_sink::{
    AttemptRecord, AttemptStatus, DecisionEvent, DecisionSink, MemoryDecisionSink,
    NoopDecisionSink, OutcomeRecord, RunStarted, SinkError, TracingDecisionSink,
};
pub use provider::{DEFAULT_MODEL, ProviderAdapter, ProviderError};
