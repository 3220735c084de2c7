// Application layer - Sampling, matching and hover coordination
pub mod dashboard_session;
pub mod downsampler;
pub mod hover_coordinator;
pub mod matcher;
pub mod sample_source;
pub mod sample_store;
pub mod throttle;
