// Battery and thermal telemetry dashboard
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
