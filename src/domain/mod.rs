// Domain layer - Records, series and the views derived from them
pub mod codes;
pub mod dashboard;
pub mod hover;
pub mod sample;
pub mod series;
pub mod telemetry;
