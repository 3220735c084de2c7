// Data source trait for the two device series
use crate::domain::sample::{BatteryRecord, ThermalRecord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("malformed payload from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("record {index} from {url} has no timestamp")]
    MissingTimestamp { url: String, index: usize },
}

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch the battery series, ordered by timestamp
    async fn fetch_battery_series(&self) -> Result<Vec<BatteryRecord>, RetrievalError>;

    /// Fetch the thermal series, ordered by timestamp
    async fn fetch_thermal_series(&self) -> Result<Vec<ThermalRecord>, RetrievalError>;
}
