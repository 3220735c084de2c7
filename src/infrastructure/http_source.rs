// HTTP data source for the device's battery and temperature endpoints
use crate::application::sample_source::{RetrievalError, SampleSource};
use crate::domain::sample::{BatteryRecord, ThermalRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpSampleSource {
    client: reqwest::Client,
    battery_url: String,
    thermal_url: String,
}

impl HttpSampleSource {
    pub fn new(base_url: &str, battery_path: &str, thermal_path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            battery_url: format!("{}{}", base, battery_path),
            thermal_url: format!("{}{}", base, thermal_path),
        }
    }

    async fn fetch_series<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, RetrievalError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RetrievalError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let body = response.text().await.map_err(|e| RetrievalError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        decode_series(url, &body)
    }
}

/// Decodes a JSON array of records, rejecting any record without a
/// `timestamp` before decoding the rest of its fields.
pub fn decode_series<T: DeserializeOwned>(url: &str, body: &str) -> Result<Vec<T>, RetrievalError> {
    let decode_error = |message: String| RetrievalError::Decode {
        url: url.to_string(),
        message,
    };

    let rows: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| decode_error(e.to_string()))?;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let has_timestamp = row.get("timestamp").is_some_and(|ts| !ts.is_null());
            if !has_timestamp {
                return Err(RetrievalError::MissingTimestamp {
                    url: url.to_string(),
                    index,
                });
            }
            serde_json::from_value(row).map_err(|e| decode_error(format!("record {}: {}", index, e)))
        })
        .collect()
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch_battery_series(&self) -> Result<Vec<BatteryRecord>, RetrievalError> {
        self.fetch_series(&self.battery_url).await
    }

    async fn fetch_thermal_series(&self) -> Result<Vec<ThermalRecord>, RetrievalError> {
        self.fetch_series(&self.thermal_url).await
    }
}
