// In-memory store for the battery and thermal series
use crate::application::downsampler::downsample;
use crate::application::sample_source::{RetrievalError, SampleSource};
use crate::domain::sample::{BatteryRecord, Sample, ThermalRecord};
use crate::domain::series::Series;
use serde::Serialize;

/// Result of fetching both series. Each side fails independently.
#[derive(Debug)]
pub struct LoadOutcome {
    pub battery: Result<Vec<BatteryRecord>, RetrievalError>,
    pub thermal: Result<Vec<ThermalRecord>, RetrievalError>,
}

/// Which series a load actually replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppliedLoad {
    pub battery: bool,
    pub thermal: bool,
}

impl AppliedLoad {
    pub fn any(&self) -> bool {
        self.battery || self.thermal
    }
}

/// Fetches both series concurrently.
pub async fn load_samples(source: &dyn SampleSource) -> LoadOutcome {
    let (battery, thermal) = tokio::join!(source.fetch_battery_series(), source.fetch_thermal_series());
    LoadOutcome { battery, thermal }
}

#[derive(Debug, Clone)]
pub struct SampleStore {
    battery: Series<BatteryRecord>,
    thermal: Series<ThermalRecord>,
    ingest_cap: usize,
}

impl SampleStore {
    /// Incoming series longer than `ingest_cap` are downsampled once on
    /// arrival; charts downsample again at render time.
    pub fn new(ingest_cap: usize) -> Self {
        Self {
            battery: Series::empty(),
            thermal: Series::empty(),
            ingest_cap,
        }
    }

    pub fn battery(&self) -> &Series<BatteryRecord> {
        &self.battery
    }

    pub fn thermal(&self) -> &Series<ThermalRecord> {
        &self.thermal
    }

    /// Replaces every series that loaded successfully. A failed side keeps
    /// whatever was loaded before.
    pub fn apply(&mut self, outcome: LoadOutcome) -> AppliedLoad {
        let mut applied = AppliedLoad::default();

        match outcome.battery {
            Ok(records) => {
                self.battery = ingest(records, self.ingest_cap);
                applied.battery = true;
                tracing::info!("Loaded {} battery records", self.battery.len());
            }
            Err(e) => {
                tracing::warn!("Keeping previous battery series: {}", e);
            }
        }

        match outcome.thermal {
            Ok(records) => {
                self.thermal = ingest(records, self.ingest_cap);
                applied.thermal = true;
                tracing::info!("Loaded {} thermal records", self.thermal.len());
            }
            Err(e) => {
                tracing::warn!("Keeping previous thermal series: {}", e);
            }
        }

        applied
    }
}

fn ingest<T: Sample>(records: Vec<T>, cap: usize) -> Series<T> {
    let received = records.len();
    // Order first so the stride runs over time, not arrival order.
    let ordered = Series::new(records);
    if received <= cap {
        return ordered;
    }
    let reduced = Series::new(downsample(ordered.as_slice(), cap));
    tracing::debug!("Reduced {} records to {} on ingest", received, reduced.len());
    reduced
}
