use crate::domain::sample::SeriesSource;
use crate::domain::telemetry::ChartKind;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub source: SourceSettings,
    #[serde(default)]
    pub sampling: SamplingSettings,
    #[serde(default)]
    pub hover: HoverSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    #[serde(default = "default_battery_path")]
    pub battery_path: String,
    #[serde(default = "default_thermal_path")]
    pub thermal_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplingSettings {
    pub ingest_cap: usize,
    pub chart_cap: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            ingest_cap: 1000,
            chart_cap: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HoverSettings {
    pub throttle_ms: u64,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self { throttle_ms: 50 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    /// Seconds between background refreshes; 0 disables them.
    pub refresh_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            refresh_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub source: SeriesSource,
    #[serde(default = "default_divisor")]
    pub value_divisor: f64,
    pub fraction_digits: Option<i32>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub field: String,
}

fn default_battery_path() -> String {
    "/api/battery".to_string()
}

fn default_thermal_path() -> String {
    "/api/temperature".to_string()
}

fn default_divisor() -> f64 {
    1.0
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_charts_config() -> anyhow::Result<ChartsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
