// Hover state shared by every dashboard panel
use super::sample::{BatteryRecord, ThermalRecord};
use serde::Serialize;

/// The sample currently being inspected.
///
/// Idle when `active_timestamp` is `None`. When active, each matched record is
/// the nearest one in its own series, so the two may carry different
/// timestamps; a match is `None` only when that series is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverState {
    pub active_timestamp: Option<i64>,
    pub matched_battery: Option<BatteryRecord>,
    pub matched_thermal: Option<ThermalRecord>,
}

impl HoverState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.active_timestamp.is_none()
    }
}
