// Battery and thermal sample records
use serde::{Deserialize, Serialize};

/// A timestamped record belonging to one sensor series.
pub trait Sample: Clone + Send + Sync + 'static {
    /// Milliseconds since the Unix epoch.
    fn timestamp(&self) -> i64;

    /// Numeric value of a named field, used by chart definitions.
    /// Returns `None` for names the record does not carry and for values the
    /// device did not report.
    fn field(&self, name: &str) -> Option<f64>;
}

/// Which of the two device series a record or chart belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSource {
    Battery,
    Thermal,
}

/// Every field except `timestamp` may be missing from the wire; a missing
/// value stays `None` rather than reading as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct BatteryRecord {
    pub timestamp: i64,
    pub rem_cap: Option<f64>,
    pub inst_curr: Option<f64>,
    pub voltage: Option<f64>,
    pub battery_level: Option<f64>,
    pub battery_status: Option<i64>,
    pub plug_type: Option<i64>,
}

impl Sample for BatteryRecord {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "timestamp" => Some(self.timestamp as f64),
            "rem_cap" => self.rem_cap,
            "inst_curr" => self.inst_curr,
            "voltage" => self.voltage,
            "battery_level" => self.battery_level,
            "battery_status" => self.battery_status.map(|code| code as f64),
            "plug_type" => self.plug_type.map(|code| code as f64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ThermalRecord {
    pub timestamp: i64,
    pub temp_bat: Option<f64>,
    pub temp_front: Option<f64>,
    pub temp_back: Option<f64>,
    pub temp_cpu: Option<f64>,
}

impl Sample for ThermalRecord {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn field(&self, name: &str) -> Option<f64> {
        match name {
            "timestamp" => Some(self.timestamp as f64),
            "temp_bat" => self.temp_bat,
            "temp_front" => self.temp_front,
            "temp_back" => self.temp_back,
            "temp_cpu" => self.temp_cpu,
            _ => None,
        }
    }
}

/// Checks a field name against a source without needing a record at hand.
pub fn has_field(source: SeriesSource, name: &str) -> bool {
    match source {
        SeriesSource::Battery => BATTERY_FIELDS.contains(&name),
        SeriesSource::Thermal => THERMAL_FIELDS.contains(&name),
    }
}

const BATTERY_FIELDS: &[&str] = &[
    "timestamp",
    "rem_cap",
    "inst_curr",
    "voltage",
    "battery_level",
    "battery_status",
    "plug_type",
];

const THERMAL_FIELDS: &[&str] = &["timestamp", "temp_bat", "temp_front", "temp_back", "temp_cpu"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let record = ThermalRecord {
            timestamp: 10,
            temp_bat: Some(31_500.0),
            temp_front: None,
            temp_back: Some(0.0),
            temp_cpu: Some(45_000.0),
        };
        assert_eq!(record.field("temp_cpu"), Some(45_000.0));
        assert_eq!(record.field("temp_back"), Some(0.0));
        assert_eq!(record.field("temp_front"), None);
        assert_eq!(record.field("voltage"), None);
        assert!(has_field(SeriesSource::Battery, "voltage"));
        assert!(!has_field(SeriesSource::Thermal, "voltage"));
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let err = serde_json::from_str::<BatteryRecord>(r#"{"voltage": 400}"#);
        assert!(err.is_err());

        let ok: BatteryRecord = serde_json::from_str(r#"{"timestamp": 5, "voltage": 400}"#).unwrap();
        assert_eq!(ok.timestamp, 5);
        assert_eq!(ok.voltage, Some(400.0));
    }

    #[test]
    fn test_absent_values_are_not_zero() {
        let record: BatteryRecord =
            serde_json::from_str(r#"{"timestamp": 5, "rem_cap": null, "battery_status": 2}"#).unwrap();
        assert_eq!(record.rem_cap, None);
        assert_eq!(record.inst_curr, None);
        assert_eq!(record.plug_type, None);
        assert_eq!(record.battery_status, Some(2));
        assert_eq!(record.field("voltage"), None);
        assert_eq!(record.field("plug_type"), None);
        assert_eq!(record.field("battery_status"), Some(2.0));
        assert_eq!(record.field("timestamp"), Some(5.0));
    }
}
