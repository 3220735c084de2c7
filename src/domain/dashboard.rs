// Detail table shown next to the charts
use super::codes::{battery_status_label, plug_type_label};
use super::hover::HoverState;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

const PLACEHOLDER: &str = "-";
const IDLE_HINT: &str = "Hover over a chart to see detailed information";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl DetailRow {
    fn new(label: &str, value: String, unit: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailTable {
    pub title: String,
    pub rows: Vec<DetailRow>,
    pub hint: Option<String>,
}

impl DetailTable {
    pub fn from_hover(state: &HoverState) -> Self {
        Self::from_hover_in(state, &Local)
    }

    pub fn from_hover_in<Tz: TimeZone>(state: &HoverState, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let battery = state.matched_battery.as_ref();
        let thermal = state.matched_thermal.as_ref();

        let rows = vec![
            DetailRow::new(
                "Timestamp",
                battery
                    .and_then(|b| format_timestamp(b.timestamp, tz))
                    .unwrap_or_else(placeholder),
                None,
            ),
            DetailRow::new(
                "Battery status",
                battery
                    .and_then(|b| b.battery_status)
                    .map(battery_status_label)
                    .unwrap_or_else(placeholder),
                None,
            ),
            DetailRow::new(
                "Plug type",
                battery
                    .and_then(|b| b.plug_type)
                    .map(plug_type_label)
                    .unwrap_or_else(placeholder),
                None,
            ),
            DetailRow::new(
                "Voltage",
                battery
                    .and_then(|b| b.voltage)
                    .map(|v| format_scaled(v, 100.0, 2))
                    .unwrap_or_else(placeholder),
                Some("mV"),
            ),
            DetailRow::new(
                "Instantaneous current",
                battery
                    .and_then(|b| b.inst_curr)
                    .map(|v| format_scaled(v, 100.0, 1))
                    .unwrap_or_else(placeholder),
                Some("mAh"),
            ),
            DetailRow::new(
                "Battery temperature",
                thermal
                    .and_then(|t| t.temp_bat)
                    .map(|v| format_scaled(v, 1000.0, 1))
                    .unwrap_or_else(placeholder),
                Some("°C"),
            ),
        ];

        let hint = (battery.is_none() && thermal.is_none()).then(|| IDLE_HINT.to_string());

        Self {
            title: "Battery information".to_string(),
            rows,
            hint,
        }
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// `dd/mm/yy - HH:MM:SS`
pub fn format_timestamp<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp_millis(timestamp_ms)?;
    Some(utc.with_timezone(tz).format("%d/%m/%y - %H:%M:%S").to_string())
}

pub fn format_scaled(value: f64, divisor: f64, fraction_digits: usize) -> String {
    format!("{:.*}", fraction_digits, value / divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{BatteryRecord, Sample, ThermalRecord};
    use crate::infrastructure::http_source::decode_series;
    use chrono::Utc;

    #[test]
    fn test_idle_table_uses_placeholders() {
        let table = DetailTable::from_hover_in(&HoverState::idle(), &Utc);
        assert!(table.rows.iter().all(|r| r.value == "-"));
        assert_eq!(table.hint.as_deref(), Some(IDLE_HINT));
    }

    #[test]
    fn test_active_table_formats_values() {
        let state = HoverState {
            active_timestamp: Some(1_700_000_000_000),
            matched_battery: Some(BatteryRecord {
                timestamp: 1_700_000_000_000,
                voltage: Some(401.0),
                inst_curr: Some(-1234.0),
                battery_status: Some(3),
                plug_type: Some(9),
                ..Default::default()
            }),
            matched_thermal: Some(ThermalRecord {
                timestamp: 1_700_000_000_500,
                temp_bat: Some(31_460.0),
                ..Default::default()
            }),
        };

        let table = DetailTable::from_hover_in(&state, &Utc);
        let values: Vec<&str> = table.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            vec![
                "14/11/23 - 22:13:20",
                "Discharging",
                "Unknown (9)",
                "4.01",
                "-12.3",
                "31.5",
            ]
        );
        assert!(table.hint.is_none());
    }

    #[test]
    fn test_thermal_only_match_still_shows_temperature() {
        let state = HoverState {
            active_timestamp: Some(10),
            matched_battery: None,
            matched_thermal: Some(ThermalRecord {
                timestamp: 10,
                temp_bat: Some(25_000.0),
                ..Default::default()
            }),
        };
        let table = DetailTable::from_hover_in(&state, &Utc);
        assert_eq!(table.rows[0].value, "-");
        assert_eq!(table.rows[5].value, "25.0");
        assert!(table.hint.is_none());
    }

    #[test]
    fn test_unreported_values_render_as_placeholders() {
        let records: Vec<BatteryRecord> =
            decode_series("/api/battery", r#"[{"timestamp": 1700000000000}]"#).unwrap();
        let record = records[0];
        assert_eq!(record.field("voltage"), None);

        let state = HoverState {
            active_timestamp: Some(record.timestamp),
            matched_battery: Some(record),
            matched_thermal: None,
        };
        let table = DetailTable::from_hover_in(&state, &Utc);
        let values: Vec<&str> = table.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["14/11/23 - 22:13:20", "-", "-", "-", "-", "-"]);
        assert!(table.hint.is_none());
    }
}
