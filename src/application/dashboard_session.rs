// Dashboard session - the store, the hover coordinator and the chart panels of one viewer
use crate::application::downsampler::ViewCache;
use crate::application::hover_coordinator::{HoverCoordinator, HoverObserver};
use crate::application::matcher::find_nearest;
use crate::application::sample_store::{AppliedLoad, LoadOutcome, SampleStore};
use crate::application::throttle::{throttle, Throttled};
use crate::domain::dashboard::DetailTable;
use crate::domain::hover::HoverState;
use crate::domain::sample::{has_field, BatteryRecord, Sample, SeriesSource, ThermalRecord};
use crate::domain::series::DownsampledView;
use crate::domain::telemetry::{ChartData, SeriesData, TimeSeriesPoint};
use crate::infrastructure::config::{ChartConfig, ChartsConfig, HoverSettings, SamplingSettings};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What happened to a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum PointerOutcome {
    /// Reached the coordinator; `changed` is false when it was already
    /// showing that point.
    Forwarded { changed: bool },
    /// Dropped by the chart's throttle.
    Throttled,
    /// The chart has nothing rendered to hover over.
    NoData,
}

/// The record a pointer move resolved to.
#[derive(Debug, Clone, Copy)]
enum PointerTarget {
    Battery(BatteryRecord),
    Thermal(ThermalRecord),
}

type PointerForward = for<'a> fn((&'a mut HoverCoordinator, PointerTarget)) -> bool;

fn forward_pointer((coordinator, target): (&mut HoverCoordinator, PointerTarget)) -> bool {
    match target {
        PointerTarget::Battery(record) => coordinator.set_from_battery(Some(&record)),
        PointerTarget::Thermal(record) => coordinator.set_from_thermal(Some(&record)),
    }
}

pub struct DashboardSession {
    store: SampleStore,
    coordinator: HoverCoordinator,
    charts: Vec<ChartConfig>,
    chart_cap: usize,
    throttle_interval: Duration,
    pointer_handlers: HashMap<String, Throttled<PointerForward>>,
    battery_views: ViewCache<BatteryRecord>,
    thermal_views: ViewCache<ThermalRecord>,
}

impl DashboardSession {
    pub fn new(sampling: &SamplingSettings, hover: &HoverSettings, charts_config: ChartsConfig) -> Self {
        let store = SampleStore::new(sampling.ingest_cap);
        let coordinator = HoverCoordinator::new(store.battery().clone(), store.thermal().clone());

        Self {
            store,
            coordinator,
            charts: validate_charts(charts_config.charts),
            chart_cap: sampling.chart_cap,
            throttle_interval: Duration::from_millis(hover.throttle_ms),
            pointer_handlers: HashMap::new(),
            battery_views: ViewCache::new(),
            thermal_views: ViewCache::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl HoverObserver + 'static) {
        self.coordinator.subscribe(observer);
    }

    pub fn hover_state(&self) -> &HoverState {
        self.coordinator.state()
    }

    pub fn hover_revision(&self) -> u64 {
        self.coordinator.revision()
    }

    pub fn detail_table(&self) -> DetailTable {
        DetailTable::from_hover(self.coordinator.state())
    }

    /// Applies a finished load and points the coordinator at the new series.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> AppliedLoad {
        let applied = self.store.apply(outcome);
        if applied.any() {
            self.coordinator
                .rebind(self.store.battery().clone(), self.store.thermal().clone());
        }
        applied
    }

    pub fn charts(&mut self) -> Vec<ChartData> {
        (0..self.charts.len()).map(|i| self.build_chart(i)).collect()
    }

    pub fn chart(&mut self, chart_id: &str) -> Option<ChartData> {
        let index = self.chart_index(chart_id)?;
        Some(self.build_chart(index))
    }

    /// Pointer moved over a chart. The event is resolved to the nearest
    /// rendered point of that chart, then rate limited per chart.
    ///
    /// Returns `None` for an unknown chart.
    pub fn pointer_move(&mut self, chart_id: &str, timestamp: i64) -> Option<PointerOutcome> {
        self.pointer_move_at(chart_id, timestamp, Instant::now())
    }

    pub fn pointer_move_at(&mut self, chart_id: &str, timestamp: i64, now: Instant) -> Option<PointerOutcome> {
        let index = self.chart_index(chart_id)?;

        // An empty chart never opens a throttle window.
        let target = match self.charts[index].source {
            SeriesSource::Battery => {
                let view = self.battery_views.view(self.store.battery(), self.chart_cap);
                find_nearest(view.iter(), timestamp).copied().map(PointerTarget::Battery)
            }
            SeriesSource::Thermal => {
                let view = self.thermal_views.view(self.store.thermal(), self.chart_cap);
                find_nearest(view.iter(), timestamp).copied().map(PointerTarget::Thermal)
            }
        };
        let Some(target) = target else {
            return Some(PointerOutcome::NoData);
        };

        let interval = self.throttle_interval;
        let handler = self
            .pointer_handlers
            .entry(chart_id.to_string())
            .or_insert_with(|| throttle(forward_pointer as PointerForward, interval));
        let outcome = match handler.call_at(now, (&mut self.coordinator, target)) {
            Some(changed) => PointerOutcome::Forwarded { changed },
            None => PointerOutcome::Throttled,
        };
        Some(outcome)
    }

    /// Pointer left a chart. Not rate limited.
    pub fn pointer_leave(&mut self) -> bool {
        self.coordinator.clear()
    }

    pub fn set_timestamp(&mut self, timestamp: Option<i64>) -> bool {
        self.coordinator.set_timestamp(timestamp)
    }

    fn chart_index(&self, chart_id: &str) -> Option<usize> {
        self.charts.iter().position(|c| c.id == chart_id)
    }

    fn build_chart(&mut self, index: usize) -> ChartData {
        let config = &self.charts[index];
        let state = self.coordinator.state();

        let (series, highlight_ms) = match config.source {
            SeriesSource::Battery => {
                let view = self.battery_views.view(self.store.battery(), self.chart_cap);
                (
                    series_data(config, &view),
                    state.matched_battery.map(|r| r.timestamp),
                )
            }
            SeriesSource::Thermal => {
                let view = self.thermal_views.view(self.store.thermal(), self.chart_cap);
                (
                    series_data(config, &view),
                    state.matched_thermal.map(|r| r.timestamp),
                )
            }
        };

        ChartData {
            id: config.id.clone(),
            title: config.title.clone(),
            unit: config.unit.clone(),
            kind: config.kind,
            source: config.source,
            value_divisor: config.value_divisor,
            fraction_digits: config.fraction_digits,
            series,
            highlight_ms,
        }
    }

    #[cfg(test)]
    fn battery_series(&self) -> &crate::domain::series::Series<BatteryRecord> {
        self.store.battery()
    }
}

fn series_data<T: Sample>(config: &ChartConfig, view: &DownsampledView<T>) -> Vec<SeriesData> {
    config
        .series
        .iter()
        .map(|s| {
            let points = view
                .iter()
                .filter_map(|r| r.field(&s.field).map(|v| TimeSeriesPoint::new(r.timestamp(), v)))
                .collect();
            SeriesData::new(s.id.clone(), s.name.clone(), s.color.clone(), points)
        })
        .collect()
}

/// Drops series naming a field their chart's source does not have, then
/// charts left without series.
fn validate_charts(charts: Vec<ChartConfig>) -> Vec<ChartConfig> {
    charts
        .into_iter()
        .filter_map(|mut chart| {
            chart.series.retain(|s| {
                let known = has_field(chart.source, &s.field);
                if !known {
                    tracing::warn!(
                        "Skipping series {} of chart {}: {:?} records have no field {}",
                        s.id,
                        chart.id,
                        chart.source,
                        s.field
                    );
                }
                known
            });
            if chart.series.is_empty() {
                tracing::warn!("Skipping chart {}: no usable series", chart.id);
                return None;
            }
            Some(chart)
        })
        .collect()
}
