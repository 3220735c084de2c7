// Hover coordination - the single writer of the shared hover state
use crate::application::matcher::find_nearest;
use crate::domain::hover::HoverState;
use crate::domain::sample::{BatteryRecord, ThermalRecord};
use crate::domain::series::Series;

/// Receives the hover state after every transition.
pub trait HoverObserver: Send {
    fn hover_changed(&mut self, state: &HoverState);
}

impl<F> HoverObserver for F
where
    F: FnMut(&HoverState) + Send,
{
    fn hover_changed(&mut self, state: &HoverState) {
        self(state)
    }
}

/// Owns the [`HoverState`] of one viewing session.
///
/// Each mutator returns `true` when it changed the state. Observers are
/// notified synchronously, once per change, before the mutator returns.
/// Re-submitting the active timestamp changes nothing and notifies no one.
pub struct HoverCoordinator {
    battery: Series<BatteryRecord>,
    thermal: Series<ThermalRecord>,
    state: HoverState,
    observers: Vec<Box<dyn HoverObserver>>,
    revision: u64,
}

impl HoverCoordinator {
    pub fn new(battery: Series<BatteryRecord>, thermal: Series<ThermalRecord>) -> Self {
        Self {
            battery,
            thermal,
            state: HoverState::idle(),
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Number of transitions so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl HoverObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_from_battery(&mut self, record: Option<&BatteryRecord>) -> bool {
        let Some(record) = record else {
            return self.clear();
        };
        if self.is_active_at(record.timestamp) {
            return false;
        }

        let next = HoverState {
            active_timestamp: Some(record.timestamp),
            matched_battery: Some(*record),
            matched_thermal: find_nearest(self.thermal.as_slice(), record.timestamp).copied(),
        };
        self.transition(next)
    }

    pub fn set_from_thermal(&mut self, record: Option<&ThermalRecord>) -> bool {
        let Some(record) = record else {
            return self.clear();
        };
        if self.is_active_at(record.timestamp) {
            return false;
        }

        let next = HoverState {
            active_timestamp: Some(record.timestamp),
            matched_battery: find_nearest(self.battery.as_slice(), record.timestamp).copied(),
            matched_thermal: Some(*record),
        };
        self.transition(next)
    }

    pub fn set_timestamp(&mut self, timestamp: Option<i64>) -> bool {
        let Some(timestamp) = timestamp else {
            return self.clear();
        };
        if self.is_active_at(timestamp) {
            return false;
        }

        let next = HoverState {
            active_timestamp: Some(timestamp),
            matched_battery: find_nearest(self.battery.as_slice(), timestamp).copied(),
            matched_thermal: find_nearest(self.thermal.as_slice(), timestamp).copied(),
        };
        self.transition(next)
    }

    pub fn clear(&mut self) -> bool {
        self.transition(HoverState::idle())
    }

    /// Adopts freshly loaded series.
    ///
    /// While active, the match for every series that was actually replaced is
    /// looked up again at the active timestamp; the other match is kept.
    pub fn rebind(&mut self, battery: Series<BatteryRecord>, thermal: Series<ThermalRecord>) -> bool {
        let battery_changed = battery.id() != self.battery.id();
        let thermal_changed = thermal.id() != self.thermal.id();
        self.battery = battery;
        self.thermal = thermal;

        let Some(timestamp) = self.state.active_timestamp else {
            return false;
        };

        let mut next = self.state;
        if battery_changed {
            next.matched_battery = find_nearest(self.battery.as_slice(), timestamp).copied();
        }
        if thermal_changed {
            next.matched_thermal = find_nearest(self.thermal.as_slice(), timestamp).copied();
        }
        self.transition(next)
    }

    fn is_active_at(&self, timestamp: i64) -> bool {
        self.state.active_timestamp == Some(timestamp)
    }

    fn transition(&mut self, next: HoverState) -> bool {
        if next == self.state {
            return false;
        }

        self.state = next;
        self.revision += 1;
        tracing::debug!(
            "Hover revision {} at {:?}",
            self.revision,
            self.state.active_timestamp
        );
        for observer in &mut self.observers {
            observer.hover_changed(&self.state);
        }
        true
    }
}
