use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, warn};

use crate::ir::{Monitor, MonitorSpec, SizeKey};
use crate::layout::order::{assign_order, stamp_order};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown monitor id `{0}`")]
    UnknownMonitor(String),
}

/// Owns the monitor list and its id lookup.
///
/// Only the enabled flag and the order stamps change after loading; both
/// are rewritten in place on every redraw.
#[derive(Debug, Clone, Default)]
pub struct MonitorStore {
    monitors: Vec<Monitor>,
    lookup: BTreeMap<String, usize>,
}

impl MonitorStore {
    /// Builds a store from input records, kept in input order until the
    /// first [`MonitorStore::assign_order`]. Records whose ids collide
    /// replace the earlier record in place.
    pub fn new(specs: Vec<MonitorSpec>, default_enabled: bool) -> Self {
        let mut monitors: Vec<Monitor> = Vec::with_capacity(specs.len());
        let mut seen: HashMap<String, usize> = HashMap::new();
        for spec in specs {
            let monitor = Monitor::from_spec(spec, default_enabled);
            match seen.get(&monitor.id) {
                Some(&idx) => {
                    warn!(id = %monitor.id, "duplicate monitor id, keeping the later record");
                    monitors[idx] = monitor;
                }
                None => {
                    seen.insert(monitor.id.clone(), monitors.len());
                    monitors.push(monitor);
                }
            }
        }
        let lookup = stamp_order(&mut monitors);
        Self { monitors, lookup }
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Monitors in stacking order (widest first, as of the last ordering;
    /// input order before any).
    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    /// Monitors in legend order (by id).
    pub fn iter_by_id(&self) -> impl Iterator<Item = &Monitor> {
        self.lookup.values().map(|&idx| &self.monitors[idx])
    }

    pub fn get(&self, id: &str) -> Option<&Monitor> {
        self.lookup.get(id).map(|&idx| &self.monitors[idx])
    }

    pub fn any_enabled(&self) -> bool {
        self.monitors.iter().any(|monitor| monitor.enabled)
    }

    pub fn assign_order(&mut self, key: SizeKey) {
        self.lookup = assign_order(&mut self.monitors, key);
        debug!(key = key.as_str(), count = self.lookup.len(), "assigned monitor order");
    }

    /// Sets the enabled flag; returns whether it changed.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<bool, StoreError> {
        let monitor = self.get_mut(id)?;
        let changed = monitor.enabled != enabled;
        monitor.enabled = enabled;
        Ok(changed)
    }

    /// Flips the enabled flag; returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StoreError> {
        let monitor = self.get_mut(id)?;
        monitor.enabled = !monitor.enabled;
        Ok(monitor.enabled)
    }

    /// Enables every monitor; returns how many changed state.
    pub fn enable_all(&mut self) -> usize {
        self.set_all(true)
    }

    pub fn disable_all(&mut self) -> usize {
        self.set_all(false)
    }

    pub fn toggle_all(&mut self) {
        for monitor in &mut self.monitors {
            monitor.enabled = !monitor.enabled;
        }
    }

    fn set_all(&mut self, enabled: bool) -> usize {
        let mut changed = 0;
        for monitor in &mut self.monitors {
            if monitor.enabled != enabled {
                monitor.enabled = enabled;
                changed += 1;
            }
        }
        changed
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Monitor, StoreError> {
        let idx = *self
            .lookup
            .get(id)
            .ok_or_else(|| StoreError::UnknownMonitor(id.to_string()))?;
        Ok(&mut self.monitors[idx])
    }
}
