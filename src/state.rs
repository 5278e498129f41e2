//! Interactive comparison state.
//!
//! [`ComparisonState`] owns the monitor store together with the view
//! settings a page would keep (mode, container width, manual scale) and
//! turns user actions into fresh layouts. Hosts that measure real rendered
//! geometry use the [`MeasureScheduler`] to re-run caption placement once
//! the view has settled after a visibility change.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Config;
use crate::ir::SizeKey;
use crate::layout::label_placement::{LabelGeometry, PlacedLabel, place_all_labels};
use crate::layout::{Layout, compute_layout};
use crate::store::{MonitorStore, StoreError};

/// Handle for one scheduled caption measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingMeasure {
    ticket: MeasureTicket,
    due: Instant,
}

/// Debounces caption re-measurement.
///
/// Scheduling replaces whatever is pending, so only the latest request
/// fires, and results computed for a superseded ticket can be recognised
/// and dropped.
#[derive(Debug, Clone)]
pub struct MeasureScheduler {
    delay: Duration,
    generation: u64,
    pending: Option<PendingMeasure>,
}

impl MeasureScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) -> MeasureTicket {
        self.generation += 1;
        let ticket = MeasureTicket {
            generation: self.generation,
        };
        self.pending = Some(PendingMeasure {
            ticket,
            due: now + self.delay,
        });
        ticket
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending measurement becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.due)
    }

    /// Takes the pending measurement once its settle delay has passed.
    pub fn poll(&mut self, now: Instant) -> Option<MeasureTicket> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        Some(pending.ticket)
    }

    /// Whether `ticket` is the most recently scheduled one.
    pub fn is_current(&self, ticket: MeasureTicket) -> bool {
        ticket.generation == self.generation
    }
}

pub struct ComparisonState {
    store: MonitorStore,
    config: Config,
    mode: SizeKey,
    scale_override: Option<u32>,
    last_ratio: u32,
    scheduler: MeasureScheduler,
}

impl ComparisonState {
    pub fn new(store: MonitorStore, config: Config, mode: SizeKey) -> Self {
        let scheduler = MeasureScheduler::new(config.layout.measure_settle_delay());
        Self {
            store,
            config,
            mode,
            scale_override: None,
            last_ratio: 1,
            scheduler,
        }
    }

    pub fn store(&self) -> &MonitorStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> SizeKey {
        self.mode
    }

    pub fn container_width(&self) -> f32 {
        self.config.layout.container_width
    }

    pub fn scale_override(&self) -> Option<u32> {
        self.scale_override
    }

    /// Ratio used by the most recent layout.
    pub fn ratio(&self) -> u32 {
        self.last_ratio
    }

    pub fn scheduler(&self) -> &MeasureScheduler {
        &self.scheduler
    }

    /// Full redraw with the current settings.
    pub fn render(&mut self) -> Layout {
        let layout = compute_layout(
            &mut self.store,
            self.mode,
            self.scale_override,
            &self.config.theme,
            &self.config.layout,
        );
        self.last_ratio = layout.ratio;
        layout
    }

    /// Container resize: drops any manual scale and redraws.
    pub fn resize(&mut self, container_width: f32) -> Layout {
        self.config.layout.container_width = container_width;
        if self.scale_override.take().is_some() {
            debug!("manual scale cleared by resize");
        }
        self.render()
    }

    pub fn set_mode(&mut self, mode: SizeKey) -> Layout {
        self.mode = mode;
        self.render()
    }

    pub fn set_scale(&mut self, ratio: u32) -> Layout {
        self.scale_override = Some(ratio.max(1));
        self.render()
    }

    /// Zooms out one step (`1:N` becomes `1:N+1`).
    pub fn scale_up(&mut self) -> Layout {
        let ratio = self.scale_override.unwrap_or(self.last_ratio).saturating_add(1);
        self.set_scale(ratio)
    }

    /// Zooms in one step, never past `1:1`.
    pub fn scale_down(&mut self) -> Layout {
        let ratio = self.scale_override.unwrap_or(self.last_ratio).saturating_sub(1);
        self.set_scale(ratio)
    }

    pub fn toggle(&mut self, id: &str, now: Instant) -> Result<Layout, StoreError> {
        let enabled = self.store.toggle(id)?;
        debug!(id, enabled, "monitor toggled");
        Ok(self.visibility_changed(now))
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool, now: Instant) -> Result<Layout, StoreError> {
        self.store.set_enabled(id, enabled)?;
        Ok(self.visibility_changed(now))
    }

    pub fn enable_all(&mut self, now: Instant) -> Layout {
        self.store.enable_all();
        self.visibility_changed(now)
    }

    pub fn disable_all(&mut self, now: Instant) -> Layout {
        self.store.disable_all();
        self.visibility_changed(now)
    }

    pub fn toggle_all(&mut self, now: Instant) -> Layout {
        self.store.toggle_all();
        self.visibility_changed(now)
    }

    /// Thumbnail image URL for the preview of monitor `id`.
    pub fn thumbnail_url(&self, id: &str) -> Result<String, StoreError> {
        let monitor = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::UnknownMonitor(id.to_string()))?;
        Ok(self.config.layout.thumbnail_url_for(&monitor.model))
    }

    /// Hands out the pending caption measurement once it is due.
    pub fn due_measurement(&mut self, now: Instant) -> Option<MeasureTicket> {
        self.scheduler.poll(now)
    }

    /// Places captions from geometry measured by the host. Returns `None`
    /// when a newer measurement has been scheduled since `ticket`.
    pub fn place_measured_labels(
        &self,
        ticket: MeasureTicket,
        measured: &[LabelGeometry],
    ) -> Option<Vec<PlacedLabel>> {
        if !self.scheduler.is_current(ticket) {
            debug!("dropping stale caption measurement");
            return None;
        }
        Some(place_all_labels(measured, self.config.layout.label_metrics()))
    }

    fn visibility_changed(&mut self, now: Instant) -> Layout {
        let layout = self.render();
        self.scheduler.schedule(now);
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MonitorSpec, PhysicalSize, PixelResolution};

    fn spec(label: &str, width: f32, checked: bool) -> MonitorSpec {
        MonitorSpec {
            label: label.to_string(),
            model: format!("{label}-model"),
            display: PhysicalSize {
                w: width,
                h: width * 0.45,
            },
            resolution: PixelResolution {
                w: width * 5.0,
                h: width * 2.0,
                freq: 60.0,
            },
            checked: Some(checked),
            curved: None,
        }
    }

    fn state() -> ComparisonState {
        let store = MonitorStore::new(
            vec![
                spec("Wide", 1000.0, false),
                spec("Mid", 800.0, true),
                spec("Small", 600.0, true),
            ],
            false,
        );
        let mut config = Config::default();
        config.layout.container_width = 300.0;
        config.layout.fast_text_metrics = true;
        ComparisonState::new(store, config, SizeKey::Display)
    }

    #[test]
    fn toggling_twice_restores_the_ratio() {
        let mut state = state();
        let now = Instant::now();
        let before = state.render().ratio;
        assert_eq!(before, 3);
        let with_wide = state.toggle("wide", now).unwrap().ratio;
        assert_eq!(with_wide, 4);
        let after = state.toggle("wide", now).unwrap().ratio;
        assert_eq!(after, before);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut state = state();
        assert!(state.toggle("nope", Instant::now()).is_err());
        assert!(!state.scheduler().is_pending());
    }

    #[test]
    fn manual_scale_survives_toggles_until_resize() {
        let mut state = state();
        let now = Instant::now();
        state.render();
        assert_eq!(state.scale_up().ratio, 4);
        assert_eq!(state.scale_up().ratio, 5);
        assert_eq!(state.toggle("small", now).unwrap().ratio, 5);
        assert_eq!(state.disable_all(now).ratio, 5);
        assert_eq!(state.set_mode(SizeKey::Resolution).ratio, 5);
        assert_eq!(state.scale_override(), Some(5));

        let layout = state.resize(300.0);
        assert_eq!(state.scale_override(), None);
        assert!(!layout.ratio_overridden);
        assert_eq!(layout.ratio, 17);
    }

    #[test]
    fn scale_down_stops_at_one() {
        let mut state = state();
        state.set_scale(1);
        assert_eq!(state.scale_down().ratio, 1);
        assert_eq!(state.set_scale(0).ratio, 1);
    }

    #[test]
    fn bulk_actions_redraw() {
        let mut state = state();
        let now = Instant::now();
        assert_eq!(state.enable_all(now).boxes.len(), 3);
        assert_eq!(state.disable_all(now).boxes.len(), 0);
        let layout = state.toggle_all(now);
        assert_eq!(layout.boxes.len(), 3);
        assert!(layout.legend.iter().all(|entry| entry.enabled));
    }

    #[test]
    fn thumbnail_lookup() {
        let state = state();
        assert_eq!(
            state.thumbnail_url("mid").unwrap(),
            "https://www.displayspecifications.com/images/model/Mid-model/320/main.jpg"
        );
        assert!(state.thumbnail_url("missing").is_err());
    }

    #[test]
    fn scheduler_fires_after_the_settle_delay() {
        let start = Instant::now();
        let mut scheduler = MeasureScheduler::new(Duration::from_millis(100));
        assert_eq!(scheduler.poll(start), None);
        let ticket = scheduler.schedule(start);
        assert_eq!(scheduler.deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(scheduler.poll(start + Duration::from_millis(50)), None);
        assert_eq!(scheduler.poll(start + Duration::from_millis(100)), Some(ticket));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn rescheduling_supersedes_the_pending_measurement() {
        let start = Instant::now();
        let mut scheduler = MeasureScheduler::new(Duration::from_millis(100));
        let first = scheduler.schedule(start);
        let second = scheduler.schedule(start + Duration::from_millis(80));
        assert_eq!(scheduler.poll(start + Duration::from_millis(120)), None);
        assert_eq!(scheduler.poll(start + Duration::from_millis(180)), Some(second));
        assert!(!scheduler.is_current(first));
        assert!(scheduler.is_current(second));

        scheduler.schedule(start);
        scheduler.cancel();
        assert_eq!(scheduler.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn stale_measurements_are_dropped() {
        let mut state = state();
        let start = Instant::now();
        let settle = state.config().layout.measure_settle_delay();
        state.toggle("wide", start).unwrap();
        let ticket = state.due_measurement(start + settle).unwrap();

        let layout = state.render();
        let measured = layout.caption_geometry();
        let placed = state.place_measured_labels(ticket, &measured).unwrap();
        assert_eq!(placed.len(), measured.len());

        state.toggle("small", start + settle).unwrap();
        assert!(state.place_measured_labels(ticket, &measured).is_none());
    }
}
