//! Per-request view models for the dashboard and report pages.
//!
//! Each view owns its reading sequence. It starts out `Loading` with an empty
//! sequence and is populated exactly once by [`DashboardView::mount`] /
//! [`ReportView::mount`]. A view is only mutated after the fetch future
//! resolves inside the request that mounted it; if that request is dropped
//! the result is dropped with it.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::format::DisplayZone;
use crate::services::window::{filter_by_window, TimeRange};
use crate::source::{Reading, ReadingSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Loaded,
}

/// Most recent value of each metric, or 0 when there are no readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct CurrentValues {
    pub humidity: f64,
    pub temperature: f64,
    pub moisture: f64,
}

impl CurrentValues {
    #[must_use]
    pub fn from_readings(readings: &[Reading]) -> Self {
        readings
            .last()
            .map(|r| Self {
                humidity: r.humidity,
                temperature: r.temperature,
                moisture: r.moisture,
            })
            .unwrap_or_default()
    }
}

/// Chart labels plus one value series per metric, all the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SeriesSet {
    pub labels: Vec<String>,
    pub humidity: Vec<f64>,
    pub temperature: Vec<f64>,
    pub moisture: Vec<f64>,
}

impl SeriesSet {
    pub fn from_readings(readings: &[Reading], label: impl Fn(&Reading) -> String) -> Self {
        let mut set = Self {
            labels: Vec::with_capacity(readings.len()),
            humidity: Vec::with_capacity(readings.len()),
            temperature: Vec::with_capacity(readings.len()),
            moisture: Vec::with_capacity(readings.len()),
        };

        for reading in readings {
            set.labels.push(label(reading));
            set.humidity.push(reading.humidity);
            set.temperature.push(reading.temperature);
            set.moisture.push(reading.moisture);
        }

        set
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub state: LoadState,
    pub current: CurrentValues,
    pub series: SeriesSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportSnapshot {
    pub state: LoadState,
    pub range: TimeRange,
    /// Number of readings inside the window
    pub count: usize,
    pub current: CurrentValues,
    pub series: SeriesSet,
}

/// Chart labels are the raw source timestamps.
pub struct DashboardView {
    state: LoadState,
    readings: Vec<Reading>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            readings: Vec::new(),
        }
    }

    /// Create the view and fetch its readings once.
    pub async fn mount<S: ReadingSource>(source: &S) -> Self {
        let mut view = Self::new();
        let readings = source.fetch_readings().await;
        view.finish_loading(readings);
        view
    }

    /// Replace the sequence wholesale and mark the view loaded.
    pub fn finish_loading(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
        self.state = LoadState::Loaded;
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    #[must_use]
    pub fn current(&self) -> CurrentValues {
        CurrentValues::from_readings(&self.readings)
    }

    #[must_use]
    pub fn series(&self) -> SeriesSet {
        SeriesSet::from_readings(&self.readings, |r| r.timestamp.clone())
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            state: self.state,
            current: self.current(),
            series: self.series(),
        }
    }
}

pub struct ReportView {
    state: LoadState,
    readings: Vec<Reading>,
    selected_range: TimeRange,
    filtered: Vec<Reading>,
    zone: DisplayZone,
}

impl ReportView {
    #[must_use]
    pub fn new(zone: DisplayZone) -> Self {
        Self {
            state: LoadState::Loading,
            readings: Vec::new(),
            selected_range: TimeRange::default(),
            filtered: Vec::new(),
            zone,
        }
    }

    /// Create the view and fetch its readings once.
    pub async fn mount<S: ReadingSource>(source: &S, zone: DisplayZone) -> Self {
        let mut view = Self::new(zone);
        let readings = source.fetch_readings().await;
        view.finish_loading(readings);
        view
    }

    pub fn finish_loading(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
        self.state = LoadState::Loaded;
        self.refilter();
    }

    /// Change the window. Recomputes from the owned sequence, never refetches.
    pub fn select_range(&mut self, range: TimeRange) {
        if range != self.selected_range {
            self.selected_range = range;
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_by_window(&self.readings, self.selected_range.days(), &self.zone);
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn selected_range(&self) -> TimeRange {
        self.selected_range
    }

    #[must_use]
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    #[must_use]
    pub fn filtered(&self) -> &[Reading] {
        &self.filtered
    }

    #[must_use]
    pub fn current(&self) -> CurrentValues {
        CurrentValues::from_readings(&self.filtered)
    }

    #[must_use]
    pub fn series(&self) -> SeriesSet {
        let range = self.selected_range;
        SeriesSet::from_readings(&self.filtered, |r| self.zone.format_short(&r.timestamp, range))
    }

    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            state: self.state,
            range: self.selected_range,
            count: self.filtered.len(),
            current: self.current(),
            series: self.series(),
        }
    }

    /// Snapshots for every selectable range, selected one first.
    ///
    /// The selection is restored afterwards.
    pub fn snapshots(&mut self) -> Vec<ReportSnapshot> {
        let selected = self.selected_range;
        let mut snapshots = vec![self.snapshot()];
        for range in TimeRange::ALL.into_iter().filter(|r| *r != selected) {
            self.select_range(range);
            snapshots.push(self.snapshot());
        }
        self.select_range(selected);
        snapshots
    }
}
