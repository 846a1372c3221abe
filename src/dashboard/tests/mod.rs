//! Tests for the Dashboard aggregate.
//!
//! Tests are organized into categories:
//! - `basic`: construction, add, rename, delete, clear
//! - `commands`: caption commands and their action callbacks
//! - `drag`: the drag-and-drop protocol
//! - `edit_mode`: band edit mode, selection, height
//! - `columns`: column-count changes and band splitting
//! - `document`: projection, loading and round-trips
//! - `subscriber`: `changed` notifications
//! - `invariants`: property tests over arbitrary operation sequences

mod basic;

use std::collections::HashSet;
use tokio::sync::broadcast;

use super::{Changed, Dashboard, DashboardOptions};
use crate::document::{BandRecord, DashboardDocument};
use crate::model::{ColumnCount, Widget};
use crate::surface::RenderingSurface;
use crate::test_utils::RecordingSurface;

/// Widget with a title and render URL derived from its id.
pub(super) fn widget(id: &str) -> Widget {
    Widget::new(id, format!("Widget {}", id), format!("widgets/{}", id))
}

pub(super) fn headless() -> Dashboard {
    Dashboard::default()
}

/// Dashboard on a recording surface whose widgets are all 100px wide.
pub(super) fn recording() -> Dashboard<RecordingSurface> {
    Dashboard::new(DashboardOptions::default(), RecordingSurface::with_width(100))
}

/// Loads `layout` into a recording dashboard and clears the recorded calls.
pub(super) fn recording_with(layout: &[(ColumnCount, &[&str])]) -> Dashboard<RecordingSurface> {
    let mut dashboard = recording();
    dashboard
        .load_document(&document_of(layout))
        .expect("test layout should load");
    dashboard.surface_mut().reset();
    dashboard
}

pub(super) fn headless_with(layout: &[(ColumnCount, &[&str])]) -> Dashboard {
    let mut dashboard = headless();
    dashboard
        .load_document(&document_of(layout))
        .expect("test layout should load");
    dashboard
}

pub(super) fn document_of(layout: &[(ColumnCount, &[&str])]) -> DashboardDocument {
    DashboardDocument {
        bands: layout
            .iter()
            .map(|(count, ids)| BandRecord {
                column_count: *count,
                height: 90,
                widgets: ids.iter().map(|id| widget(id)).collect(),
            })
            .collect(),
    }
}

/// Widget ids per band, in order.
pub(super) fn layout_of<S: RenderingSurface>(dashboard: &Dashboard<S>) -> Vec<Vec<String>> {
    dashboard
        .bands()
        .iter()
        .map(|band| {
            band.widgets()
                .iter()
                .map(|w| w.id.as_str().to_string())
                .collect()
        })
        .collect()
}

/// Number of `changed` notifications waiting in `rx`.
pub(super) fn drain(rx: &mut broadcast::Receiver<Changed>) -> usize {
    let mut count = 0;
    while rx.try_recv().is_ok() {
        count += 1;
    }
    count
}

/// Asserts the capacity, non-empty and id-uniqueness invariants.
pub(super) fn assert_invariants<S: RenderingSurface>(dashboard: &Dashboard<S>) {
    let bands = dashboard.bands();
    assert!(!bands.is_empty(), "dashboard must keep at least one band");

    let mut seen = HashSet::new();
    for (index, band) in bands.iter().enumerate() {
        assert!(
            band.len() <= band.column_count().get(),
            "band {} holds {} widgets with {} columns",
            index,
            band.len(),
            band.column_count()
        );
        if bands.len() > 1 {
            assert!(!band.is_empty(), "band {} is empty", index);
        }
        for w in band.widgets() {
            assert!(seen.insert(w.id.clone()), "duplicate widget id {}", w.id);
        }
    }
}
