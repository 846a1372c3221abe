//! FlexDash layout engine
//!
//! A dashboard arranges widgets in horizontal bands. Each band holds one to
//! three widgets side by side, has its own height, and lays its widgets out
//! left to right. This crate owns the band/widget model and every operation
//! on it: capacity-aware placement, drag and drop between bands, column-count
//! changes that split overflowing bands, band edit mode, and lossless
//! serialization to a JSON document.
//!
//! Drawing is left to the host through the [`RenderingSurface`] trait, so the
//! whole engine runs headless in tests.
//!
//! ```
//! use flex_dash::{Dashboard, DashboardOptions, Widget};
//!
//! let mut dashboard = Dashboard::headless(DashboardOptions::default());
//! dashboard.add_widget(Widget::new("1", "Sales", "charts/sales")).unwrap();
//! dashboard.add_widget(Widget::new("2", "Stock", "charts/stock")).unwrap();
//! dashboard.add_widget(Widget::new("3", "Map", "maps/world")).unwrap();
//! assert_eq!(dashboard.band_count(), 2);
//! ```

/// Host callbacks for the widget caption commands.
pub mod actions;

/// TOML configuration with XDG path resolution.
pub mod config;

/// The dashboard aggregate and its operations.
pub mod dashboard;

/// JSON document projection of a dashboard.
pub mod document;

/// Band edit mode state machine.
pub mod edit_mode;

/// Error types for rejected dashboard operations.
pub mod error;

/// Horizontal widget offsets inside a band.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Widgets, bands and identifiers.
pub mod model;

/// Widget placement, drag resolution and band splitting.
pub mod placement;

/// Boundary to the visual layer.
pub mod surface;

#[cfg(test)]
mod test_utils;

pub use actions::{DefaultActions, WidgetActions, WidgetRef};
pub use dashboard::{Changed, Dashboard, DashboardOptions};
pub use document::{BandRecord, DashboardDocument};
pub use edit_mode::{ColumnSelector, EditMode};
pub use error::DashboardError;
pub use model::{Band, BandId, ColumnCount, Widget, WidgetId};
pub use placement::{DropOutcome, DropTarget, Slot, SlotTarget};
pub use surface::{BandMark, NullSurface, RenderingSurface};
