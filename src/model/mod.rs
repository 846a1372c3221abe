//! Structural data model: widgets, bands and their identifiers.
//!
//! A [`Band`] is a horizontal row holding between one and three [`Widget`]s
//! side by side. Widget order inside a band is the left-to-right visual order.

mod band;
mod widget;

pub use band::{Band, BandId, ColumnCount};
pub use widget::{Widget, WidgetId};
