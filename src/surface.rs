//! Boundary to the visual layer.
//!
//! The dashboard never measures or draws anything itself. It tells a
//! [`RenderingSurface`] which elements to create, destroy and position, and
//! asks it for the pixel geometry it needs to lay widgets out. Every method
//! has a no-op default so headless hosts and tests only implement what they
//! observe.

use crate::model::{BandId, ColumnCount, Widget, WidgetId};
use crate::placement::Slot;

/// Edit-mode decoration of a band element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandMark {
    /// Regular viewing state.
    None,
    /// Band edit mode is active and the band can be selected.
    EditCandidate,
    /// The band is selected: resizable, with its column selector shown.
    Selected,
}

/// Visual layer consumed by the dashboard.
pub trait RenderingSurface {
    /// Create a band element at `position` in the band container.
    fn create_band(&mut self, _band: BandId, _position: usize, _height: u32) {}

    /// Remove a band element and everything inside it.
    fn destroy_band(&mut self, _band: BandId) {}

    /// Resize a band element.
    fn set_band_height(&mut self, _band: BandId, _height: u32) {}

    /// Current rendered height of a band, if the surface can measure it.
    fn band_height(&self, _band: BandId) -> Option<u32> {
        None
    }

    /// Apply the column-count class of a band, replacing any previous one.
    fn apply_column_class(&mut self, _band: BandId, _columns: ColumnCount) {}

    /// Create the element for a widget inside a band.
    fn create_widget(&mut self, _band: BandId, _widget: &Widget) {}

    /// Remove a widget element.
    fn destroy_widget(&mut self, _widget: &WidgetId) {}

    /// Measured width of a widget element, if known.
    fn widget_width(&self, _widget: &WidgetId) -> Option<u32> {
        None
    }

    /// Place a widget at a horizontal offset inside its band.
    fn position_widget(&mut self, _widget: &WidgetId, _left: u32) {}

    /// Update the caption of a widget.
    fn set_widget_title(&mut self, _widget: &WidgetId, _title: &str) {}

    /// (Re)load the body of a widget from `url`.
    fn render_widget(&mut self, _widget: &WidgetId, _url: &str) {}

    /// Enable or disable every widget's command buttons.
    fn set_widget_commands_enabled(&mut self, _enabled: bool) {}

    /// Decorate a band for the current edit-mode state.
    fn mark_band(&mut self, _band: BandId, _mark: BandMark) {}

    /// Show the column-count selector inside a band; `current` is disabled.
    fn show_column_selector(&mut self, _band: BandId, _current: ColumnCount) {}

    /// Remove the column-count selector, wherever it is.
    fn hide_column_selector(&mut self) {}

    /// Show a drop slot at a horizontal offset.
    fn show_slot(&mut self, _slot: &Slot, _left: u32) {}

    /// Highlight the hovered slot, or clear the highlight with `None`.
    fn highlight_slot(&mut self, _slot: Option<usize>) {}

    /// Remove every drop slot, including a placeholder trailing band.
    fn clear_slots(&mut self) {}
}

/// A surface that draws nothing and measures nothing.
///
/// Widths are treated as zero, so widgets are spaced only by the configured
/// inter-widget spacing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderingSurface for NullSurface {}
