//! The dashboard aggregate.
//!
//! [`Dashboard`] owns the ordered band list, the edit mode, any drag in
//! progress, the Rendering Surface and the host's action callbacks. It is the
//! only entry point for mutations, and it announces every successful
//! structural change with exactly one [`Changed`] notification, sent after
//! the change is complete.
//!
//! Operations are split by concern:
//! - `widgets`: add, rename, delete, refresh and caption commands
//! - `drag`: the three-phase drag-and-drop protocol
//! - `bands`: band edit mode, selection, column count and height
//! - `persistence`: document projection and loading

use tokio::sync::broadcast;

use crate::actions::{DefaultActions, WidgetActions, WidgetRef};
use crate::edit_mode::{ColumnSelector, EditMode, EditModeController};
use crate::error::DashboardError;
use crate::layout;
use crate::model::{Band, BandId, ColumnCount, Widget, WidgetId};
use crate::placement::{self, DragSession};
use crate::surface::{BandMark, NullSurface, RenderingSurface};

mod bands;
mod drag;
mod persistence;
mod widgets;

#[cfg(test)]
mod tests;

/// Capacity of the `changed` notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Construction-time settings of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Column count of bands created implicitly.
    pub default_column_count: ColumnCount,
    /// Height in pixels of bands created implicitly.
    pub default_height: u32,
    /// Horizontal gap in pixels between neighbouring widgets.
    pub inter_widget_spacing: u32,
    /// Prefix for widget content URLs.
    pub base_widget_url: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            default_column_count: ColumnCount::TWO,
            default_height: 90,
            inter_widget_spacing: 12,
            base_widget_url: String::new(),
        }
    }
}

/// Notification that the dashboard structure changed. Carries no payload;
/// subscribers read the new state with [`Dashboard::as_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Changed;

/// A dashboard of bands and widgets.
pub struct Dashboard<S: RenderingSurface = NullSurface> {
    options: DashboardOptions,
    bands: Vec<Band>,
    next_band_id: u64,
    edit_mode: EditModeController,
    drag: Option<DragSession>,
    surface: S,
    actions: Box<dyn WidgetActions>,
    changed_tx: broadcast::Sender<Changed>,
    revision: u64,
}

impl<S: RenderingSurface> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("options", &self.options)
            .field("bands", &self.bands)
            .field("edit_mode", &self.edit_mode.mode())
            .field("drag", &self.drag)
            .field("subscriber_count", &self.changed_tx.receiver_count())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Dashboard<NullSurface> {
    /// Creates a dashboard with no visual layer.
    pub fn headless(options: DashboardOptions) -> Self {
        Self::new(options, NullSurface)
    }
}

impl Default for Dashboard<NullSurface> {
    fn default() -> Self {
        Self::headless(DashboardOptions::default())
    }
}

impl<S: RenderingSurface> Dashboard<S> {
    /// Creates an empty dashboard holding one default band.
    pub fn new(options: DashboardOptions, surface: S) -> Self {
        let (changed_tx, _rx) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let mut dashboard = Self {
            options,
            bands: Vec::new(),
            next_band_id: 0,
            edit_mode: EditModeController::new(),
            drag: None,
            surface,
            actions: Box::new(DefaultActions),
            changed_tx,
            revision: 0,
        };
        dashboard.append_default_band();
        dashboard
    }

    /// Replaces the widget caption command handlers.
    pub fn with_actions(mut self, actions: impl WidgetActions + 'static) -> Self {
        self.set_actions(actions);
        self
    }

    pub fn set_actions(&mut self, actions: impl WidgetActions + 'static) {
        self.actions = Box::new(actions);
    }

    // -- Read access ---------------------------------------------------------

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Bands in display order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn widget_count(&self) -> usize {
        self.bands.iter().map(Band::len).sum()
    }

    /// Index of the band with the given id.
    pub fn band_index(&self, id: BandId) -> Option<usize> {
        self.bands.iter().position(|b| b.id() == id)
    }

    /// Looks a widget up by id.
    pub fn find_widget(&self, id: &WidgetId) -> Option<WidgetRef> {
        placement::locate(&self.bands, id)
            .map(|(b, i)| WidgetRef::new(&self.bands[b].widgets()[i], b, i))
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode.mode()
    }

    pub fn is_band_editing(&self) -> bool {
        self.edit_mode.is_band_editing()
    }

    /// Index of the band selected for editing.
    pub fn selected_band(&self) -> Option<usize> {
        self.edit_mode.selected().and_then(|id| self.band_index(id))
    }

    /// The column-count selector, shown while a band is selected.
    pub fn column_selector(&self) -> Option<ColumnSelector> {
        let index = self.selected_band()?;
        let band = &self.bands[index];
        Some(ColumnSelector {
            band: band.id(),
            current: band.column_count(),
        })
    }

    /// The drag in progress, if any.
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // -- Change notification -------------------------------------------------

    /// Subscribes to [`Changed`] notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Changed> {
        self.changed_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.changed_tx.receiver_count()
    }

    /// Number of `changed` notifications emitted so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn emit_changed(&mut self) {
        self.revision += 1;
        match self.changed_tx.send(Changed) {
            Ok(count) => tracing::trace!("Changed notification sent to {} subscribers", count),
            Err(_) => tracing::debug!("No subscribers for changed notification"),
        }
    }

    // -- Guards ----------------------------------------------------------------

    /// Structural widget operations need viewing mode and no open drag.
    fn ensure_structural(&self) -> Result<(), DashboardError> {
        if let Err(e) = self.edit_mode.ensure_viewing() {
            tracing::debug!("Rejected structural command: band edit mode is active");
            return Err(e);
        }
        if self.drag.is_some() {
            tracing::debug!("Rejected structural command: a drag is in progress");
            return Err(DashboardError::DragInProgress);
        }
        Ok(())
    }

    fn locate(&self, id: &WidgetId) -> Result<(usize, usize), DashboardError> {
        placement::locate(&self.bands, id).ok_or_else(|| {
            tracing::debug!("Unknown widget \"{}\"", id);
            DashboardError::UnknownWidgetReference { id: id.clone() }
        })
    }

    fn check_band_index(&self, index: usize) -> Result<(), DashboardError> {
        if index < self.bands.len() {
            return Ok(());
        }
        tracing::warn!("There's no band with index {} in the dashboard", index);
        Err(DashboardError::InvalidBandIndex {
            index,
            band_count: self.bands.len(),
        })
    }

    // -- Band and widget element glue ------------------------------------------

    fn allocate_band_id(&mut self) -> BandId {
        let id = BandId(self.next_band_id);
        self.next_band_id += 1;
        id
    }

    fn default_band(&mut self) -> Band {
        let id = self.allocate_band_id();
        Band::new(id, self.options.default_column_count, self.options.default_height)
    }

    /// Appends an empty default band, returning its index.
    fn append_default_band(&mut self) -> usize {
        let band = self.default_band();
        self.bands.push(band);
        let index = self.bands.len() - 1;
        self.materialize_band(index);
        index
    }

    /// Creates the surface element for the band at `index` and its widgets.
    fn materialize_band(&mut self, index: usize) {
        let band = &self.bands[index];
        let (id, height, columns) = (band.id(), band.height(), band.column_count());
        self.surface.create_band(id, index, height);
        self.surface.apply_column_class(id, columns);
        if self.edit_mode.is_band_editing() {
            self.surface.mark_band(id, BandMark::EditCandidate);
        }
        let widgets = self.bands[index].widgets().to_vec();
        for widget in &widgets {
            self.materialize_widget(id, widget);
        }
        self.reposition_band(index);
    }

    fn materialize_widget(&mut self, band: BandId, widget: &Widget) {
        self.surface.create_widget(band, widget);
        let url = widget.content_url(&self.options.base_widget_url);
        self.surface.render_widget(&widget.id, &url);
    }

    fn destroy_bands(&mut self, removed: &[BandId]) {
        for id in removed {
            self.surface.destroy_band(*id);
        }
    }

    /// Recomputes the horizontal position of every widget in a band.
    fn reposition_band(&mut self, index: usize) {
        let Some(band) = self.bands.get(index) else {
            return;
        };
        let widths: Vec<u32> = band
            .widgets()
            .iter()
            .map(|w| self.surface.widget_width(&w.id).unwrap_or(0))
            .collect();
        let offsets = layout::widget_offsets(&widths, self.options.inter_widget_spacing);
        for (widget, left) in band.widgets().iter().zip(offsets) {
            self.surface.position_widget(&widget.id, left);
        }
    }

    fn reposition_all_bands(&mut self) {
        for index in 0..self.bands.len() {
            self.reposition_band(index);
        }
    }

    /// Re-lays out every band after the container changed size.
    pub fn container_resized(&mut self) {
        self.reposition_all_bands();
    }

    fn render_widgets_of_band(&mut self, index: usize) {
        let Some(band) = self.bands.get(index) else {
            return;
        };
        for widget in band.widgets() {
            let url = widget.content_url(&self.options.base_widget_url);
            self.surface.render_widget(&widget.id, &url);
        }
    }
}
