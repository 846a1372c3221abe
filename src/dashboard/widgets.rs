//! Widget operations: placement, rename, deletion and caption commands.

use super::Dashboard;
use crate::actions::WidgetRef;
use crate::error::DashboardError;
use crate::model::{Band, BandId, Widget, WidgetId};
use crate::placement;
use crate::surface::RenderingSurface;

impl<S: RenderingSurface> Dashboard<S> {
    /// Adds a widget to the first band with room, appending a default band
    /// when every band is full. Returns the index of the band it landed in.
    pub fn add_widget(&mut self, widget: Widget) -> Result<usize, DashboardError> {
        self.ensure_structural()?;
        self.ensure_unique(&widget.id)?;

        let options = &self.options;
        let next_band_id = &mut self.next_band_id;
        let placed = placement::place_widget(&mut self.bands, widget.clone(), || {
            let id = BandId(*next_band_id);
            *next_band_id += 1;
            Band::new(id, options.default_column_count, options.default_height)
        });

        if placed.created_band {
            self.materialize_band(placed.band);
        } else {
            let band = self.bands[placed.band].id();
            self.materialize_widget(band, &widget);
            self.reposition_band(placed.band);
        }

        tracing::info!(
            "Added widget \"{}\" to band {}{}",
            widget.id,
            placed.band,
            if placed.created_band { " (new band)" } else { "" }
        );
        self.emit_changed();
        Ok(placed.band)
    }

    /// Appends a widget to the band at `band_index` without a capacity check.
    pub fn add_widget_in_band(
        &mut self,
        widget: Widget,
        band_index: usize,
    ) -> Result<(), DashboardError> {
        self.ensure_structural()?;
        self.check_band_index(band_index)?;
        self.ensure_unique(&widget.id)?;

        tracing::debug!("Adding widget \"{}\" to band {}", widget.id, band_index);
        self.append_to_band(band_index, widget);
        self.emit_changed();
        Ok(())
    }

    /// Renames a widget. Returns `false` if the title was already `title`.
    pub fn update_widget_title(
        &mut self,
        id: &WidgetId,
        title: impl Into<String>,
    ) -> Result<bool, DashboardError> {
        self.edit_mode.ensure_viewing()?;
        let (b, i) = self.locate(id)?;
        let title = title.into();

        let Some(widget) = self.bands[b].widget_mut(i) else {
            return Err(DashboardError::UnknownWidgetReference { id: id.clone() });
        };
        if widget.title == title {
            return Ok(false);
        }
        widget.title = title;
        self.surface.set_widget_title(id, &self.bands[b].widgets()[i].title);

        tracing::debug!("Renamed widget \"{}\"", id);
        self.emit_changed();
        Ok(true)
    }

    /// Removes a widget, purging its band if that leaves it empty and it is
    /// not the only band.
    pub fn delete_widget(&mut self, id: &WidgetId) -> Result<(), DashboardError> {
        self.ensure_structural()?;
        let (b, i) = self.locate(id)?;

        self.bands[b].remove(i);
        self.surface.destroy_widget(id);
        self.reposition_band(b);
        let removed = placement::purge_empty_bands(&mut self.bands);
        self.destroy_bands(&removed);

        tracing::info!(
            "Deleted widget \"{}\" ({} bands removed)",
            id,
            removed.len()
        );
        self.emit_changed();
        Ok(())
    }

    /// Asks the host to confirm, then deletes. Resolves to `false` when the
    /// host declined.
    pub async fn request_delete(&mut self, id: &WidgetId) -> Result<bool, DashboardError> {
        self.ensure_structural()?;
        let widget = self.widget_ref(id)?;

        if !self.actions.confirm_delete(&widget).await {
            tracing::debug!("Deletion of widget \"{}\" declined", id);
            return Ok(false);
        }
        self.delete_widget(id)?;
        Ok(true)
    }

    /// Lets the host edit a widget's attributes; refreshes it if they changed.
    pub fn edit_widget(&mut self, id: &WidgetId) -> Result<bool, DashboardError> {
        self.edit_mode.ensure_viewing()?;
        let widget = self.widget_ref(id)?;

        let changed = self.actions.edit_widget(&widget);
        if changed {
            self.refresh_widget(id)?;
        }
        Ok(changed)
    }

    /// Hands a widget to the host's info display.
    pub fn show_widget_info(&mut self, id: &WidgetId) -> Result<(), DashboardError> {
        self.edit_mode.ensure_viewing()?;
        let widget = self.widget_ref(id)?;
        self.actions.display_info(&widget);
        Ok(())
    }

    /// Reloads a widget's content. Not a structural change.
    pub fn refresh_widget(&mut self, id: &WidgetId) -> Result<(), DashboardError> {
        let (b, i) = self.locate(id)?;
        let url = self.bands[b].widgets()[i].content_url(&self.options.base_widget_url);
        self.surface.render_widget(id, &url);
        Ok(())
    }

    /// Drops every band and widget and starts over with one default band.
    ///
    /// Leaves band edit mode and cancels any drag. Emits nothing; a load is
    /// expected to follow.
    pub fn clear_dashboard(&mut self) {
        self.leave_band_edit_mode();
        if self.drag.take().is_some() {
            self.surface.highlight_slot(None);
            self.surface.clear_slots();
        }
        self.discard_bands();
        self.append_default_band();
        tracing::debug!("Dashboard cleared");
    }

    pub(super) fn discard_bands(&mut self) {
        let removed: Vec<BandId> = self.bands.drain(..).map(|b| b.id()).collect();
        self.destroy_bands(&removed);
    }

    /// Pushes a widget into a band and shows it, skipping capacity checks.
    pub(super) fn append_to_band(&mut self, band_index: usize, widget: Widget) {
        let band = self.bands[band_index].id();
        self.materialize_widget(band, &widget);
        self.bands[band_index].push(widget);
        self.reposition_band(band_index);
    }

    fn ensure_unique(&self, id: &WidgetId) -> Result<(), DashboardError> {
        if placement::locate(&self.bands, id).is_some() {
            tracing::warn!("There's already a widget with id \"{}\" in the dashboard", id);
            return Err(DashboardError::DuplicateWidgetId { id: id.clone() });
        }
        Ok(())
    }

    fn widget_ref(&self, id: &WidgetId) -> Result<WidgetRef, DashboardError> {
        let (b, i) = self.locate(id)?;
        Ok(WidgetRef::new(&self.bands[b].widgets()[i], b, i))
    }
}
