//! Band edit mode: selection, column count and height.

use super::Dashboard;
use crate::error::DashboardError;
use crate::model::{Band, BandId, ColumnCount};
use crate::placement;
use crate::surface::{BandMark, RenderingSurface};

impl<S: RenderingSurface> Dashboard<S> {
    /// Viewing → BandEditing. Returns `false` if bands were already being
    /// edited.
    pub fn enter_band_edit_mode(&mut self) -> Result<bool, DashboardError> {
        if self.drag.is_some() {
            return Err(DashboardError::DragInProgress);
        }
        if !self.edit_mode.enter() {
            return Ok(false);
        }
        for band in &self.bands {
            self.surface.mark_band(band.id(), BandMark::EditCandidate);
        }
        self.surface.set_widget_commands_enabled(false);
        tracing::debug!("Entered band edit mode");
        Ok(true)
    }

    /// BandEditing → Viewing, dropping any selection. Returns `false` if
    /// bands were not being edited.
    pub fn leave_band_edit_mode(&mut self) -> bool {
        if self.edit_mode.selected().is_some() {
            self.surface.hide_column_selector();
        }
        if !self.edit_mode.leave() {
            return false;
        }
        for band in &self.bands {
            self.surface.mark_band(band.id(), BandMark::None);
        }
        self.surface.set_widget_commands_enabled(true);
        tracing::debug!("Left band edit mode");
        true
    }

    /// Selects the band at `index` for editing, deselecting any other.
    pub fn select_band(&mut self, index: usize) -> Result<(), DashboardError> {
        if !self.edit_mode.is_band_editing() {
            return Err(DashboardError::NotInBandEditMode);
        }
        self.check_band_index(index)?;
        let band = &self.bands[index];
        let (id, current) = (band.id(), band.column_count());

        if let Some(previous) = self.edit_mode.select(id)? {
            self.surface.hide_column_selector();
            if previous != id && self.band_index(previous).is_some() {
                self.surface.mark_band(previous, BandMark::EditCandidate);
            }
        }
        self.surface.mark_band(id, BandMark::Selected);
        self.surface.show_column_selector(id, current);
        tracing::debug!("Selected band {}", index);
        Ok(())
    }

    /// Sets the column count of the selected band.
    ///
    /// Shrinking below the band's occupancy moves the trailing widgets into a
    /// new band right after it; the index of that band is returned.
    pub fn set_column_count(
        &mut self,
        count: ColumnCount,
    ) -> Result<Option<usize>, DashboardError> {
        let (id, index) = self.selected_for_edit()?;

        let options = &self.options;
        let next_band_id = &mut self.next_band_id;
        let split = placement::split_band(&mut self.bands, index, count, |columns, widgets| {
            let id = BandId(*next_band_id);
            *next_band_id += 1;
            Band::with_widgets(id, columns, options.default_height, widgets)
        });

        let inserted = split.map(|report| {
            for widget in &report.moved {
                self.surface.destroy_widget(widget);
            }
            self.materialize_band(report.inserted);
            tracing::info!(
                "Band {} split: {} widgets moved to new band {}",
                index,
                report.moved.len(),
                report.inserted
            );
            report.inserted
        });

        self.surface.apply_column_class(id, count);
        self.surface.show_column_selector(id, count);
        self.reposition_band(index);
        self.render_widgets_of_band(index);
        self.emit_changed();
        Ok(inserted)
    }

    /// Resizes the selected band, then re-reads every band's rendered height.
    pub fn resize_selected_band(&mut self, height: u32) -> Result<(), DashboardError> {
        let (id, index) = self.selected_for_edit()?;
        if height == 0 {
            return Err(DashboardError::InvalidHeight);
        }

        self.surface.set_band_height(id, height);
        self.bands[index].set_height(height);
        self.sync_band_heights();
        self.reposition_all_bands();
        self.render_widgets_of_band(index);

        tracing::debug!("Band {} resized to {}px", index, self.bands[index].height());
        self.emit_changed();
        Ok(())
    }

    /// Adopts the heights the surface actually rendered.
    fn sync_band_heights(&mut self) {
        for band in &mut self.bands {
            match self.surface.band_height(band.id()) {
                Some(height) if height > 0 => band.set_height(height),
                _ => {}
            }
        }
    }

    fn selected_for_edit(&self) -> Result<(BandId, usize), DashboardError> {
        let id = self.edit_mode.require_selected()?;
        let index = self.band_index(id).ok_or(DashboardError::NoBandSelected)?;
        Ok((id, index))
    }
}
