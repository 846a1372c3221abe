//! Drag and drop of widgets between bands.
//!
//! A drag runs in three phases: [`Dashboard::begin_drag`] offers slots,
//! [`Dashboard::hover_slot`] tracks the pointer, and [`Dashboard::end_drag`]
//! commits or abandons. Nothing in the band list changes before the commit,
//! so an abandoned drag is always a no-op on the model.

use super::Dashboard;
use crate::error::DashboardError;
use crate::layout;
use crate::model::{Band, BandId, WidgetId};
use crate::placement::{self, DragSession, DropOutcome, DropResolution, DropTarget, Slot, SlotTarget};
use crate::surface::RenderingSurface;

impl<S: RenderingSurface> Dashboard<S> {
    /// Picks a widget up and shows the slots it can be dropped on.
    pub fn begin_drag(&mut self, id: &WidgetId) -> Result<Vec<Slot>, DashboardError> {
        self.ensure_structural()?;
        let (origin, _) = self.locate(id)?;

        let slots = placement::candidate_slots(&self.bands, origin);
        for slot in &slots {
            let left = self.slot_offset(slot);
            self.surface.show_slot(slot, left);
        }

        tracing::debug!("Dragging widget \"{}\": {} slots offered", id, slots.len());
        self.drag = Some(DragSession::new(
            id.clone(),
            self.bands[origin].id(),
            slots.clone(),
        ));
        Ok(slots)
    }

    /// Records the slot under the pointer, or none.
    pub fn hover_slot(&mut self, slot: Option<usize>) -> Result<(), DashboardError> {
        let session = self.drag.as_mut().ok_or(DashboardError::NoActiveDrag)?;
        session.hover(slot)?;
        self.surface.highlight_slot(slot);
        Ok(())
    }

    /// Finishes the drag. `None` means the widget was dropped outside any
    /// slot or band.
    ///
    /// The drag is closed even when the target is rejected.
    pub fn end_drag(&mut self, target: Option<DropTarget>) -> Result<DropOutcome, DashboardError> {
        let session = self.drag.take().ok_or(DashboardError::NoActiveDrag)?;
        self.surface.highlight_slot(None);
        self.surface.clear_slots();

        let resolution = match session.resolve(&self.bands, target) {
            Ok(resolution) => resolution,
            Err(e) => {
                self.revert(&session);
                return Err(e);
            }
        };

        let destination = match resolution {
            DropResolution::Commit(destination) => destination,
            DropResolution::Unchanged => {
                tracing::debug!("Widget \"{}\" dropped on its own position", session.widget());
                self.revert(&session);
                return Ok(DropOutcome::Unchanged);
            }
            DropResolution::Abandon => {
                tracing::debug!("Drag of widget \"{}\" abandoned", session.widget());
                self.revert(&session);
                return Ok(DropOutcome::Abandoned);
            }
        };
        let Some(from) = placement::locate(&self.bands, session.widget()) else {
            return Err(DashboardError::UnknownWidgetReference {
                id: session.widget().clone(),
            });
        };

        let options = &self.options;
        let next_band_id = &mut self.next_band_id;
        let report = placement::move_widget(&mut self.bands, from, destination, || {
            let id = BandId(*next_band_id);
            *next_band_id += 1;
            Band::new(id, options.default_column_count, options.default_height)
        });

        self.surface.destroy_widget(&report.widget.id);
        self.destroy_bands(&report.removed_bands);
        if report.created_band {
            self.materialize_band(report.destination_index);
        } else {
            self.materialize_widget(report.destination, &report.widget);
            self.reposition_band(report.destination_index);
        }
        if let Some(origin) = self.band_index(report.origin) {
            self.reposition_band(origin);
        }

        tracing::info!(
            "Moved widget \"{}\" to band {}",
            report.widget.id,
            report.destination_index
        );
        self.emit_changed();
        Ok(DropOutcome::Moved {
            band: report.destination_index,
        })
    }

    /// Puts the dragged widget's band back in place visually.
    fn revert(&mut self, session: &DragSession) {
        if let Some(index) = self.band_index(session.origin()) {
            self.reposition_band(index);
        }
    }

    /// Horizontal offset of a slot: after the last widget of its band.
    fn slot_offset(&self, slot: &Slot) -> u32 {
        let SlotTarget::Band(id) = slot.target else {
            return 0;
        };
        let Some(band) = self.band_index(id).map(|i| &self.bands[i]) else {
            return 0;
        };
        let widths: Vec<u32> = band
            .widgets()
            .iter()
            .map(|w| self.surface.widget_width(&w.id).unwrap_or(0))
            .collect();
        layout::trailing_slot_offset(&widths, self.options.inter_widget_spacing)
    }
}
