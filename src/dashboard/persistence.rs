//! Document projection and loading.

use super::Dashboard;
use crate::document::{BandRecord, DashboardDocument};
use crate::error::DashboardError;
use crate::model::Band;
use crate::surface::RenderingSurface;

impl<S: RenderingSurface> Dashboard<S> {
    /// Projects the dashboard into a document. No side effects.
    pub fn as_document(&self) -> DashboardDocument {
        DashboardDocument::from_bands(&self.bands)
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        self.as_document().to_json()
    }

    /// Replaces the whole dashboard with the content of `document`.
    ///
    /// The document is validated before anything is discarded. Empty band
    /// records are skipped unless every record is empty, in which case the
    /// first one is kept as the sole band. Band indices after a load can
    /// therefore be lower than the record positions in `document`; a band
    /// never sits empty next to other bands.
    pub fn load_document(&mut self, document: &DashboardDocument) -> Result<(), DashboardError> {
        self.ensure_structural()?;
        if let Err(e) = document.validate() {
            tracing::warn!("Refusing to load dashboard: {}", e);
            return Err(e);
        }

        let records = kept_records(document);
        self.discard_bands();
        for record in records {
            let id = self.allocate_band_id();
            self.bands
                .push(Band::new(id, record.column_count, record.height));
            let index = self.bands.len() - 1;
            self.materialize_band(index);
            for widget in &record.widgets {
                self.append_to_band(index, widget.clone());
            }
        }
        if self.bands.is_empty() {
            self.append_default_band();
        }

        tracing::info!(
            "Loaded dashboard: {} bands, {} widgets",
            self.bands.len(),
            self.widget_count()
        );
        self.emit_changed();
        Ok(())
    }

    /// Parses, validates and loads a JSON document.
    pub fn load_json(&mut self, json: &str) -> Result<(), DashboardError> {
        let document = DashboardDocument::from_json(json).map_err(|e| {
            tracing::warn!("Malformed dashboard document: {}", e);
            e
        })?;
        self.load_document(&document)
    }
}

fn kept_records(document: &DashboardDocument) -> Vec<&BandRecord> {
    let occupied: Vec<&BandRecord> = document
        .bands
        .iter()
        .filter(|r| !r.widgets.is_empty())
        .collect();
    let skipped = document.bands.len() - occupied.len();

    if occupied.is_empty() {
        return document.bands.iter().take(1).collect();
    }
    if skipped > 0 {
        tracing::warn!("Skipped {} empty bands in dashboard document", skipped);
    }
    occupied
}
