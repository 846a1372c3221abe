//! Serialized dashboard documents.
//!
//! A document is an ordered JSON array of band records:
//!
//! ```json
//! [
//!   { "columnCount": 2, "height": 90,
//!     "widgets": [ { "id": "1", "title": "Sales", "renderUrl": "charts/sales" } ] }
//! ]
//! ```
//!
//! Documents are parsed and validated completely before a dashboard discards
//! its current state, so a bad document never leaves a half-loaded dashboard.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DashboardError;
use crate::model::{Band, ColumnCount, Widget};

/// One band in a serialized dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandRecord {
    pub column_count: ColumnCount,
    /// Band height in pixels.
    pub height: u32,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl From<&Band> for BandRecord {
    fn from(band: &Band) -> Self {
        Self {
            column_count: band.column_count(),
            height: band.height(),
            widgets: band.widgets().to_vec(),
        }
    }
}

/// Order-preserving projection of a whole dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardDocument {
    pub bands: Vec<BandRecord>,
}

impl DashboardDocument {
    /// Projects a band list into a document.
    pub fn from_bands(bands: &[Band]) -> Self {
        Self {
            bands: bands.iter().map(BandRecord::from).collect(),
        }
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        let document: DashboardDocument =
            serde_json::from_str(json).map_err(|e| DashboardError::from_json(&e))?;
        document.validate()?;
        Ok(document)
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String, DashboardError> {
        serde_json::to_string(self).map_err(|e| DashboardError::from_json(&e))
    }

    /// Indented JSON encoding, for files meant to be read by people.
    pub fn to_json_pretty(&self) -> Result<String, DashboardError> {
        serde_json::to_string_pretty(self).map_err(|e| DashboardError::from_json(&e))
    }

    /// Checks the constraints the JSON shape alone cannot express.
    ///
    /// Rejects zero heights, bands holding more widgets than columns, and
    /// widget ids used more than once.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut seen = HashSet::new();
        for (index, band) in self.bands.iter().enumerate() {
            if band.height == 0 {
                return Err(malformed(format!("band {index} has zero height")));
            }
            if band.widgets.len() > band.column_count.get() {
                return Err(malformed(format!(
                    "band {index} holds {} widgets but only {} columns",
                    band.widgets.len(),
                    band.column_count
                )));
            }
            for widget in &band.widgets {
                if !seen.insert(&widget.id) {
                    return Err(malformed(format!(
                        "widget id \"{}\" appears more than once",
                        widget.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn widget_count(&self) -> usize {
        self.bands.iter().map(|b| b.widgets.len()).sum()
    }
}

fn malformed(message: String) -> DashboardError {
    DashboardError::MalformedDocument { message }
}
