//! Error types for rejected dashboard operations.
//!
//! None of these are fatal: a rejected operation leaves the dashboard exactly
//! as it was and emits no `changed` notification. Callers that do not care
//! about the reason can simply ignore the returned `Err`.

use thiserror::Error;

use crate::model::WidgetId;

/// Reasons a dashboard operation was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// A widget with the same id is already placed somewhere on the dashboard.
    #[error("The dashboard already contains a widget with id \"{id}\"")]
    DuplicateWidgetId {
        /// The id that collided.
        id: WidgetId,
    },

    /// The operation addressed a band that does not exist.
    #[error("There's no band with index {index} in the dashboard ({band_count} bands)")]
    InvalidBandIndex {
        /// Requested zero-based band index.
        index: usize,
        /// Number of bands at the time of the request.
        band_count: usize,
    },

    /// A structural widget command was issued while bands are being edited.
    #[error("Command rejected: the dashboard is in band edit mode")]
    EditModeActive,

    /// A band-level command was issued outside band edit mode.
    #[error("Command rejected: the dashboard is not in band edit mode")]
    NotInBandEditMode,

    /// A column-count or height command was issued with no band selected.
    #[error("No band is selected for editing")]
    NoBandSelected,

    /// The referenced widget id is not present in any band.
    #[error("Unknown widget \"{id}\"")]
    UnknownWidgetReference {
        /// The id that could not be found.
        id: WidgetId,
    },

    /// A serialized document could not be turned into a dashboard.
    #[error("Malformed dashboard document: {message}")]
    MalformedDocument {
        /// Human-readable description of the problem.
        message: String,
    },

    /// A column count outside `1..=3` was requested.
    #[error("Invalid column count {value}: bands hold between 1 and 3 columns")]
    InvalidColumnCount {
        /// The rejected value.
        value: u64,
    },

    /// A band height of zero pixels was requested.
    #[error("Invalid band height: must be a positive number of pixels")]
    InvalidHeight,

    /// A structural command (or a second drag) was issued while a drag is open.
    #[error("Command rejected: a widget drag is in progress")]
    DragInProgress,

    /// A hover or drop arrived with no drag open.
    #[error("No widget drag is in progress")]
    NoActiveDrag,

    /// A drop referenced a slot index that was never offered.
    #[error("Unknown drop slot {index}")]
    UnknownSlot {
        /// The rejected slot index.
        index: usize,
    },
}

impl DashboardError {
    /// Builds a [`DashboardError::MalformedDocument`] from a JSON parse failure.
    ///
    /// serde_json already appends `at line L column C` to its messages.
    pub fn from_json(err: &serde_json::Error) -> Self {
        DashboardError::MalformedDocument {
            message: err.to_string(),
        }
    }
}
