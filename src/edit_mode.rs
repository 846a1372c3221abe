//! Band edit mode state machine.
//!
//! ```text
//!   Viewing ──enter──▶ BandEditing { selected: None }
//!      ▲                    │ select(b)
//!      │                    ▼
//!      └──────leave──── BandEditing { selected: Some(b) }
//! ```
//!
//! While bands are being edited, widget commands and structural widget
//! operations are disabled; only band selection, column count and height
//! changes are accepted.

use crate::error::DashboardError;
use crate::model::{BandId, ColumnCount};

/// Current interaction mode of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Widgets can be added, moved, deleted and commanded.
    #[default]
    Viewing,
    /// Band layout is being edited; at most one band is selected.
    BandEditing {
        /// The band whose height and column count are editable.
        selected: Option<BandId>,
    },
}

/// Tracks the edit mode and guards transitions.
#[derive(Debug, Clone, Default)]
pub struct EditModeController {
    mode: EditMode,
}

impl EditModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_band_editing(&self) -> bool {
        matches!(self.mode, EditMode::BandEditing { .. })
    }

    /// The selected band, if bands are being edited and one is selected.
    pub fn selected(&self) -> Option<BandId> {
        match self.mode {
            EditMode::BandEditing { selected } => selected,
            EditMode::Viewing => None,
        }
    }

    /// Viewing → BandEditing. Returns `false` if already editing.
    pub fn enter(&mut self) -> bool {
        if self.is_band_editing() {
            return false;
        }
        self.mode = EditMode::BandEditing { selected: None };
        true
    }

    /// BandEditing → Viewing. Returns `false` if not editing.
    pub fn leave(&mut self) -> bool {
        if !self.is_band_editing() {
            return false;
        }
        self.mode = EditMode::Viewing;
        true
    }

    /// Selects a band, returning the previously selected one.
    pub fn select(&mut self, band: BandId) -> Result<Option<BandId>, DashboardError> {
        match &mut self.mode {
            EditMode::BandEditing { selected } => Ok(selected.replace(band)),
            EditMode::Viewing => Err(DashboardError::NotInBandEditMode),
        }
    }

    /// Fails with [`DashboardError::EditModeActive`] unless viewing.
    pub fn ensure_viewing(&self) -> Result<(), DashboardError> {
        if self.is_band_editing() {
            return Err(DashboardError::EditModeActive);
        }
        Ok(())
    }

    /// The selected band, or why band-level commands are not available.
    pub fn require_selected(&self) -> Result<BandId, DashboardError> {
        match self.mode {
            EditMode::BandEditing {
                selected: Some(band),
            } => Ok(band),
            EditMode::BandEditing { selected: None } => Err(DashboardError::NoBandSelected),
            EditMode::Viewing => Err(DashboardError::NotInBandEditMode),
        }
    }
}

/// State of the column-count selector shown inside the selected band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelector {
    /// Band hosting the selector.
    pub band: BandId,
    /// The band's current column count; its button is disabled.
    pub current: ColumnCount,
}

impl ColumnSelector {
    /// Each selectable count with whether its button is enabled.
    pub fn choices(&self) -> [(ColumnCount, bool); 3] {
        ColumnCount::ALL.map(|count| (count, count != self.current))
    }
}
