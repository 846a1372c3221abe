//! Bands: capacity-constrained rows of widgets.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{Widget, WidgetId};
use crate::error::DashboardError;

/// Number of columns a band offers, always in `1..=3`.
///
/// Deserializes from a number or a numeric string (`"2"`); always serializes
/// as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct ColumnCount(u8);

impl ColumnCount {
    /// A single full-width column.
    pub const ONE: ColumnCount = ColumnCount(1);
    /// Two columns.
    pub const TWO: ColumnCount = ColumnCount(2);
    /// Three columns, the maximum a band supports.
    pub const THREE: ColumnCount = ColumnCount(3);
    /// Largest supported column count.
    pub const MAX: ColumnCount = ColumnCount::THREE;

    /// All valid column counts in ascending order.
    pub const ALL: [ColumnCount; 3] = [ColumnCount::ONE, ColumnCount::TWO, ColumnCount::THREE];

    /// Validates a raw column count.
    pub fn new(value: u64) -> Result<Self, DashboardError> {
        match value {
            1..=3 => Ok(ColumnCount(value as u8)),
            _ => Err(DashboardError::InvalidColumnCount { value }),
        }
    }

    /// Returns the count as a plain integer.
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u64> for ColumnCount {
    type Error = DashboardError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        ColumnCount::new(value)
    }
}

impl<'de> Deserialize<'de> for ColumnCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCount {
            Number(u64),
            Text(String),
        }

        let value = match RawCount::deserialize(deserializer)? {
            RawCount::Number(n) => n,
            RawCount::Text(s) => s.trim().parse::<u64>().map_err(|_| {
                de::Error::custom(format!("column count must be a number, got {s:?}"))
            })?,
        };
        ColumnCount::new(value).map_err(de::Error::custom)
    }
}

impl From<ColumnCount> for u8 {
    fn from(count: ColumnCount) -> Self {
        count.0
    }
}

impl fmt::Display for ColumnCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a band for the lifetime of a dashboard instance.
///
/// Band indices shift when bands are inserted or purged; the Rendering Surface
/// addresses bands by this id instead. It is never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BandId(pub(crate) u64);

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "band-{}", self.0)
    }
}

/// A horizontal row of widgets.
///
/// Holds at most `column_count` widgets whenever a dashboard operation is not
/// in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    id: BandId,
    column_count: ColumnCount,
    height: u32,
    widgets: Vec<Widget>,
}

impl Band {
    pub(crate) fn new(id: BandId, column_count: ColumnCount, height: u32) -> Self {
        Self {
            id,
            column_count,
            height,
            widgets: Vec::new(),
        }
    }

    pub(crate) fn with_widgets(
        id: BandId,
        column_count: ColumnCount,
        height: u32,
        widgets: Vec<Widget>,
    ) -> Self {
        Self {
            id,
            column_count,
            height,
            widgets,
        }
    }

    pub fn id(&self) -> BandId {
        self.id
    }

    pub fn column_count(&self) -> ColumnCount {
        self.column_count
    }

    /// Band height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Widgets in left-to-right order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Returns `true` if another widget fits without exceeding the column count.
    pub fn has_room(&self) -> bool {
        self.widgets.len() < self.column_count.get()
    }

    /// Index of the widget with the given id inside this band.
    pub fn position_of(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| &w.id == id)
    }

    pub(crate) fn set_column_count(&mut self, column_count: ColumnCount) {
        self.column_count = column_count;
    }

    pub(crate) fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub(crate) fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Widget {
        self.widgets.remove(index)
    }

    /// Splits off every widget past the first `keep`, preserving their order.
    pub(crate) fn split_off(&mut self, keep: usize) -> Vec<Widget> {
        if keep >= self.widgets.len() {
            return Vec::new();
        }
        self.widgets.split_off(keep)
    }

    pub(crate) fn widget_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.widgets.get_mut(index)
    }
}
