//! Capacity-constrained placement of widgets into bands.
//!
//! The functions here operate on the band list alone and leave it satisfying
//! the dashboard invariants when they return:
//!
//! - every band holds at most `column_count` widgets;
//! - no band is empty unless it is the only band;
//! - band order and in-band widget order are preserved, except that a moved
//!   widget always lands at the trailing end of its destination band.
//!
//! Keeping the Rendering Surface in sync is the dashboard's job; each
//! operation returns a report describing what changed structurally.

use crate::error::DashboardError;
use crate::model::{Band, BandId, ColumnCount, Widget, WidgetId};

/// Where a drop slot would put the dragged widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotTarget {
    /// Trailing position of an existing band.
    Band(BandId),
    /// Sole position of a fresh band appended at the end of the dashboard.
    NewBand,
}

/// A candidate drop position offered while a widget is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Index among the slots offered for the current drag.
    pub index: usize,
    pub target: SlotTarget,
}

/// What the pointer library reports the widget was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// One of the offered slots, by [`Slot::index`].
    Slot(usize),
    /// A band element hit directly, outside any slot.
    Band(BandId),
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The widget now sits at the trailing end of the band at this index.
    Moved { band: usize },
    /// Dropped onto its own current position; nothing changed.
    Unchanged,
    /// Dropped outside any valid slot; the widget reverts.
    Abandoned,
}

/// Bookkeeping for a drag between its start and its drop.
#[derive(Debug, Clone)]
pub struct DragSession {
    widget: WidgetId,
    origin: BandId,
    slots: Vec<Slot>,
    hovered: Option<usize>,
}

/// Destination of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Destination {
    Existing(usize),
    NewBand,
}

/// How a drop resolves against the current band list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DropResolution {
    Commit(Destination),
    Unchanged,
    Abandon,
}

impl DragSession {
    pub(crate) fn new(widget: WidgetId, origin: BandId, slots: Vec<Slot>) -> Self {
        Self {
            widget,
            origin,
            slots,
            hovered: None,
        }
    }

    /// The widget being dragged.
    pub fn widget(&self) -> &WidgetId {
        &self.widget
    }

    /// The band the widget was picked up from.
    pub fn origin(&self) -> BandId {
        self.origin
    }

    /// Slots offered when the drag started.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot currently under the pointer, if any.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub(crate) fn hover(&mut self, slot: Option<usize>) -> Result<(), DashboardError> {
        if let Some(index) = slot {
            self.slot(index)?;
        }
        self.hovered = slot;
        Ok(())
    }

    fn slot(&self, index: usize) -> Result<&Slot, DashboardError> {
        self.slots
            .iter()
            .find(|s| s.index == index)
            .ok_or(DashboardError::UnknownSlot { index })
    }

    /// Decides what a drop means for the band list as it is now.
    pub(crate) fn resolve(
        &self,
        bands: &[Band],
        target: Option<DropTarget>,
    ) -> Result<DropResolution, DashboardError> {
        let Some(target) = target else {
            return Ok(DropResolution::Abandon);
        };
        let band_index = |id: BandId| bands.iter().position(|b| b.id() == id);

        match target {
            DropTarget::Slot(index) => Ok(match self.slot(index)?.target {
                SlotTarget::NewBand => DropResolution::Commit(Destination::NewBand),
                SlotTarget::Band(id) => match band_index(id) {
                    Some(i) => DropResolution::Commit(Destination::Existing(i)),
                    None => DropResolution::Abandon,
                },
            }),
            DropTarget::Band(id) if id == self.origin => {
                let Some(i) = band_index(id) else {
                    return Ok(DropResolution::Abandon);
                };
                let band = &bands[i];
                match band.position_of(&self.widget) {
                    Some(pos) if pos + 1 == band.len() => Ok(DropResolution::Unchanged),
                    Some(_) => Ok(DropResolution::Commit(Destination::Existing(i))),
                    None => Ok(DropResolution::Abandon),
                }
            }
            DropTarget::Band(id) => Ok(match band_index(id) {
                Some(i) if bands[i].has_room() => {
                    DropResolution::Commit(Destination::Existing(i))
                }
                _ => DropResolution::Abandon,
            }),
        }
    }
}

/// Finds a widget: `(band index, index within band)`.
pub fn locate(bands: &[Band], id: &WidgetId) -> Option<(usize, usize)> {
    bands
        .iter()
        .enumerate()
        .find_map(|(b, band)| band.position_of(id).map(|i| (b, i)))
}

/// Index of the first band, in order, with spare capacity.
pub fn first_band_with_room(bands: &[Band]) -> Option<usize> {
    bands.iter().position(Band::has_room)
}

/// Computes the drop slots for a widget picked up from band `origin`.
///
/// Every other band with spare capacity offers a trailing slot. A fresh band
/// at the end is offered too, unless the widget is the sole occupant of the
/// last band (moving it there would change nothing).
pub fn candidate_slots(bands: &[Band], origin: usize) -> Vec<Slot> {
    let mut slots: Vec<Slot> = bands
        .iter()
        .enumerate()
        .filter(|(i, band)| *i != origin && band.has_room())
        .map(|(_, band)| SlotTarget::Band(band.id()))
        .enumerate()
        .map(|(index, target)| Slot { index, target })
        .collect();

    let sole_in_last_band = origin + 1 == bands.len() && bands[origin].len() == 1;
    if !sole_in_last_band {
        slots.push(Slot {
            index: slots.len(),
            target: SlotTarget::NewBand,
        });
    }
    slots
}

/// Outcome of [`place_widget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Band index the widget was appended to.
    pub band: usize,
    /// Whether a new band had to be appended.
    pub created_band: bool,
}

/// Appends `widget` to the first band with room, or to a new trailing band.
pub fn place_widget(
    bands: &mut Vec<Band>,
    widget: Widget,
    new_band: impl FnOnce() -> Band,
) -> Placement {
    match first_band_with_room(bands) {
        Some(band) => {
            bands[band].push(widget);
            Placement {
                band,
                created_band: false,
            }
        }
        None => {
            let mut band = new_band();
            band.push(widget);
            bands.push(band);
            Placement {
                band: bands.len() - 1,
                created_band: true,
            }
        }
    }
}

/// Outcome of [`move_widget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The moved widget, as it now sits in its destination band.
    pub widget: Widget,
    /// Band the widget left; absent from the list if it was purged.
    pub origin: BandId,
    /// Band the widget now occupies.
    pub destination: BandId,
    /// Current index of the destination band.
    pub destination_index: usize,
    /// Set when the destination band was appended by this move.
    pub created_band: bool,
    /// Bands removed because the move left them empty.
    pub removed_bands: Vec<BandId>,
}

/// Moves the widget at `from` to the trailing end of `destination`, then
/// purges bands the move left empty.
pub(crate) fn move_widget(
    bands: &mut Vec<Band>,
    from: (usize, usize),
    destination: Destination,
    new_band: impl FnOnce() -> Band,
) -> MoveReport {
    let (from_band, from_index) = from;
    let origin = bands[from_band].id();
    let widget = bands[from_band].remove(from_index);

    let (to_band, created_band) = match destination {
        Destination::Existing(i) => (i, false),
        Destination::NewBand => {
            bands.push(new_band());
            (bands.len() - 1, true)
        }
    };
    bands[to_band].push(widget.clone());
    let destination = bands[to_band].id();

    let removed_bands = purge_empty_bands(bands);
    let destination_index = bands
        .iter()
        .position(|b| b.id() == destination)
        .unwrap_or(to_band);

    MoveReport {
        widget,
        origin,
        destination,
        destination_index,
        created_band,
        removed_bands,
    }
}

/// Outcome of [`split_band`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Index of the band inserted right after the shrunk band.
    pub inserted: usize,
    /// Widgets that moved into the inserted band, in order.
    pub moved: Vec<WidgetId>,
}

/// Changes the column count of band `index`, splitting off the widgets that
/// no longer fit.
///
/// When `column_count` is below the band's occupancy, the trailing widgets
/// move, in their original order, into a new band inserted right after it.
/// The new band gets the maximum column count so it can always hold the
/// overflow.
pub fn split_band(
    bands: &mut Vec<Band>,
    index: usize,
    column_count: ColumnCount,
    new_band: impl FnOnce(ColumnCount, Vec<Widget>) -> Band,
) -> Option<SplitReport> {
    let exceeding = bands[index].split_off(column_count.get());
    bands[index].set_column_count(column_count);
    if exceeding.is_empty() {
        return None;
    }

    let moved = exceeding.iter().map(|w| w.id.clone()).collect();
    bands.insert(index + 1, new_band(ColumnCount::MAX, exceeding));
    Some(SplitReport {
        inserted: index + 1,
        moved,
    })
}

/// Removes empty bands, always keeping at least one band.
///
/// Returns the ids of the removed bands in their former order.
pub fn purge_empty_bands(bands: &mut Vec<Band>) -> Vec<BandId> {
    let mut removed = Vec::new();
    let mut i = 0;
    while i < bands.len() && bands.len() > 1 {
        if bands[i].is_empty() {
            removed.push(bands.remove(i).id());
        } else {
            i += 1;
        }
    }
    removed
}
