//! Horizontal placement of widgets inside a band.
//!
//! Positions are never stored in the model. They are recomputed from the
//! widgets' measured widths every time a band changes structurally, so the
//! visual order always equals the array order.

/// Computes the left offset of each widget in a band.
///
/// The first widget sits at `0`; every following widget starts `spacing`
/// pixels after the right edge of its predecessor.
pub fn widget_offsets(widths: &[u32], spacing: u32) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut next = 0u32;
    for width in widths {
        offsets.push(next);
        next = next.saturating_add(*width).saturating_add(spacing);
    }
    offsets
}

/// Left offset of the trailing drop slot of a band.
///
/// An empty band hosts its slot at the origin.
pub fn trailing_slot_offset(widths: &[u32], spacing: u32) -> u32 {
    widget_offsets(widths, spacing)
        .last()
        .zip(widths.last())
        .map(|(left, width)| left.saturating_add(*width).saturating_add(spacing))
        .unwrap_or(0)
}
