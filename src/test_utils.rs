//! Shared test utilities: a Rendering Surface that records what it is told
//! and action callbacks with scripted answers.

#![cfg(test)]

use futures::future::{self, FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::actions::{WidgetActions, WidgetRef};
use crate::model::{BandId, ColumnCount, Widget, WidgetId};
use crate::placement::Slot;
use crate::surface::{BandMark, RenderingSurface};

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    CreateBand(BandId, usize, u32),
    DestroyBand(BandId),
    SetBandHeight(BandId, u32),
    ColumnClass(BandId, ColumnCount),
    CreateWidget(BandId, WidgetId),
    DestroyWidget(WidgetId),
    PositionWidget(WidgetId, u32),
    SetTitle(WidgetId, String),
    Render(WidgetId, String),
    CommandsEnabled(bool),
    Mark(BandId, BandMark),
    ShowSelector(BandId, ColumnCount),
    HideSelector,
    ShowSlot(Slot, u32),
    Highlight(Option<usize>),
    ClearSlots,
}

/// Records every call and answers measurements from configurable tables.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    /// Width reported for every widget without an entry in `widths`.
    pub default_width: Option<u32>,
    pub widths: HashMap<WidgetId, u32>,
    /// Height reported for a band; `None` when absent.
    pub heights: HashMap<BandId, u32>,
    /// Rendered heights snap to multiples of this, like a layout grid.
    pub height_grid: Option<u32>,
}

impl RecordingSurface {
    pub fn with_width(width: u32) -> Self {
        Self {
            default_width: Some(width),
            ..Self::default()
        }
    }

    /// Clears the recorded calls, keeping the measurement tables.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, matches: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| matches(c)).count()
    }

    /// Last offset each widget was positioned at.
    pub fn last_position(&self, widget: &str) -> Option<u32> {
        let id = WidgetId::from(widget);
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::PositionWidget(w, left) if *w == id => Some(*left),
            _ => None,
        })
    }

    /// URLs rendered for a widget, in order.
    pub fn renders_of(&self, widget: &str) -> Vec<String> {
        let id = WidgetId::from(widget);
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Render(w, url) if *w == id => Some(url.clone()),
                _ => None,
            })
            .collect()
    }
}

impl RenderingSurface for RecordingSurface {
    fn create_band(&mut self, band: BandId, position: usize, height: u32) {
        self.heights.insert(band, height);
        self.calls.push(SurfaceCall::CreateBand(band, position, height));
    }

    fn destroy_band(&mut self, band: BandId) {
        self.heights.remove(&band);
        self.calls.push(SurfaceCall::DestroyBand(band));
    }

    fn set_band_height(&mut self, band: BandId, height: u32) {
        let rendered = match self.height_grid {
            Some(grid) if grid > 0 => height.div_ceil(grid) * grid,
            _ => height,
        };
        self.heights.insert(band, rendered);
        self.calls.push(SurfaceCall::SetBandHeight(band, height));
    }

    fn band_height(&self, band: BandId) -> Option<u32> {
        self.heights.get(&band).copied()
    }

    fn apply_column_class(&mut self, band: BandId, columns: ColumnCount) {
        self.calls.push(SurfaceCall::ColumnClass(band, columns));
    }

    fn create_widget(&mut self, band: BandId, widget: &Widget) {
        self.calls
            .push(SurfaceCall::CreateWidget(band, widget.id.clone()));
    }

    fn destroy_widget(&mut self, widget: &WidgetId) {
        self.calls.push(SurfaceCall::DestroyWidget(widget.clone()));
    }

    fn widget_width(&self, widget: &WidgetId) -> Option<u32> {
        self.widths.get(widget).copied().or(self.default_width)
    }

    fn position_widget(&mut self, widget: &WidgetId, left: u32) {
        self.calls
            .push(SurfaceCall::PositionWidget(widget.clone(), left));
    }

    fn set_widget_title(&mut self, widget: &WidgetId, title: &str) {
        self.calls
            .push(SurfaceCall::SetTitle(widget.clone(), title.to_string()));
    }

    fn render_widget(&mut self, widget: &WidgetId, url: &str) {
        self.calls
            .push(SurfaceCall::Render(widget.clone(), url.to_string()));
    }

    fn set_widget_commands_enabled(&mut self, enabled: bool) {
        self.calls.push(SurfaceCall::CommandsEnabled(enabled));
    }

    fn mark_band(&mut self, band: BandId, mark: BandMark) {
        self.calls.push(SurfaceCall::Mark(band, mark));
    }

    fn show_column_selector(&mut self, band: BandId, current: ColumnCount) {
        self.calls.push(SurfaceCall::ShowSelector(band, current));
    }

    fn hide_column_selector(&mut self) {
        self.calls.push(SurfaceCall::HideSelector);
    }

    fn show_slot(&mut self, slot: &Slot, left: u32) {
        self.calls.push(SurfaceCall::ShowSlot(*slot, left));
    }

    fn highlight_slot(&mut self, slot: Option<usize>) {
        self.calls.push(SurfaceCall::Highlight(slot));
    }

    fn clear_slots(&mut self) {
        self.calls.push(SurfaceCall::ClearSlots);
    }
}

/// What a [`ScriptedActions`] was asked, shared with the test.
#[derive(Debug, Default)]
pub struct ActionLog {
    pub confirmed: Vec<WidgetId>,
    pub edited: Vec<WidgetId>,
    pub shown: Vec<WidgetRef>,
}

/// Action callbacks with fixed answers.
#[derive(Debug, Clone)]
pub struct ScriptedActions {
    pub confirm: bool,
    pub edit_changes: bool,
    pub log: Rc<RefCell<ActionLog>>,
}

impl ScriptedActions {
    pub fn new(confirm: bool, edit_changes: bool) -> Self {
        Self {
            confirm,
            edit_changes,
            log: Rc::new(RefCell::new(ActionLog::default())),
        }
    }
}

impl WidgetActions for ScriptedActions {
    fn confirm_delete(&self, widget: &WidgetRef) -> LocalBoxFuture<'static, bool> {
        self.log.borrow_mut().confirmed.push(widget.id.clone());
        future::ready(self.confirm).boxed_local()
    }

    fn edit_widget(&self, widget: &WidgetRef) -> bool {
        self.log.borrow_mut().edited.push(widget.id.clone());
        self.edit_changes
    }

    fn display_info(&self, widget: &WidgetRef) {
        self.log.borrow_mut().shown.push(widget.clone());
    }
}
