//! Host-supplied handlers for widget caption commands.
//!
//! The dashboard asks the host before deleting a widget, lets it edit a
//! widget's attributes and shows widget information through it. Hosts that
//! supply nothing get [`DefaultActions`], which prompts on the terminal.

use futures::future::{self, FutureExt, LocalBoxFuture};
use std::io::{self, BufRead, Write};

use crate::model::{Widget, WidgetId};

/// Snapshot of a widget and where it sits, handed to action callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRef {
    pub id: WidgetId,
    pub title: String,
    pub render_url: String,
    /// Index of the band holding the widget.
    pub band_index: usize,
    /// Position of the widget inside its band.
    pub index_in_band: usize,
}

impl WidgetRef {
    pub(crate) fn new(widget: &Widget, band_index: usize, index_in_band: usize) -> Self {
        Self {
            id: widget.id.clone(),
            title: widget.title.clone(),
            render_url: widget.render_url.clone(),
            band_index,
            index_in_band,
        }
    }
}

/// Callbacks for the widget caption buttons.
pub trait WidgetActions {
    /// Resolves to `true` if the widget may be removed.
    fn confirm_delete(&self, widget: &WidgetRef) -> LocalBoxFuture<'static, bool>;

    /// Edits the widget's attributes; returns `true` if anything changed, in
    /// which case the widget is refreshed.
    fn edit_widget(&self, _widget: &WidgetRef) -> bool {
        false
    }

    /// Displays information about the widget. Nothing is expected back.
    fn display_info(&self, widget: &WidgetRef);
}

/// Terminal-based fallbacks: a yes/no prompt on stderr for deletion and a
/// plain listing on stdout for info. Editing reports "no change".
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultActions;

impl WidgetActions for DefaultActions {
    fn confirm_delete(&self, widget: &WidgetRef) -> LocalBoxFuture<'static, bool> {
        let question = format!("Remove Widget \"{}\" ?", widget.title);
        let stdin = io::stdin();
        let answer = prompt_yes_no(&question, &mut stdin.lock(), &mut io::stderr());
        future::ready(answer).boxed_local()
    }

    fn display_info(&self, widget: &WidgetRef) {
        println!("{}", info_text(widget));
    }
}

/// Text shown by the default info action.
pub fn info_text(widget: &WidgetRef) -> String {
    format!(
        "Widget Info:\n\nId: \"{}\"\nTitle: \"{}\"\nRenderUrl: \"{}\"",
        widget.id, widget.title, widget.render_url
    )
}

/// Asks a yes/no question; anything but `y`/`yes` (any case) means no.
fn prompt_yes_no(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{question} [y/N] ").and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!("Failed to read delete confirmation: {}", e);
            false
        }
    }
}
