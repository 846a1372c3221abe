//! Widget records and their identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque widget identifier, unique across a dashboard.
///
/// Documents written by other hosts may carry numeric ids; they are accepted
/// and compared by their decimal text, so `1` and `"1"` name the same widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for WidgetId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for WidgetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => WidgetId(s),
            RawId::Signed(n) => WidgetId(n.to_string()),
            RawId::Unsigned(n) => WidgetId(n.to_string()),
        })
    }
}

/// A placed content panel.
///
/// Only `title` is mutable after creation (hosts may rename a widget). Each
/// widget is owned by exactly one band at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Dashboard-wide unique identifier.
    pub id: WidgetId,
    /// Caption displayed in the widget header.
    pub title: String,
    /// Content source, relative to the configured base URL.
    pub render_url: String,
}

impl Widget {
    /// Creates a widget record.
    pub fn new(
        id: impl Into<WidgetId>,
        title: impl Into<String>,
        render_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            render_url: render_url.into(),
        }
    }

    /// URL the Rendering Surface loads the widget body from.
    ///
    /// Formed as `<base><renderUrl>/?idWidget=<id>`.
    pub fn content_url(&self, base_url: &str) -> String {
        format!("{}{}/?idWidget={}", base_url, self.render_url, self.id)
    }
}
