//! Human-readable rendering of tool outputs.
//!
//! Every tool output implements [`TextFormat`]. The default rendering is the
//! pretty-printed JSON of the value; outputs override [`TextFormat::fmt_text`]
//! for something friendlier.

use serde_json::Value;

/// Options controlling text rendering.
#[derive(Clone, Debug, Default)]
pub struct TextOptions {
    /// Maximum number of items to list from collections.
    pub max_items: Option<usize>,
}

impl TextOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits listed items.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }
}

/// Text rendering for tool outputs.
pub trait TextFormat: serde::Serialize {
    /// Render as text. Defaults to pretty JSON.
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        serde_json::to_value(self)
            .map(|v| fallback_text_from_json(&v))
            .unwrap_or_default()
    }
}

/// Pretty JSON, or compact JSON if pretty-printing fails.
pub fn fallback_text_from_json(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}
