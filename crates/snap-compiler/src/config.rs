//! Compiler configuration.

use serde::Deserialize;
use snap_bytecode::MAX_PAYLOAD_INDEX;

/// Per-table entry ceiling. A table may hold at most `MAX_PAYLOAD_INDEX`
/// entries, so the highest index ever packed is one below it.
pub const PAYLOAD_LIMIT: usize = MAX_PAYLOAD_INDEX as usize;

/// How elements end in the instruction stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseMode {
    /// Void elements end with `self_closing_tag`, all others with
    /// `static_tag_close`.
    #[default]
    VoidOpcode,
    /// Every element ends with `static_tag_close`.
    PlainClose,
}

/// Configuration for one compile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub(crate) close_mode: CloseMode,
    /// Substituted for empty or whitespace tag names.
    pub(crate) placeholder_tag: String,
    /// Entries allowed in any single payload table.
    pub(crate) max_payload_entries: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            close_mode: CloseMode::default(),
            placeholder_tag: "div".to_string(),
            max_payload_entries: PAYLOAD_LIMIT,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn close_mode(mut self, value: CloseMode) -> Self {
        self.close_mode = value;
        self
    }

    pub fn placeholder_tag(mut self, value: impl Into<String>) -> Self {
        self.placeholder_tag = value.into();
        self
    }

    /// Set the per-table capacity. Values above the 24-bit ceiling are
    /// clamped to it.
    pub fn max_payload_entries(mut self, value: usize) -> Self {
        self.max_payload_entries = value.min(PAYLOAD_LIMIT);
        self
    }

    /// Effective per-table capacity.
    pub fn payload_limit(&self) -> usize {
        self.max_payload_entries.min(PAYLOAD_LIMIT)
    }

    pub fn get_close_mode(&self) -> CloseMode {
        self.close_mode
    }

    /// Tag used in place of an empty name. Falls back to `div` when the
    /// configured value is itself blank.
    pub fn placeholder(&self) -> &str {
        let tag = self.placeholder_tag.trim();
        if tag.is_empty() { "div" } else { tag }
    }
}
