//! Terminal styling for template dumps.
//!
//! Styles are keyed by what the text is, not by hue, so dump code never
//! names a color directly.

/// ANSI escape per dump role. All empty when coloring is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Section headings and opcode mnemonics.
    pub mnemonic: &'static str,
    /// Static strings from the template.
    pub literal: &'static str,
    /// `{field}` bindings.
    pub field: &'static str,
    /// Instruction numbers.
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        mnemonic: "\x1b[34m",
        literal: "\x1b[32m",
        field: "\x1b[33m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        mnemonic: "",
        literal: "",
        field: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Self::OFF
    }

    pub fn paint_mnemonic(&self, text: &str) -> String {
        format!("{}{text}{}", self.mnemonic, self.reset)
    }

    /// Debug-quoted, so control characters and quotes stay visible.
    pub fn paint_literal(&self, text: &str) -> String {
        format!("{}{text:?}{}", self.literal, self.reset)
    }

    /// Wrapped in braces, as written in the template.
    pub fn paint_field(&self, name: &str) -> String {
        format!("{}{{{name}}}{}", self.field, self.reset)
    }

    pub fn paint_dim(&self, text: &str) -> String {
        format!("{}{text}{}", self.dim, self.reset)
    }
}
