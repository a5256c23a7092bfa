//! Resolved inline formatting flags.

use serde::{Deserialize, Serialize};

/// The set of inline formatting attributes a text run can carry.
///
/// Flags are merged top-down while walking a document tree: a child starts
/// from a clone of its parent's resolved flags and may add or override, never
/// subtract. The single exception is the superscript/subscript pair, which is
/// mutually exclusive — the setters below are the only way to raise either
/// flag, and each clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleFlags {
    pub bold: bool,
    pub italics: bool,
    pub underline: bool,
    pub strike: bool,
    /// 6-digit uppercase hex without the leading `#`.
    pub color: Option<String>,
    pub font: Option<String>,
    super_script: bool,
    sub_script: bool,
}

impl StyleFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn super_script(&self) -> bool {
        self.super_script
    }

    pub fn sub_script(&self) -> bool {
        self.sub_script
    }

    /// Raise superscript, clearing subscript.
    pub fn set_super_script(&mut self) {
        self.super_script = true;
        self.sub_script = false;
    }

    /// Raise subscript, clearing superscript.
    pub fn set_sub_script(&mut self) {
        self.sub_script = true;
        self.super_script = false;
    }

    /// True when no attribute is set at all.
    pub fn is_plain(&self) -> bool {
        !self.bold
            && !self.italics
            && !self.underline
            && !self.strike
            && !self.super_script
            && !self.sub_script
            && self.color.is_none()
            && self.font.is_none()
    }
}
