//! Connector glyphs used when drawing a tree.

use std::fmt;
use std::str::FromStr;

/// Default indentation below a last sibling.
pub const LINE_PREFIX_EMPTY: &str = "    ";
/// Default indentation below a sibling that has more siblings after it.
pub const LINE_PREFIX: &str = "│   ";
/// Default connector for a line with more siblings after it.
pub const TEXT_PREFIX: &str = "├── ";
/// Default connector for the last line among its siblings.
pub const TEXT_PREFIX_END: &str = "└── ";

/// Addresses a single glyph of a [`Style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Empty,
    Continuation,
    Branch,
    Last,
}

/// Four glyph strings, independently overridable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Prefix carried below a last sibling
    pub empty: String,
    /// Prefix carried below a sibling that is followed by others
    pub continuation: String,
    /// Connector in front of a non-last line
    pub branch: String,
    /// Connector in front of the last line
    pub last: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            empty: LINE_PREFIX_EMPTY.to_string(),
            continuation: LINE_PREFIX.to_string(),
            branch: TEXT_PREFIX.to_string(),
            last: TEXT_PREFIX_END.to_string(),
        }
    }
}

impl Style {
    pub fn new(
        empty: impl Into<String>,
        continuation: impl Into<String>,
        branch: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        Self {
            empty: empty.into(),
            continuation: continuation.into(),
            branch: branch.into(),
            last: last.into(),
        }
    }

    /// Two-character box drawing.
    pub fn compact() -> Self {
        Self::new("  ", "│ ", "├ ", "└ ")
    }

    /// Plain ASCII, as `tree --charset=ascii` draws it.
    pub fn ascii() -> Self {
        Self::new("    ", "|   ", "|-- ", "`-- ")
    }

    pub fn get(&self, glyph: Glyph) -> &str {
        match glyph {
            Glyph::Empty => &self.empty,
            Glyph::Continuation => &self.continuation,
            Glyph::Branch => &self.branch,
            Glyph::Last => &self.last,
        }
    }

    pub fn set(&mut self, glyph: Glyph, text: impl Into<String>) {
        let text = text.into();
        match glyph {
            Glyph::Empty => self.empty = text,
            Glyph::Continuation => self.continuation = text,
            Glyph::Branch => self.branch = text,
            Glyph::Last => self.last = text,
        }
    }

    /// The bare vertical bar printed under the header line.
    pub fn header_bar(&self) -> &str {
        self.continuation.trim_end()
    }
}

/// Named glyph presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePreset {
    #[default]
    Default,
    Compact,
    Ascii,
}

impl StylePreset {
    pub fn style(self) -> Style {
        match self {
            StylePreset::Default => Style::default(),
            StylePreset::Compact => Style::compact(),
            StylePreset::Ascii => Style::ascii(),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StylePreset::Default => "default",
            StylePreset::Compact => "compact",
            StylePreset::Ascii => "ascii",
        };
        f.write_str(name)
    }
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(StylePreset::Default),
            "compact" => Ok(StylePreset::Compact),
            "ascii" => Ok(StylePreset::Ascii),
            other => Err(format!("unknown style preset: {other}")),
        }
    }
}
