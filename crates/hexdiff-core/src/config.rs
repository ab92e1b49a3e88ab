//! Run configuration.
//!
//! A [`Config`] is built once by the caller, validated when the [`Driver`]
//! is created and never mutated afterwards.
//!
//! [`Driver`]: crate::Driver

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The sixteen ANSI terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Palette used by [`HighlightMode::Cycle`] unless the caller supplies one.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "bright-black",
            Color::BrightRed => "bright-red",
            Color::BrightGreen => "bright-green",
            Color::BrightYellow => "bright-yellow",
            Color::BrightBlue => "bright-blue",
            Color::BrightMagenta => "bright-magenta",
            Color::BrightCyan => "bright-cyan",
            Color::BrightWhite => "bright-white",
        }
    }

    /// SGR parameter selecting this color for the given target.
    pub fn sgr(&self, target: HighlightTarget) -> u8 {
        let index = (*self as u8) % 8;
        let bright = (*self as u8) >= 8;
        match (target, bright) {
            (HighlightTarget::Foreground, false) => 30 + index,
            (HighlightTarget::Foreground, true) => 90 + index,
            (HighlightTarget::Background, false) => 40 + index,
            (HighlightTarget::Background, true) => 100 + index,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Color::ALL
            .into_iter()
            .find(|color| color.as_str().replace('-', "") == wanted)
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))
    }
}

/// Whether highlights paint the glyph or the cell behind it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HighlightTarget {
    #[default]
    Foreground,
    Background,
}

impl HighlightTarget {
    /// SGR parameter restoring the default color for this target.
    pub fn reset_sgr(&self) -> u8 {
        match self {
            HighlightTarget::Foreground => 39,
            HighlightTarget::Background => 49,
        }
    }
}

impl FromStr for HighlightTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fg" | "foreground" => Ok(HighlightTarget::Foreground),
            "bg" | "background" => Ok(HighlightTarget::Background),
            _ => Err(ConfigError::UnknownTarget(s.to_string())),
        }
    }
}

/// How divergent columns are marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HighlightMode {
    /// No escape sequences at all.
    Off,
    /// Underline every divergent column.
    Underline,
    /// One color for every divergent column.
    Fixed(Color),
    /// Walk the palette, restarting at every stream row.
    #[default]
    Cycle,
}

impl HighlightMode {
    /// Returns whether this mode emits colors, as opposed to plain attributes.
    pub fn uses_color(&self) -> bool {
        matches!(self, HighlightMode::Fixed(_) | HighlightMode::Cycle)
    }
}

impl FromStr for HighlightMode {
    type Err = ConfigError;

    /// Accepts `off`, `underline`, `cycle`, `fixed` (red) and `fixed:<color>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            Some(("fixed", color)) => Ok(HighlightMode::Fixed(color.parse()?)),
            Some(_) => Err(ConfigError::UnknownHighlightMode(s.to_string())),
            None => match lower.as_str() {
                "off" | "none" => Ok(HighlightMode::Off),
                "underline" => Ok(HighlightMode::Underline),
                "fixed" => Ok(HighlightMode::Fixed(Color::Red)),
                "cycle" | "cycling" => Ok(HighlightMode::Cycle),
                _ => Err(ConfigError::UnknownHighlightMode(s.to_string())),
            },
        }
    }
}

/// Shape of the final summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    highlight: HighlightMode,
    target: HighlightTarget,
    palette: Vec<Color>,
    stream_names: Vec<String>,
    summary_format: SummaryFormat,
    show_header: bool,
}

impl Config {
    /// Creates a configuration with default highlighting for the named streams.
    pub fn new<I, S>(stream_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            highlight: HighlightMode::default(),
            target: HighlightTarget::default(),
            palette: DEFAULT_PALETTE.to_vec(),
            stream_names: stream_names.into_iter().map(Into::into).collect(),
            summary_format: SummaryFormat::default(),
            show_header: true,
        }
    }

    pub fn with_highlight(mut self, highlight: HighlightMode) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_target(mut self, target: HighlightTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_summary_format(mut self, summary_format: SummaryFormat) -> Self {
        self.summary_format = summary_format;
        self
    }

    pub fn with_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    pub fn highlight(&self) -> HighlightMode {
        self.highlight
    }

    pub fn target(&self) -> HighlightTarget {
        self.target
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn stream_names(&self) -> &[String] {
        &self.stream_names
    }

    pub fn summary_format(&self) -> SummaryFormat {
        self.summary_format
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    /// Rejects configurations the driver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream_names.is_empty() {
            return Err(ConfigError::EmptyStreamList);
        }
        if self.highlight == HighlightMode::Cycle && self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}
