//! Maps divergence flags to highlight styles.

use crate::ROW_WIDTH;
use crate::config::{Color, Config, HighlightMode, HighlightTarget};
use crate::divergence::DivergenceVector;

const UNDERLINE_ON: &str = "\x1b[4m";
const UNDERLINE_OFF: &str = "\x1b[24m";

/// How a single highlighted cell is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Underline,
    Color {
        color: Color,
        target: HighlightTarget,
    },
}

impl Style {
    pub fn start_sequence(&self) -> String {
        match self {
            Style::Underline => UNDERLINE_ON.to_string(),
            Style::Color { color, target } => format!("\x1b[{}m", color.sgr(*target)),
        }
    }

    /// Undoes only what [`Style::start_sequence`] set.
    pub fn reset_sequence(&self) -> String {
        match self {
            Style::Underline => UNDERLINE_OFF.to_string(),
            Style::Color { target, .. } => format!("\x1b[{}m", target.reset_sgr()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighlightAllocator {
    mode: HighlightMode,
    target: HighlightTarget,
    palette: Vec<Color>,
}

impl HighlightAllocator {
    pub fn new(mode: HighlightMode, target: HighlightTarget, palette: Vec<Color>) -> Self {
        Self {
            mode,
            target,
            palette,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.highlight(), config.target(), config.palette().to_vec())
    }

    /// Styles for one stream's row. The palette cursor starts at the first
    /// entry on every call.
    pub fn styles_for(&self, flags: &DivergenceVector) -> [Option<Style>; ROW_WIDTH] {
        let mut styles = [None; ROW_WIDTH];
        let mut cursor = 0;

        for (column, style) in styles.iter_mut().enumerate() {
            if !flags.is_divergent(column) {
                continue;
            }
            *style = match self.mode {
                HighlightMode::Off => None,
                HighlightMode::Underline => Some(Style::Underline),
                HighlightMode::Fixed(color) => Some(self.colored(color)),
                HighlightMode::Cycle => {
                    let color = self.palette.get(cursor % self.palette.len().max(1));
                    cursor += 1;
                    color.map(|color| self.colored(*color))
                }
            };
        }
        styles
    }

    fn colored(&self, color: Color) -> Style {
        Style::Color {
            color,
            target: self.target,
        }
    }
}
