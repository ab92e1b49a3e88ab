//! Terminal color helpers for diagnostics printed by the CLI.

use std::io::IsTerminal;
use std::sync::OnceLock;

static NO_COLOR: OnceLock<bool> = OnceLock::new();

/// Minimum palette size for color highlights to be distinguishable.
const MIN_COLORS: u16 = 8;

/// `no_color` is the resolved `--no-color` flag, which already folds in
/// `NO_COLOR`.
pub fn init(no_color: bool) {
    let _ = NO_COLOR.set(no_color || !std::io::stderr().is_terminal());
}

fn is_disabled() -> bool {
    *NO_COLOR.get().unwrap_or(&false)
}

/// Returns whether the terminal described by `TERM`/`COLORTERM` can show
/// at least the eight basic ANSI colors.
pub fn supports_color() -> bool {
    let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");
    !dumb && crossterm::style::available_color_count() >= MIN_COLORS
}

mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const DIM: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
}

pub struct Colors;

fn wrap_with_ansi(text: &str, prefixes: &[&str]) -> String {
    let prefix_len: usize = prefixes.iter().map(|prefix| prefix.len()).sum();
    let mut out = String::with_capacity(prefix_len + text.len() + codes::RESET.len());
    for prefix in prefixes {
        out.push_str(prefix);
    }
    out.push_str(text);
    out.push_str(codes::RESET);
    out
}

fn paint(text: &str, prefixes: &[&str]) -> String {
    if is_disabled() {
        text.to_string()
    } else {
        wrap_with_ansi(text, prefixes)
    }
}

impl Colors {
    pub fn error(text: &str) -> String {
        paint(text, &[codes::BOLD, codes::RED])
    }

    pub fn dim(text: &str) -> String {
        paint(text, &[codes::DIM])
    }
}
