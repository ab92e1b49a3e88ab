use std::path::PathBuf;

use clap::Parser;
use clap::builder::FalseyValueParser;
pub use clap_complete::Shell;
use hexdiff_core::{Color, ConfigError, HighlightMode, HighlightTarget, SummaryFormat};

const LONG_ABOUT: &str = r#"hexdiff prints any number of binary files side by side, sixteen bytes per
row, and highlights every column where the files disagree.

A column is divergent when at least one file differs from the others at that
offset. Files that end early show '--' for their missing bytes, which always
counts as a difference against a file that still has data there.

HIGHLIGHT MODES:
    cycle           Each divergent column in a row takes the next palette color
    fixed[:COLOR]   Every divergent column uses one color (default red)
    underline       Underline divergent columns, no color
    off             Plain output

    Color modes fall back to underline when NO_COLOR is set or the terminal
    reports fewer than 8 colors.

EXAMPLES:
    hexdiff a.bin b.bin
    hexdiff build1/fw.img build2/fw.img build3/fw.img
    hexdiff --highlight fixed --color yellow --target bg old.bin new.bin
    hexdiff --palette red,blue --name old --name new a.bin b.bin
    hexdiff a.bin b.bin | less -R"#;

#[derive(Debug, Parser)]
#[command(name = "hexdiff")]
#[command(author, version)]
#[command(about = "Side-by-side hex diff of any number of binary files")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Files to compare, in display order
    #[arg(required_unless_present = "completions", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// How divergent columns are highlighted (off, underline, fixed[:COLOR], cycle)
    #[arg(long, env = "HEXDIFF_HIGHLIGHT", default_value = "cycle", value_name = "MODE")]
    pub highlight: String,

    /// Color for the fixed highlight mode
    #[arg(long, env = "HEXDIFF_COLOR", value_name = "COLOR")]
    pub color: Option<String>,

    /// Comma-separated palette for the cycle highlight mode
    #[arg(long, env = "HEXDIFF_PALETTE", value_delimiter = ',', value_name = "COLORS")]
    pub palette: Vec<String>,

    /// Paint the text (fg) or the cell background (bg)
    #[arg(long, env = "HEXDIFF_TARGET", default_value = "fg", value_name = "TARGET")]
    pub target: String,

    /// Display name for the file at the same position (repeatable)
    #[arg(short, long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Omit the file name banner
    #[arg(long)]
    pub no_header: bool,

    /// Print the summary as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// The highlight mode after applying `--color` to the fixed mode.
    ///
    /// `--color` is checked even when the mode ignores it.
    pub fn effective_highlight(&self) -> Result<HighlightMode, ConfigError> {
        let mode: HighlightMode = self.highlight.parse()?;
        let color = self.color.as_deref().map(str::parse::<Color>).transpose()?;
        Ok(match (mode, color) {
            (HighlightMode::Fixed(_), Some(color)) => HighlightMode::Fixed(color),
            (mode, _) => mode,
        })
    }

    pub fn highlight_target(&self) -> Result<HighlightTarget, ConfigError> {
        self.target.parse()
    }

    /// Colors given with `--palette`; empty means the default palette.
    pub fn palette_colors(&self) -> Result<Vec<Color>, ConfigError> {
        self.palette.iter().map(|name| name.parse()).collect()
    }

    pub fn summary_format(&self) -> SummaryFormat {
        if self.json {
            SummaryFormat::Json
        } else {
            SummaryFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hexdiff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["a.bin", "b.bin"]);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.effective_highlight().unwrap(), HighlightMode::Cycle);
        assert_eq!(cli.highlight_target().unwrap(), HighlightTarget::Foreground);
        assert!(cli.palette_colors().unwrap().is_empty());
        assert_eq!(cli.summary_format(), SummaryFormat::Text);
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["hexdiff"]).is_err());
    }

    #[test]
    fn test_completions_without_files() {
        let cli = parse(&["--completions", "bash"]);
        assert_eq!(cli.completions, Some(Shell::Bash));
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_fixed_color_override() {
        let cli = parse(&["--highlight", "fixed", "--color", "cyan", "a"]);
        assert_eq!(cli.effective_highlight().unwrap(), HighlightMode::Fixed(Color::Cyan));

        let cli = parse(&["--highlight", "fixed:green", "a"]);
        assert_eq!(cli.effective_highlight().unwrap(), HighlightMode::Fixed(Color::Green));

        let cli = parse(&["--highlight", "underline", "--color", "cyan", "a"]);
        assert_eq!(cli.effective_highlight().unwrap(), HighlightMode::Underline);
    }

    #[test]
    fn test_palette_is_comma_separated() {
        let cli = parse(&["--palette", "red,bright-blue", "a"]);
        assert_eq!(cli.palette_colors().unwrap(), vec![Color::Red, Color::BrightBlue]);
    }

    #[test]
    fn test_unknown_values_are_config_errors() {
        let cli = parse(&["--highlight", "sparkle", "a"]);
        assert!(matches!(
            cli.effective_highlight(),
            Err(ConfigError::UnknownHighlightMode(ref mode)) if mode == "sparkle"
        ));

        let cli = parse(&["--color", "mauve", "a"]);
        assert!(matches!(
            cli.effective_highlight(),
            Err(ConfigError::UnknownColor(_))
        ));

        let cli = parse(&["--palette", "red,mauve", "a"]);
        assert!(matches!(cli.palette_colors(), Err(ConfigError::UnknownColor(_))));

        let cli = parse(&["--target", "sideways", "a"]);
        assert!(matches!(
            cli.highlight_target(),
            Err(ConfigError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_names_repeatable() {
        let cli = parse(&["-n", "old", "--name", "new", "a", "b"]);
        assert_eq!(cli.names, vec!["old", "new"]);
    }
}
