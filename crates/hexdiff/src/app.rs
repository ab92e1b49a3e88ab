//! Application entry point: turns parsed arguments into a diff run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use tracing::debug;

use hexdiff_common::error_codes::exit_codes;
use hexdiff_common::{Colors, color_init, supports_color};
use hexdiff_core::{Config, ConfigError, DiffError, Driver, HighlightMode, StreamSource, Summary};

use crate::commands::Cli;

/// Application encapsulates the CLI runtime behavior.
pub struct Application;

impl Application {
    pub fn new() -> Self {
        Self
    }

    /// Parse arguments from the process and run, returning the exit code.
    pub fn run(&self) -> i32 {
        self.run_with(Cli::parse())
    }

    pub fn run_with(&self, cli: Cli) -> i32 {
        color_init(cli.no_color);

        if let Some(shell) = cli.completions {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "hexdiff", &mut io::stdout());
            return exit_codes::SUCCESS;
        }

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        match execute(&cli, &mut out) {
            Ok(summary) => {
                debug!(
                    rows = summary.rows,
                    divergent_columns = summary.divergent_columns,
                    "run finished"
                );
                exit_codes::SUCCESS
            }
            Err(e) => self.handle_error(&e, cli.json),
        }
    }

    fn handle_error(&self, error: &DiffError, json: bool) -> i32 {
        if let DiffError::Write(source) = error {
            if source.kind() == io::ErrorKind::BrokenPipe {
                debug!("output closed early");
                return exit_codes::SUCCESS;
            }
        }

        if json {
            eprintln!("{}", error.to_json());
        } else {
            eprintln!("{} {}", Colors::error("Error:"), error);
            eprintln!("{} {}", Colors::dim("Suggestion:"), error.suggestion());
        }
        error.exit_code()
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens every input, runs the diff and writes it to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<Summary, DiffError> {
    let config = build_config(cli)?;
    let sources = open_sources(&cli.files, config.stream_names())?;
    Driver::new(config, sources)?.run(out)
}

/// Builds the run configuration. Names default to the paths as given.
pub fn build_config(cli: &Cli) -> Result<Config, DiffError> {
    if cli.names.len() > cli.files.len() {
        return Err(ConfigError::NameCountMismatch {
            names: cli.names.len(),
            streams: cli.files.len(),
        }
        .into());
    }

    let names: Vec<String> = cli
        .files
        .iter()
        .enumerate()
        .map(|(index, path)| {
            cli.names
                .get(index)
                .cloned()
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();

    let highlight = resolve_highlight(cli.effective_highlight()?, cli.no_color, supports_color());
    let palette = cli.palette_colors()?;
    let mut config = Config::new(names)
        .with_highlight(highlight)
        .with_target(cli.highlight_target()?)
        .with_summary_format(cli.summary_format())
        .with_header(!cli.no_header);
    if !palette.is_empty() {
        config = config.with_palette(palette);
    }
    Ok(config)
}

/// Downgrades color modes to underline when color is unavailable.
pub fn resolve_highlight(mode: HighlightMode, no_color: bool, color_capable: bool) -> HighlightMode {
    if mode.uses_color() && (no_color || !color_capable) {
        debug!(?mode, no_color, color_capable, "falling back to underline highlights");
        HighlightMode::Underline
    } else {
        mode
    }
}

fn open_sources(files: &[PathBuf], names: &[String]) -> Result<Vec<StreamSource<File>>, DiffError> {
    files
        .iter()
        .zip(names)
        .map(|(path, name)| {
            let open_error = |source| DiffError::Open {
                path: path.display().to_string(),
                source,
            };
            let file = File::open(path).map_err(open_error)?;
            if file.metadata().map_err(open_error)?.is_dir() {
                return Err(open_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "is a directory",
                )));
            }
            StreamSource::new(name.clone(), file)
        })
        .collect()
}
