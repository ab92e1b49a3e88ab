//! The read / detect / render loop.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::{debug, info};

use crate::ROW_WIDTH;
use crate::Result;
use crate::config::{Config, SummaryFormat};
use crate::divergence::detect;
use crate::error::{ConfigError, DiffError};
use crate::highlight::HighlightAllocator;
use crate::render::Renderer;
use crate::row::{Row, RowAssembler};
use crate::source::StreamSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub name: String,
    pub size: u64,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Divergent columns across all rows, counted once per column.
    pub divergent_columns: u64,
    pub rows: u64,
    pub streams: Vec<StreamSummary>,
}

impl Summary {
    pub fn is_identical(&self) -> bool {
        self.divergent_columns == 0
    }

    /// The closing line, newline included.
    pub fn render(&self, format: SummaryFormat) -> Result<String> {
        let mut line = match format {
            SummaryFormat::Text => format!("Divergent columns: {}", self.divergent_columns),
            SummaryFormat::Json => serde_json::to_string(self)?,
        };
        line.push('\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Init,
    Reading,
    Done,
}

pub struct Driver<R> {
    config: Config,
    assembler: RowAssembler<R>,
    allocator: HighlightAllocator,
    renderer: Renderer,
    state: DriverState,
    row_index: u64,
    divergent_columns: u64,
}

impl<R: Read> Driver<R> {
    /// Validates `config` against the sources. Nothing is read or written yet.
    pub fn new(config: Config, sources: Vec<StreamSource<R>>) -> Result<Self> {
        config.validate()?;
        if config.stream_names().len() != sources.len() {
            return Err(DiffError::Config(ConfigError::NameCountMismatch {
                names: config.stream_names().len(),
                streams: sources.len(),
            }));
        }

        let renderer = Renderer::for_sizes(sources.iter().map(StreamSource::total_size));
        Ok(Self {
            allocator: HighlightAllocator::from_config(&config),
            assembler: RowAssembler::new(sources),
            renderer,
            config,
            state: DriverState::Init,
            row_index: 0,
            divergent_columns: 0,
        })
    }

    /// Runs to completion, writing the header, every row and the summary to
    /// `out`. Sources are released when this returns.
    pub fn run<W: Write>(mut self, out: &mut W) -> Result<Summary> {
        loop {
            match self.state {
                DriverState::Init => {
                    self.start(out)?;
                    self.state = DriverState::Reading;
                }
                DriverState::Reading => match self.assembler.next_row()? {
                    Some(row) => self.emit_row(&row, out)?,
                    None => self.state = DriverState::Done,
                },
                DriverState::Done => return self.finish(out),
            }
        }
    }

    fn start<W: Write>(&mut self, out: &mut W) -> Result<()> {
        debug!(
            streams = self.config.stream_names().len(),
            address_width = self.renderer.address_width(),
            highlight = ?self.config.highlight(),
            "starting diff"
        );
        if self.config.show_header() {
            let header = self.renderer.render_header(self.config.stream_names());
            out.write_all(header.as_bytes()).map_err(DiffError::Write)?;
        }
        Ok(())
    }

    fn emit_row<W: Write>(&mut self, row: &Row, out: &mut W) -> Result<()> {
        let divergence = detect(row);
        self.divergent_columns += divergence.count() as u64;

        let styles: Vec<_> = (0..row.stream_count())
            .map(|_| self.allocator.styles_for(&divergence))
            .collect();
        let address = self.row_index * ROW_WIDTH as u64;
        let line = self.renderer.render_row(address, row, &styles);
        out.write_all(line.as_bytes()).map_err(DiffError::Write)?;

        self.row_index += 1;
        Ok(())
    }

    fn finish<W: Write>(self, out: &mut W) -> Result<Summary> {
        let streams = self
            .config
            .stream_names()
            .iter()
            .zip(self.assembler.sources())
            .map(|(name, source)| StreamSummary {
                name: name.clone(),
                size: source.total_size(),
            })
            .collect();
        let summary = Summary {
            divergent_columns: self.divergent_columns,
            rows: self.row_index,
            streams,
        };

        let line = summary.render(self.config.summary_format())?;
        out.write_all(line.as_bytes()).map_err(DiffError::Write)?;
        out.flush().map_err(DiffError::Write)?;

        info!(
            rows = summary.rows,
            divergent_columns = summary.divergent_columns,
            "diff complete"
        );
        Ok(summary)
    }
}
