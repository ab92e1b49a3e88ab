//! Synchronized hex diff engine for hexdiff.
//!
//! Reads any number of byte streams in lockstep, sixteen bytes per row, flags
//! every column where the streams disagree and renders the rows side by side
//! with ANSI highlights.

#![deny(clippy::all)]

mod config;
mod divergence;
mod driver;
pub mod error;
mod highlight;
mod render;
mod row;
mod source;

pub use config::Color;
pub use config::Config;
pub use config::DEFAULT_PALETTE;
pub use config::HighlightMode;
pub use config::HighlightTarget;
pub use config::SummaryFormat;
pub use divergence::DivergenceVector;
pub use divergence::detect;
pub use driver::Driver;
pub use driver::StreamSummary;
pub use driver::Summary;
pub use error::ConfigError;
pub use error::DiffError;
pub use highlight::HighlightAllocator;
pub use highlight::Style;
pub use render::ABSENT_PLACEHOLDER;
pub use render::Renderer;
pub use render::STREAM_WIDTH;
pub use render::address_width;
pub use row::Row;
pub use row::RowAssembler;
pub use source::READ_BUFFER_SIZE;
pub use source::Sample;
pub use source::StreamSource;

/// Bytes per rendered row, per stream.
pub const ROW_WIDTH: usize = 16;

pub type Result<T> = std::result::Result<T, DiffError>;
