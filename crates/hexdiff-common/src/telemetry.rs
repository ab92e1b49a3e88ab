//! Tracing setup for the CLI.
//!
//! Filtering comes from `RUST_LOG`, falling back to the level the binary asks
//! for. Events go to stderr, or are appended to the file named by
//! `HEXDIFF_LOG`. Stdout carries only the diff.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_FILE_ENV: &str = "HEXDIFF_LOG";

/// Keeps the background log writer alive. Pending events are flushed on drop,
/// so hold it until the process is about to exit.
#[derive(Debug)]
pub struct TelemetryGuard {
    _worker: Option<WorkerGuard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LogSink {
    Stderr,
    File(PathBuf),
}

impl LogSink {
    /// An unset or empty `HEXDIFF_LOG` means stderr.
    fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => LogSink::File(PathBuf::from(path)),
            _ => LogSink::Stderr,
        }
    }
}

struct SinkWriter {
    writer: BoxMakeWriter,
    worker: Option<WorkerGuard>,
    ansi: bool,
}

impl SinkWriter {
    fn stderr() -> Self {
        Self {
            writer: BoxMakeWriter::new(io::stderr),
            worker: None,
            ansi: io::stderr().is_terminal(),
        }
    }

    fn file(file: File) -> Self {
        let (non_blocking, worker) = tracing_appender::non_blocking(file);
        Self {
            writer: BoxMakeWriter::new(non_blocking),
            worker: Some(worker),
            ansi: false,
        }
    }

    /// Falls back to stderr when the log file cannot be opened.
    fn for_sink(sink: LogSink) -> Self {
        match sink {
            LogSink::Stderr => Self::stderr(),
            LogSink::File(path) => match open_append(&path) {
                Ok(file) => Self::file(file),
                Err(err) => {
                    eprintln!(
                        "Warning: cannot write log file {}: {}; logging to stderr",
                        path.display(),
                        err
                    );
                    Self::stderr()
                }
            },
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. A second call leaves the first one in place.
pub fn init_tracing(default_level: &str) -> TelemetryGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let sink = LogSink::from_env_value(std::env::var_os(LOG_FILE_ENV));
    let SinkWriter {
        writer,
        worker,
        ansi,
    } = SinkWriter::for_sink(sink);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init()
        .is_ok();

    TelemetryGuard {
        _worker: if installed { worker } else { None },
    }
}
