//! Buffered, end-aware byte stream.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};

use tracing::{debug, warn};

use crate::Result;
use crate::error::DiffError;

/// Read-ahead buffer size per stream.
pub const READ_BUFFER_SIZE: usize = 4096;

/// One sampled position of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    Byte(u8),
    /// The stream ended before this offset.
    Absent,
}

impl Sample {
    pub fn byte(self) -> Option<u8> {
        match self {
            Sample::Byte(byte) => Some(byte),
            Sample::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Sample::Absent)
    }
}

/// A named input read through a fixed-capacity buffer.
///
/// Pulling past the end yields [`Sample::Absent`] forever instead of failing,
/// so streams of different lengths can be advanced in lockstep.
pub struct StreamSource<R> {
    name: String,
    reader: R,
    total_size: u64,
    position: u64,
    buffer: Box<[u8]>,
    fill: usize,
    cursor: usize,
    truncated: bool,
}

impl<R> fmt::Debug for StreamSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource")
            .field("name", &self.name)
            .field("total_size", &self.total_size)
            .field("position", &self.position)
            .field("truncated", &self.truncated)
            .finish_non_exhaustive()
    }
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Result<Self> {
        Self::with_capacity(name, reader, READ_BUFFER_SIZE)
    }

    /// Measures the input by seeking to its end and rewinds it.
    pub fn with_capacity(name: impl Into<String>, mut reader: R, capacity: usize) -> Result<Self> {
        let name = name.into();
        let total_size = reader
            .seek(SeekFrom::End(0))
            .and_then(|size| reader.seek(SeekFrom::Start(0)).map(|_| size))
            .map_err(|source| DiffError::Seek {
                stream: name.clone(),
                source,
            })?;
        debug!(stream = %name, total_size, "opened stream");

        Ok(Self {
            name,
            reader,
            total_size,
            position: 0,
            buffer: vec![0; capacity.max(1)].into_boxed_slice(),
            fill: 0,
            cursor: 0,
            truncated: false,
        })
    }
}

impl<R: Read> StreamSource<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size declared by the medium when the stream was opened.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Bytes consumed from the medium so far, buffered or not.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn medium_exhausted(&self) -> bool {
        self.truncated || self.position >= self.total_size
    }

    /// Returns whether every remaining pull will yield [`Sample::Absent`].
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.fill && self.medium_exhausted()
    }

    pub fn pull_next(&mut self) -> Result<Sample> {
        if self.cursor == self.fill {
            if self.medium_exhausted() {
                return Ok(Sample::Absent);
            }
            self.refill()?;
            if self.fill == 0 {
                return Ok(Sample::Absent);
            }
        }

        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(Sample::Byte(byte))
    }

    /// One bulk read, never past the declared size. A short read ends the
    /// stream where it stopped.
    fn refill(&mut self) -> Result<()> {
        let remaining = self.total_size - self.position;
        let requested = usize::try_from(remaining)
            .map_or(self.buffer.len(), |remaining| remaining.min(self.buffer.len()));

        let read = self
            .reader
            .read(&mut self.buffer[..requested])
            .map_err(|source| DiffError::Read {
                stream: self.name.clone(),
                offset: self.position,
                source,
            })?;

        self.position += read as u64;
        self.fill = read;
        self.cursor = 0;

        if read < requested {
            warn!(
                stream = %self.name,
                offset = self.position,
                requested,
                read,
                "short read, treating stream as ended"
            );
            self.truncated = true;
        } else {
            debug!(stream = %self.name, read, position = self.position, "refilled read buffer");
        }
        Ok(())
    }
}
