//! Lockstep row assembly across all streams.

use std::io::Read;

use tracing::debug;

use crate::ROW_WIDTH;
use crate::Result;
use crate::source::{Sample, StreamSource};

/// Sixteen samples from every stream, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    streams: Vec<[Sample; ROW_WIDTH]>,
}

impl Row {
    pub fn new(streams: Vec<[Sample; ROW_WIDTH]>) -> Self {
        Self { streams }
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn streams(&self) -> &[[Sample; ROW_WIDTH]] {
        &self.streams
    }

    /// Samples at one column position, one per stream.
    pub fn column(&self, column: usize) -> impl Iterator<Item = Sample> + '_ {
        self.streams.iter().map(move |samples| samples[column])
    }

    /// Returns whether any stream contributed a real byte.
    pub fn has_data(&self) -> bool {
        self.streams
            .iter()
            .any(|samples| samples.iter().any(|sample| !sample.is_absent()))
    }
}

pub struct RowAssembler<R> {
    sources: Vec<StreamSource<R>>,
}

impl<R: Read> RowAssembler<R> {
    pub fn new(sources: Vec<StreamSource<R>>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[StreamSource<R>] {
        &self.sources
    }

    pub fn is_exhausted(&self) -> bool {
        self.sources.iter().all(StreamSource::is_exhausted)
    }

    /// Builds the next row, or `None` once no stream has data left.
    ///
    /// Each column slot pulls once from every stream, left to right.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        if self.is_exhausted() {
            debug!("all streams exhausted");
            return Ok(None);
        }

        let mut streams = vec![[Sample::Absent; ROW_WIDTH]; self.sources.len()];
        for column in 0..ROW_WIDTH {
            for (source, samples) in self.sources.iter_mut().zip(streams.iter_mut()) {
                samples[column] = source.pull_next()?;
            }
        }

        let row = Row::new(streams);
        if row.has_data() {
            Ok(Some(row))
        } else {
            // every stream hit a short read at the row start
            debug!("row held no data, ending");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Seek, SeekFrom};

    use super::*;

    fn assembler(inputs: &[&[u8]]) -> RowAssembler<Cursor<Vec<u8>>> {
        let sources = inputs
            .iter()
            .enumerate()
            .map(|(i, data)| StreamSource::new(format!("s{i}"), Cursor::new(data.to_vec())).unwrap())
            .collect();
        RowAssembler::new(sources)
    }

    /// Declares `declared` bytes on seek but only holds what `inner` has.
    struct Shrunk {
        inner: Cursor<Vec<u8>>,
        declared: u64,
    }

    impl Read for Shrunk {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for Shrunk {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            match pos {
                SeekFrom::End(_) => Ok(self.declared),
                other => self.inner.seek(other),
            }
        }
    }

    #[test]
    fn test_empty_inputs_yield_no_rows() {
        let mut rows = assembler(&[b"", b""]);
        assert!(rows.next_row().unwrap().is_none());
    }

    #[test]
    fn test_exact_row_boundary_keeps_last_row() {
        let data: Vec<u8> = (0..16).collect();
        let mut rows = assembler(&[data.as_slice(), data.as_slice()]);

        let row = rows.next_row().unwrap().unwrap();
        assert_eq!(row.stream_count(), 2);
        assert_eq!(row.streams()[1][15], Sample::Byte(15));
        assert!(rows.next_row().unwrap().is_none());
    }

    #[test]
    fn test_shorter_stream_padded_with_absent() {
        let mut rows = assembler(&[b"abcdef", b"abc"]);
        let row = rows.next_row().unwrap().unwrap();

        assert_eq!(row.streams()[0][5], Sample::Byte(b'f'));
        assert_eq!(row.streams()[1][2], Sample::Byte(b'c'));
        assert!(row.streams()[1][3..].iter().all(|s| s.is_absent()));
        assert!(row.streams()[0][6..].iter().all(|s| s.is_absent()));
        assert!(rows.next_row().unwrap().is_none());
    }

    #[test]
    fn test_rows_continue_until_longest_stream_ends() {
        let long = vec![7u8; 40];
        let mut rows = assembler(&[long.as_slice(), b"x"]);

        let mut count = 0;
        while let Some(row) = rows.next_row().unwrap() {
            assert!(row.has_data());
            count += 1;
        }
        assert_eq!(count, 3);
        assert!(rows.is_exhausted());
    }

    #[test]
    fn test_column_iterates_streams_in_order() {
        let mut rows = assembler(&[b"A", b"B", b"C"]);
        let row = rows.next_row().unwrap().unwrap();
        let column: Vec<Sample> = row.column(0).collect();
        assert_eq!(
            column,
            vec![Sample::Byte(b'A'), Sample::Byte(b'B'), Sample::Byte(b'C')]
        );
    }

    #[test]
    fn test_simultaneous_short_reads_end_without_blank_row() {
        let sources = (0..2)
            .map(|i| {
                let reader = Shrunk {
                    inner: Cursor::new(vec![i; ROW_WIDTH]),
                    declared: 2 * ROW_WIDTH as u64,
                };
                StreamSource::with_capacity(format!("s{i}"), reader, ROW_WIDTH).unwrap()
            })
            .collect();
        let mut rows = RowAssembler::new(sources);

        let row = rows.next_row().unwrap().unwrap();
        assert_eq!(row.streams()[1][15], Sample::Byte(1));

        // Both streams still claim 16 more bytes, so the next row is built
        // and comes back empty.
        assert!(!rows.is_exhausted());
        assert!(rows.next_row().unwrap().is_none());
        assert!(rows.is_exhausted());
        assert!(rows.sources().iter().all(|s| s.total_size() == 32));
    }
}
