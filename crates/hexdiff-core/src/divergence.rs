//! Per-column divergence across all streams of a row.

use crate::ROW_WIDTH;
use crate::row::Row;

/// One flag per column: `true` when the streams disagree there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivergenceVector([bool; ROW_WIDTH]);

impl DivergenceVector {
    pub fn from_flags(flags: [bool; ROW_WIDTH]) -> Self {
        Self(flags)
    }

    pub fn is_divergent(&self, column: usize) -> bool {
        self.0.get(column).copied().unwrap_or(false)
    }

    /// Number of divergent columns, the row's contribution to the run total.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|flag| **flag).count()
    }

    pub fn flags(&self) -> &[bool; ROW_WIDTH] {
        &self.0
    }
}

/// Flags every column whose samples are not all equal.
///
/// Equality is transitive over samples, so comparing neighbours in stream
/// order and stopping at the first mismatch is enough.
pub fn detect(row: &Row) -> DivergenceVector {
    let mut flags = [false; ROW_WIDTH];
    for (column, flag) in flags.iter_mut().enumerate() {
        *flag = row
            .streams()
            .windows(2)
            .any(|pair| pair[0][column] != pair[1][column]);
    }
    DivergenceVector(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Sample;

    fn row_of(streams: &[&[Option<u8>]]) -> Row {
        Row::new(
            streams
                .iter()
                .map(|values| {
                    let mut samples = [Sample::Absent; ROW_WIDTH];
                    for (slot, value) in samples.iter_mut().zip(values.iter()) {
                        *slot = value.map_or(Sample::Absent, Sample::Byte);
                    }
                    samples
                })
                .collect(),
        )
    }

    #[test]
    fn test_identical_streams_never_diverge() {
        let row = row_of(&[&[Some(1), Some(2)], &[Some(1), Some(2)], &[Some(1), Some(2)]]);
        assert_eq!(detect(&row).count(), 0);
    }

    #[test]
    fn test_single_stream_never_diverges() {
        let row = row_of(&[&[Some(1), Some(2), None]]);
        assert_eq!(detect(&row), DivergenceVector::default());
    }

    #[test]
    fn test_byte_against_absent_diverges() {
        let row = row_of(&[&[Some(1), Some(2)], &[Some(1)]]);
        let divergence = detect(&row);
        assert!(!divergence.is_divergent(0));
        assert!(divergence.is_divergent(1));
        assert!(!divergence.is_divergent(2));
        assert_eq!(divergence.count(), 1);
    }

    #[test]
    fn test_mismatch_in_last_stream_is_found() {
        let row = row_of(&[&[Some(9)], &[Some(9)], &[Some(9)], &[Some(8)]]);
        assert!(detect(&row).is_divergent(0));
    }

    #[test]
    fn test_column_counts_once_regardless_of_offenders() {
        let row = row_of(&[&[Some(1)], &[Some(2)], &[Some(3)]]);
        assert_eq!(detect(&row).count(), 1);
    }

    #[test]
    fn test_out_of_range_column_is_not_divergent() {
        let divergence = DivergenceVector::from_flags([true; ROW_WIDTH]);
        assert!(!divergence.is_divergent(ROW_WIDTH));
        assert_eq!(divergence.count(), ROW_WIDTH);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_sample() -> impl Strategy<Value = Sample> {
            prop_oneof![
                1 => Just(Sample::Absent),
                4 => (0u8..4).prop_map(Sample::Byte),
            ]
        }

        fn arb_row() -> impl Strategy<Value = Row> {
            prop::collection::vec(prop::array::uniform16(arb_sample()), 1..6).prop_map(Row::new)
        }

        proptest! {
            #[test]
            fn adjacent_scan_matches_all_pairs(row in arb_row()) {
                let divergence = detect(&row);
                for column in 0..ROW_WIDTH {
                    let samples: Vec<Sample> = row.column(column).collect();
                    let all_pairs = samples
                        .iter()
                        .any(|a| samples.iter().any(|b| a != b));
                    prop_assert_eq!(divergence.is_divergent(column), all_pairs);
                }
            }

            #[test]
            fn stream_order_does_not_matter(row in arb_row()) {
                let mut reversed = row.streams().to_vec();
                reversed.reverse();
                prop_assert_eq!(detect(&row), detect(&Row::new(reversed)));
            }
        }
    }
}
