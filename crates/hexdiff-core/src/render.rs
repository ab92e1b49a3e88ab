//! Text layout of the header banner and data rows.

use crate::ROW_WIDTH;
use crate::highlight::Style;
use crate::row::Row;
use crate::source::Sample;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Gap between the address label and the first stream.
const ADDRESS_GAP: &str = "  ";
/// Gap between the two eight-byte halves of a stream row.
const HALF_GAP: &str = "  ";
const CELL_GAP: &str = " ";
const STREAM_GAP: &str = "    ";
const TRUNCATION_MARK: &str = "...";

/// Printed in place of a byte once a stream has ended.
pub const ABSENT_PLACEHOLDER: &str = "--";

/// Visible width of one stream's sixteen cells and their gaps.
pub const STREAM_WIDTH: usize =
    ROW_WIDTH * 2 + (ROW_WIDTH - 2) * CELL_GAP.len() + HALF_GAP.len();

/// Hex digits needed for the address label of inputs up to `largest_size`
/// bytes: the smallest `d >= 1` with `16^d >= largest_size`.
pub fn address_width(largest_size: u64) -> usize {
    let mut width = 1;
    let mut capacity: u64 = 16;
    while capacity < largest_size {
        width += 1;
        match capacity.checked_mul(16) {
            Some(next) => capacity = next,
            None => break,
        }
    }
    width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    address_width: usize,
}

impl Renderer {
    pub fn new(address_width: usize) -> Self {
        Self {
            address_width: address_width.max(1),
        }
    }

    /// Sizes the address label for the largest of `sizes`.
    pub fn for_sizes(sizes: impl IntoIterator<Item = u64>) -> Self {
        let largest = sizes.into_iter().max().unwrap_or(0);
        Self::new(address_width(largest))
    }

    pub fn address_width(&self) -> usize {
        self.address_width
    }

    /// Stream names, each centered over its columns.
    pub fn render_header(&self, names: &[String]) -> String {
        let mut line = " ".repeat(self.address_width + ADDRESS_GAP.len());
        for (index, name) in names.iter().enumerate() {
            if index > 0 {
                line.push_str(STREAM_GAP);
            }
            line.push_str(&format!(
                "{:^width$}",
                fit_name(name, STREAM_WIDTH),
                width = STREAM_WIDTH
            ));
        }
        let mut line = line.trim_end().to_string();
        line.push('\n');
        line
    }

    /// One data row. `styles` holds one entry per stream; missing entries
    /// render unstyled.
    pub fn render_row(&self, address: u64, row: &Row, styles: &[[Option<Style>; ROW_WIDTH]]) -> String {
        let streams = row.stream_count();
        let mut line = String::with_capacity(
            self.address_width + ADDRESS_GAP.len() + streams * (STREAM_WIDTH + STREAM_GAP.len()),
        );
        line.push_str(&format!("{:0width$X}", address, width = self.address_width));
        line.push_str(ADDRESS_GAP);

        for (index, samples) in row.streams().iter().enumerate() {
            let stream_styles = styles.get(index);
            let last_stream = index + 1 == streams;

            for (column, sample) in samples.iter().enumerate() {
                let style = stream_styles.and_then(|styles| styles[column]);
                if let Some(style) = style {
                    line.push_str(&style.start_sequence());
                }
                push_sample(&mut line, *sample);
                if let Some(style) = style {
                    line.push_str(&style.reset_sequence());
                }
                line.push_str(separator(column, last_stream));
            }
        }
        if streams == 0 {
            line.push('\n');
        }
        line
    }
}

fn push_sample(line: &mut String, sample: Sample) {
    match sample {
        Sample::Byte(byte) => {
            line.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            line.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
        }
        Sample::Absent => line.push_str(ABSENT_PLACEHOLDER),
    }
}

fn separator(column: usize, last_stream: bool) -> &'static str {
    if column == ROW_WIDTH - 1 {
        if last_stream { "\n" } else { STREAM_GAP }
    } else if column == ROW_WIDTH / 2 - 1 {
        HALF_GAP
    } else {
        CELL_GAP
    }
}

/// Shortens `name` to `width` characters, keeping its tail.
fn fit_name(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len <= width {
        return name.to_string();
    }
    let keep = width.saturating_sub(TRUNCATION_MARK.len());
    let tail: String = name.chars().skip(len - keep).collect();
    format!("{}{}", TRUNCATION_MARK, tail)
}
