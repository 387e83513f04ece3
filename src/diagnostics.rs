//! Plain-text data tables for plotting the sampler and the filter.
//! Each table is whitespace-separated columns under a `#`-prefixed
//! header, written to any sink; file handling stays with the caller.

use std::io;
use std::io::Write;

use sampling::{mitchell, mitchell_weight, SampleOffset};

/// Writes the first `count` centered sample positions, one `x y` row
/// per sample.
pub fn write_sample_positions<W: Write>(
    out: &mut W,
    count: usize,
    filter_size: f32,
) -> io::Result<()> {
    writeln!(out, "# X Y")?;
    for index in 0..count {
        let offset = SampleOffset::centered(index, filter_size);
        writeln!(out, "{} {}", offset.x, offset.y)?;
    }
    Ok(())
}

/// Writes the 1D Mitchell curve over `[-2, 2]` at 0.01 steps, one
/// `x weight` row per step.
pub fn write_filter_curve<W: Write>(out: &mut W) -> io::Result<()> {
    let one_third = 1.0f32 / 3.0;

    writeln!(out, "# X Y")?;
    let mut x = -2.0f32;
    while x <= 2.0 {
        writeln!(out, "{} {}", x, mitchell(x / 2.0, one_third, one_third))?;
        x += 0.01;
    }
    Ok(())
}

/// Writes the 2D filter weight at each of the first `count` sample
/// positions, one `x y weight` row per sample.
pub fn write_sample_weights<W: Write>(
    out: &mut W,
    count: usize,
    filter_size: f32,
) -> io::Result<()> {
    writeln!(out, "# X Y Z")?;
    for index in 0..count {
        let offset = SampleOffset::centered(index, filter_size);
        let weight = mitchell_weight(offset, filter_size * 0.5);
        writeln!(out, "{} {} {}", offset.x, offset.y, weight)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_table_has_a_header_and_one_row_per_sample() {
        let mut out = Vec::new();
        write_sample_positions(&mut out, 16, 2.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# X Y"));
        assert_eq!(lines.count(), 16);
    }

    #[test]
    fn curve_table_spans_the_support() {
        let mut out = Vec::new();
        write_filter_curve(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# X Y\n-2 0\n"));
        assert!(text.lines().count() > 400);
    }

    #[test]
    fn weight_table_has_three_columns() {
        let mut out = Vec::new();
        write_sample_weights(&mut out, 8, 2.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        for line in text.lines().skip(1) {
            assert_eq!(line.split_whitespace().count(), 3);
        }
    }
}
