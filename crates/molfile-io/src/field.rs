//! Fixed-column field extraction
//!
//! Both PDB and PSF lay records out in fixed byte columns. Fields are sliced
//! by byte offset, never trimmed, and tolerate lines shorter than the
//! nominal layout: a field that runs past the end of the line is clipped to
//! what exists, and a field that starts past it is empty.
//!
//! Numeric conversion is lenient in the way fixed-column formats expect:
//! leading blanks are skipped, the longest numeric prefix is used, and a
//! blank or non-numeric field reads as zero.

use std::borrow::Cow;

use nom::{
    character::complete::{digit1, multispace0, one_of},
    combinator::{opt, recognize},
    number::complete::double,
    sequence::{pair, preceded},
    IResult,
};

/// Slice `width` bytes of `line` starting at byte column `start`
pub fn field(line: &str, start: usize, width: usize) -> Cow<'_, str> {
    let bytes = line.as_bytes();
    if start >= bytes.len() {
        return Cow::Borrowed("");
    }
    let end = start.saturating_add(width).min(bytes.len());
    String::from_utf8_lossy(&bytes[start..end])
}

/// Single character at byte column `col`, or a blank if the line is shorter
pub fn field_char(line: &str, col: usize) -> char {
    line.as_bytes().get(col).map(|&b| b as char).unwrap_or(' ')
}

/// Owned copy of a field, untrimmed
pub fn string_field(line: &str, start: usize, width: usize) -> String {
    field(line, start, width).into_owned()
}

/// Integer value of a field (see [`parse_int`])
pub fn int_field(line: &str, start: usize, width: usize) -> i64 {
    parse_int(&field(line, start, width))
}

/// Floating-point value of a field (see [`parse_float`])
pub fn float_field(line: &str, start: usize, width: usize) -> f64 {
    parse_float(&field(line, start, width))
}

fn int_prefix(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, recognize(pair(opt(one_of("+-")), digit1)))(input)
}

fn float_prefix(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(input)
}

/// Parse the leading integer of `text`, `atoi`-style.
///
/// Trailing garbage is ignored; no digits (or overflow) gives 0.
pub fn parse_int(text: &str) -> i64 {
    int_prefix(text)
        .ok()
        .and_then(|(_, digits)| digits.parse().ok())
        .unwrap_or(0)
}

/// Parse the leading floating-point number of `text`, `atof`-style.
pub fn parse_float(text: &str) -> f64 {
    float_prefix(text).map(|(_, value)| value).unwrap_or(0.0)
}

/// Left-to-right cursor over the columns of one record.
///
/// Variant-dependent layouts (the PSF atom line) are easiest to follow as a
/// sequence of "take N, skip 1" steps rather than absolute offsets.
#[derive(Debug, Clone)]
pub struct Columns<'a> {
    line: &'a str,
    offset: usize,
}

impl<'a> Columns<'a> {
    pub fn new(line: &'a str) -> Self {
        Columns { line, offset: 0 }
    }

    /// Current byte offset into the line
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Advance past `width` bytes without reading them
    pub fn skip(&mut self, width: usize) -> &mut Self {
        self.offset += width;
        self
    }

    /// Take the next `width` bytes as text
    pub fn take(&mut self, width: usize) -> Cow<'a, str> {
        let text = field(self.line, self.offset, width);
        self.offset += width;
        text
    }

    pub fn take_string(&mut self, width: usize) -> String {
        self.take(width).into_owned()
    }

    pub fn take_int(&mut self, width: usize) -> i64 {
        parse_int(&self.take(width))
    }

    pub fn take_float(&mut self, width: usize) -> f64 {
        parse_float(&self.take(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_is_untrimmed() {
        let line = "ATOM      1  N   ALA";
        assert_eq!(field(line, 12, 4), " N  ");
        assert_eq!(field(line, 17, 3), "ALA");
    }

    #[test]
    fn test_field_clips_short_lines() {
        let line = "ATOM      1";
        assert_eq!(field(line, 6, 8), "    1");
        assert_eq!(field(line, 30, 8), "");
        assert_eq!(field_char(line, 16), ' ');
        assert_eq!(field_char(line, 0), 'A');
    }

    #[test]
    fn test_parse_int_like_atoi() {
        assert_eq!(parse_int("   42"), 42);
        assert_eq!(parse_int("-7xyz"), -7);
        assert_eq!(parse_int("+3"), 3);
        assert_eq!(parse_int("    "), 0);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("12 34"), 12);
    }

    #[test]
    fn test_parse_float_like_atof() {
        assert!((parse_float("  -0.300000") + 0.3).abs() < 1e-12);
        assert!((parse_float("1.5E+02") - 150.0).abs() < 1e-12);
        assert!((parse_float("12.011 rest") - 12.011).abs() < 1e-12);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("      "), 0.0);
        assert_eq!(parse_float("n/a"), 0.0);
    }

    #[test]
    fn test_numeric_fields() {
        let line = "CRYST1   50.000   60.000";
        assert!((float_field(line, 6, 9) - 50.0).abs() < 1e-12);
        assert!((float_field(line, 15, 9) - 60.0).abs() < 1e-12);
        assert_eq!(int_field(line, 24, 9), 0);
    }

    #[test]
    fn test_columns_cursor() {
        let line = "       1 SEG  12   ALA  CA";
        let mut cols = Columns::new(line);
        assert_eq!(cols.take_int(8), 1);
        cols.skip(1);
        assert_eq!(cols.take(4), "SEG ");
        cols.skip(1);
        assert_eq!(cols.take_string(4), "12  ");
        cols.skip(1);
        assert_eq!(cols.take(4), "ALA ");
        cols.skip(1);
        assert_eq!(cols.take(4), "CA");
        assert_eq!(cols.offset(), 28);
        assert_eq!(cols.take(14), "");
    }
}
