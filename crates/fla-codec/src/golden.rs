//! Comparison of replay-mode output against golden files.
//!
//! Golden files are captured from the reference writer with the same sentinels that replay
//! mode writes, and those sentinels act as wildcards here:
//!
//! - `X` and `U` in the golden bytes match any single byte;
//! - `YYY` must appear on both sides and is followed by a length-prefixed string whose
//!   content is skipped (lengths may differ).

use crate::writer::{MASKED_STRING, REPLACED, UNKNOWN};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenMismatch {
    /// Offset into the actual bytes.
    pub offset: usize,
    /// Offset into the golden bytes.
    pub golden_offset: usize,
    pub expected: Option<u8>,
    pub actual: Option<u8>,
    pub reason: &'static str,
}

impl fmt::Display for GoldenMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| b.map_or_else(|| "end".to_string(), |b| format!("{b:02X}"));
        write!(
            f,
            "{} at offset {} (golden offset {}): expected {}, got {}",
            self.reason,
            self.offset,
            self.golden_offset,
            show(self.expected),
            show(self.actual)
        )
    }
}

impl std::error::Error for GoldenMismatch {}

/// Reads a tiered length prefix; returns `(length, prefix size)`.
fn read_length_prefix(bytes: &[u8], at: usize) -> Option<(usize, usize)> {
    let first = *bytes.get(at)?;
    if first != 0xFF {
        return Some((usize::from(first), 1));
    }
    let short = u16::from_le_bytes([*bytes.get(at + 1)?, *bytes.get(at + 2)?]);
    if short != 0xFFFF {
        return Some((usize::from(short), 3));
    }
    let long = bytes.get(at + 3..at + 7)?;
    let long = u32::from_le_bytes([long[0], long[1], long[2], long[3]]);
    Some((long as usize, 7))
}

/// Size of a length-prefixed string starting at `at`, prefix included.
fn masked_string_len(bytes: &[u8], at: usize, unicode: bool) -> Option<usize> {
    let (len, prefix) = read_length_prefix(bytes, at)?;
    let content = if unicode { len * 2 } else { len };
    let end = at + prefix + content;
    (end <= bytes.len()).then_some(prefix + content)
}

pub fn match_golden(actual: &[u8], golden: &[u8], unicode: bool) -> Result<(), GoldenMismatch> {
    let (mut i, mut j) = (0usize, 0usize);
    let mismatch = |i: usize, j: usize, reason| GoldenMismatch {
        offset: i,
        golden_offset: j,
        expected: golden.get(j).copied(),
        actual: actual.get(i).copied(),
        reason,
    };

    while j < golden.len() {
        if golden[j..].starts_with(&MASKED_STRING) {
            if !actual[i..].starts_with(&MASKED_STRING) {
                return Err(mismatch(i, j, "masked string marker missing"));
            }
            i += MASKED_STRING.len();
            j += MASKED_STRING.len();
            let (Some(skip_actual), Some(skip_golden)) = (
                masked_string_len(actual, i, unicode),
                masked_string_len(golden, j, unicode),
            ) else {
                return Err(mismatch(i, j, "truncated masked string"));
            };
            i += skip_actual;
            j += skip_golden;
            continue;
        }

        let Some(&got) = actual.get(i) else {
            return Err(mismatch(i, j, "output ends early"));
        };
        let want = golden[j];
        if want != REPLACED && want != UNKNOWN && want != got {
            return Err(mismatch(i, j, "byte differs"));
        }
        i += 1;
        j += 1;
    }

    if i != actual.len() {
        return Err(mismatch(i, j, "unexpected trailing bytes"));
    }
    Ok(())
}

/// Parses a whitespace separated hex dump; `#` starts a comment running to the end of the line.
pub fn parse_hex_dump(text: &str) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(data, _)| data);
        for token in line.split_whitespace() {
            let is_byte = token.len() == 2 && token.bytes().all(|b| b.is_ascii_hexdigit());
            let byte = is_byte
                .then(|| u8::from_str_radix(token, 16).ok())
                .flatten()
                .ok_or_else(|| format!("line {}: invalid byte `{token}`", line_no + 1))?;
            out.push(byte);
        }
    }
    Ok(out)
}

/// Renders bytes as an uppercase hex dump, 16 bytes per line.
pub fn to_hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for chunk in bytes.chunks(16) {
        let line: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_match_any_byte() {
        assert!(match_golden(&[1, 2, 3], b"XU\x03", false).is_ok());
        let err = match_golden(&[1, 2, 4], b"XU\x03", false).unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.reason, "byte differs");
    }

    #[test]
    fn masked_strings_skip_content_of_either_length() {
        let actual = [b'Y', b'Y', b'Y', 2, b'h', b'i', 7];
        let golden = [b'Y', b'Y', b'Y', 3, b'a', b'b', b'c', 7];
        assert!(match_golden(&actual, &golden, false).is_ok());

        let unicode_actual = [b'Y', b'Y', b'Y', 1, b'h', 0, 9];
        let unicode_golden = [b'Y', b'Y', b'Y', 0, 9];
        assert!(match_golden(&unicode_actual, &unicode_golden, true).is_ok());
    }

    #[test]
    fn masked_string_marker_is_required_in_output() {
        let err = match_golden(&[1, 2, b'a', b'b'], &[b'Y', b'Y', b'Y', 1, b'a'], false)
            .unwrap_err();
        assert_eq!(err.reason, "masked string marker missing");
    }

    #[test]
    fn length_differences_are_reported() {
        assert_eq!(
            match_golden(&[1], &[1, 2], false).unwrap_err().reason,
            "output ends early"
        );
        assert_eq!(
            match_golden(&[1, 2], &[1], false).unwrap_err().reason,
            "unexpected trailing bytes"
        );
    }

    #[test]
    fn hex_dumps_round_trip_and_ignore_comments() {
        let bytes = parse_hex_dump("D0 01 00 # flag, stroke\n\n  0a ff\n").unwrap();
        assert_eq!(bytes, vec![0xD0, 0x01, 0x00, 0x0A, 0xFF]);
        assert_eq!(parse_hex_dump(&to_hex_dump(&bytes)).unwrap(), bytes);
        assert!(parse_hex_dump("D").is_err());
        assert!(parse_hex_dump("ZZ").is_err());
    }
}
