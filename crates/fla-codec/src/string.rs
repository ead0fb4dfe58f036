//! Length-prefixed strings.
//!
//! Unicode profiles write UTF-16LE code units and measure lengths in code units; older
//! profiles write one byte per character in the 8-bit (Latin-1) codepage, substituting `?`
//! for characters outside it.

use crate::{Error, Result};
use crate::writer::{FlaWriter, MASKED_STRING};
use std::io::Write;

/// Written before the length prefix of BOM-framed strings in unicode profiles.
pub const UNICODE_BOM: [u8; 3] = [0xFF, 0xFE, 0xFF];

/// An encoded string body and its length in prefix units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedString {
    pub len: u32,
    pub bytes: Vec<u8>,
}

pub fn encode_string(s: &str, unicode: bool) -> EncodedString {
    if unicode {
        let mut bytes = Vec::with_capacity(s.len() * 2);
        let mut len = 0u32;
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
            len += 1;
        }
        return EncodedString { len, bytes };
    }
    let bytes = encode_latin1(s);
    EncodedString {
        len: bytes.len() as u32,
        bytes,
    }
}

pub fn encode_latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}

/// 8-bit class name bytes and their u16 length.
pub(crate) fn encode_class_name(name: &str) -> Result<(u16, Vec<u8>)> {
    let bytes = encode_latin1(name);
    let len = u16::try_from(bytes.len())
        .map_err(|_| Error::ClassNameTooLong { len: bytes.len() })?;
    Ok((len, bytes))
}

/// Size in bytes of the length prefix for a string of `len` units.
pub fn length_prefix_size(len: u32) -> usize {
    if len < 0xFF {
        1
    } else if len < 0xFFFF {
        3
    } else {
        7
    }
}

impl<W: Write> FlaWriter<W> {
    pub fn write_length_prefix(&mut self, len: u32) -> Result<()> {
        if len < 0xFF {
            return self.write_u8(len as u8);
        }
        if len < 0xFFFF {
            self.write_u8(0xFF)?;
            return self.write_u16(len as u16);
        }
        self.write_bytes(&[0xFF, 0xFF, 0xFF])?;
        self.write_u32(len)
    }

    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = encode_string(s, self.profile().unicode);
        self.write_length_prefix(encoded.len)?;
        self.write_bytes(&encoded.bytes)
    }

    pub fn write_bom_string(&mut self, s: &str) -> Result<()> {
        if self.profile().unicode {
            self.write_bytes(&UNICODE_BOM)?;
        }
        self.write_string(s)
    }

    /// Writes a string whose content golden files do not pin down (paths, user names, dates).
    ///
    /// In replay mode the string is preceded by `YYY`; the length prefix and content are real.
    pub fn write_masked_string(&mut self, s: &str) -> Result<()> {
        if self.is_replay() {
            self.write_bytes(&MASKED_STRING)?;
        }
        self.write_string(s)
    }

    /// Class names are always 8-bit, with a u16 length.
    pub fn write_class_name(&mut self, name: &str) -> Result<()> {
        let (len, bytes) = encode_class_name(name)?;
        self.write_u16(len)?;
        self.write_bytes(&bytes)
    }
}
