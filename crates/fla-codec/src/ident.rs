use crate::writer::FlaWriter;
use crate::{Error, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Textual form of any identifier in replay mode.
pub const REPLAYED_IDENTIFIER: &str = "XXXXXXXX-XXXXXXXX";

/// Document-scoped item identifier: creation timestamp plus a per-document counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    pub high: u32,
    pub low: u32,
}

impl Identifier {
    pub fn new(high: u32, low: u32) -> Self {
        Self { high, low }
    }

    pub fn to_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.high.to_le_bytes());
        out[4..].copy_from_slice(&self.low.to_le_bytes());
        out
    }

    /// Formats the identifier, or the sentinel form when `replay` is set.
    pub fn render(self, replay: bool) -> String {
        if replay {
            return REPLAYED_IDENTIFIER.to_string();
        }
        self.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}-{:08x}", self.high, self.low)
    }
}

fn parse_group(group: &str) -> Option<u32> {
    if group.len() != 8 || !group.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return None;
    }
    u32::from_str_radix(group, 16).ok()
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidIdentifierFormat {
            text: text.to_string(),
        };
        let (high, low) = text.split_once('-').ok_or_else(invalid)?;
        let high = parse_group(high).ok_or_else(invalid)?;
        let low = parse_group(low).ok_or_else(invalid)?;
        Ok(Self { high, low })
    }
}

/// Hands out identifiers for one document conversion.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    timestamp: u32,
    next: u32,
}

impl IdGenerator {
    pub fn new(timestamp: u32) -> Self {
        Self { timestamp, next: 0 }
    }

    /// Uses the current wall-clock time (epoch seconds) as the document timestamp.
    pub fn from_clock() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self::new(u32::try_from(now.max(0)).unwrap_or(u32::MAX))
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Number of identifiers generated so far.
    pub fn issued(&self) -> u32 {
        self.next
    }

    pub fn generate(&mut self) -> Identifier {
        let id = Identifier::new(self.timestamp, self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl<W: Write> FlaWriter<W> {
    pub fn write_identifier(&mut self, id: Identifier) -> Result<()> {
        self.write_replaced(&id.to_bytes())
    }
}
