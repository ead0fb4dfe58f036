use crate::Result;
use crate::profile::FormatProfile;
use rand::RngCore;
use std::io::Write;

/// Sentinel written in replay mode in place of a value derived from time, randomness or counters.
pub const REPLACED: u8 = b'X';
/// Sentinel written in replay mode for bytes whose meaning is not known.
pub const UNKNOWN: u8 = b'U';
/// Prefix written in replay mode before a string whose content is masked in golden files.
pub const MASKED_STRING: [u8; 3] = [b'Y', b'Y', b'Y'];

/// Whether non-reproducible values are written for real or replaced by sentinels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Determinism {
    #[default]
    Live,
    /// Byte-exact output for golden comparisons (`X`, `U` and `YYY` sentinels).
    Replay,
}

impl Determinism {
    pub fn is_replay(self) -> bool {
        matches!(self, Determinism::Replay)
    }
}

/// Little-endian byte writer shared by every encoder in this crate.
///
/// The profile and the determinism mode are fixed at construction, so a single output stream
/// can never mix live and replayed values.
#[derive(Debug)]
pub struct FlaWriter<W> {
    inner: W,
    profile: FormatProfile,
    determinism: Determinism,
    written: u64,
}

impl<W: Write> FlaWriter<W> {
    pub fn new(inner: W, profile: FormatProfile, determinism: Determinism) -> Self {
        Self {
            inner,
            profile,
            determinism,
            written: 0,
        }
    }

    pub fn profile(&self) -> &FormatProfile {
        &self.profile
    }

    pub fn determinism(&self) -> Determinism {
        self.determinism
    }

    pub fn is_replay(&self) -> bool {
        self.determinism.is_replay()
    }

    /// Number of bytes written through this writer so far.
    pub fn position(&self) -> u64 {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.write_bytes(&[v])
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    /// Writes the low three bytes of `v` (two's complement), little-endian.
    pub fn write_i24(&mut self, v: i32) -> Result<()> {
        let bytes = v.to_le_bytes();
        self.write_bytes(&bytes[..3])
    }

    pub(crate) fn write_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        self.write_bytes(&vec![byte; count])
    }

    /// Writes `bytes`, or as many `X` sentinels in replay mode.
    pub fn write_replaced(&mut self, bytes: &[u8]) -> Result<()> {
        if self.is_replay() {
            return self.write_repeated(REPLACED, bytes.len());
        }
        self.write_bytes(bytes)
    }

    /// Writes bytes that are reproduced from observed files without a known meaning.
    pub fn write_unknown(&mut self, bytes: &[u8]) -> Result<()> {
        if self.is_replay() {
            return self.write_repeated(UNKNOWN, bytes.len());
        }
        self.write_bytes(bytes)
    }

    /// Writes `count` random bytes, or `X` sentinels in replay mode.
    pub fn write_random(&mut self, count: usize) -> Result<()> {
        if self.is_replay() {
            return self.write_repeated(REPLACED, count);
        }
        let mut buf = vec![0u8; count];
        rand::thread_rng().fill_bytes(&mut buf);
        self.write_bytes(&buf)
    }

    /// Writes a wall-clock timestamp (epoch seconds) as a u32.
    pub fn write_timestamp(&mut self, epoch_secs: u32) -> Result<()> {
        self.write_replaced(&epoch_secs.to_le_bytes())
    }
}
