use crate::geom::Transform;
use crate::writer::{FlaWriter, REPLACED};
use crate::{Error, Result};
use std::io::Write;

pub const MATRIX_LEN: usize = 24;

/// Twips per pixel; translations are stored in twips.
const TWIPS: f64 = 20.0;
const FIXED_16_16: f64 = 65536.0;

fn to_i32(component: &'static str, value: f64, scale: f64) -> Result<i32> {
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
        return Err(Error::MatrixRange { component, value });
    }
    Ok(scaled as i32)
}

/// Encodes `m` as `a b c d` in 16.16 fixed point followed by `tx ty` in twips.
pub fn encode_matrix(m: &Transform) -> Result<[u8; MATRIX_LEN]> {
    let fields = [
        to_i32("a", m.m11, FIXED_16_16)?,
        to_i32("b", m.m12, FIXED_16_16)?,
        to_i32("c", m.m21, FIXED_16_16)?,
        to_i32("d", m.m22, FIXED_16_16)?,
        to_i32("tx", m.m31, TWIPS)?,
        to_i32("ty", m.m32, TWIPS)?,
    ];
    let mut out = [0u8; MATRIX_LEN];
    for (chunk, value) in out.chunks_exact_mut(4).zip(fields) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    Ok(out)
}

impl<W: Write> FlaWriter<W> {
    pub fn write_matrix(&mut self, m: &Transform) -> Result<()> {
        let bytes = encode_matrix(m)?;
        if self.is_replay() {
            return self.write_repeated(REPLACED, MATRIX_LEN);
        }
        self.write_bytes(&bytes)
    }
}
