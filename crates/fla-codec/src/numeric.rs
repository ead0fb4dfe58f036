//! Adaptive fixed-point encoding of coordinate pairs.
//!
//! Three layouts are available, tried in order:
//!
//! | tier     | bytes | per axis                                  | range (integer part) |
//! |----------|-------|-------------------------------------------|----------------------|
//! | byte     | 4     | `frac: u8`, `int: i8`                     | `-128..=127`         |
//! | short    | 4     | `round(v * 2): i16` (half units only)     | `-16384..=16383`     |
//! | extended | 8     | `frac: u8`, `int: i24`                    | `-2^23..2^23`        |
//!
//! `frac` is `floor((v - floor(v)) * 256)`, so byte and extended tiers carry 8 fractional bits.

use crate::geom::Vector;
use crate::writer::FlaWriter;
use crate::{Error, Result};
use std::io::Write;
use std::ops::RangeInclusive;

pub const BYTE_RANGE: RangeInclusive<i64> = -128..=127;
pub const SHORT_RANGE: RangeInclusive<i64> = -16_384..=16_383;
pub const EXTENDED_RANGE: RangeInclusive<i64> = -(1 << 23)..=(1 << 23) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Byte,
    Short,
    Extended,
}

impl Tier {
    /// Two-bit width code used in edge record flags (`00` means the field is absent).
    pub fn flag_bits(self) -> u8 {
        match self {
            Tier::Byte => 0b01,
            Tier::Extended => 0b10,
            Tier::Short => 0b11,
        }
    }
}

fn split(v: f64) -> (i64, u8) {
    let int = v.floor();
    let frac = ((v - int) * 256.0).floor() as u8;
    (int as i64, frac)
}

fn int_in(v: f64, range: &RangeInclusive<i64>) -> bool {
    v.is_finite() && range.contains(&(v.floor() as i64))
}

fn is_half_unit(v: f64) -> bool {
    let frac = v - v.floor();
    frac == 0.0 || frac == 0.5
}

pub fn fits_byte(v: Vector) -> bool {
    int_in(v.x, &BYTE_RANGE) && int_in(v.y, &BYTE_RANGE)
}

pub fn fits_short(v: Vector) -> bool {
    int_in(v.x, &SHORT_RANGE)
        && int_in(v.y, &SHORT_RANGE)
        && is_half_unit(v.x)
        && is_half_unit(v.y)
}

pub fn fits_extended(v: Vector) -> bool {
    int_in(v.x, &EXTENDED_RANGE) && int_in(v.y, &EXTENDED_RANGE)
}

/// Picks the narrowest tier able to hold `v`.
pub fn choose_tier(v: Vector) -> Result<Tier> {
    if fits_byte(v) {
        return Ok(Tier::Byte);
    }
    if fits_short(v) {
        return Ok(Tier::Short);
    }
    if fits_extended(v) {
        return Ok(Tier::Extended);
    }
    let (axis, value) = if int_in(v.x, &EXTENDED_RANGE) {
        ('y', v.y)
    } else {
        ('x', v.x)
    };
    Err(Error::NumericRange { axis, value })
}

/// Writes `v` in the narrowest tier and returns the tier used.
pub fn write_vector<W: Write>(w: &mut FlaWriter<W>, v: Vector) -> Result<Tier> {
    let tier = choose_tier(v)?;
    write_vector_as(w, tier, v)?;
    Ok(tier)
}

/// Writes `v` in a tier previously returned by [`choose_tier`] for the same value.
pub(crate) fn write_vector_as<W: Write>(
    w: &mut FlaWriter<W>,
    tier: Tier,
    v: Vector,
) -> Result<()> {
    for value in [v.x, v.y] {
        match tier {
            Tier::Byte => {
                let (int, frac) = split(value);
                w.write_u8(frac)?;
                w.write_i8(int as i8)?;
            }
            Tier::Short => {
                w.write_i16((value * 2.0).round() as i16)?;
            }
            Tier::Extended => {
                let (int, frac) = split(value);
                w.write_u8(frac)?;
                w.write_i24(int as i32)?;
            }
        }
    }
    Ok(())
}
