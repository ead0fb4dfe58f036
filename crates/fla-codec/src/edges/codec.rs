use super::{EdgeOp, LineTag, SelectionMask, StyleTriple, edges_count, parse_edges};
use crate::Result;
use crate::geom::{Point, Vector};
use crate::numeric::{Tier, choose_tier, write_vector_as};
use crate::writer::FlaWriter;
use std::io::Write;

const FLAG_STYLES: u8 = 0x40;
const FLAG_NO_SELECTION: u8 = 0x80;
const SELECTED: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingMove {
    target: Point,
    selection: SelectionMask,
}

/// Pen position and style state of the shape being encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PenState {
    position: Point,
    styles: StyleTriple,
    styles_dirty: bool,
    pending_move: Option<PendingMove>,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            styles: StyleTriple::default(),
            styles_dirty: true,
            pending_move: None,
        }
    }
}

impl PenState {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn styles(&self) -> StyleTriple {
        self.styles
    }

    pub fn styles_dirty(&self) -> bool {
        self.styles_dirty
    }

    /// Target of a move that has not been written yet.
    pub fn pending_move(&self) -> Option<Point> {
        self.pending_move.map(|m| m.target)
    }
}

/// Encodes edge operations of one shape at a time into edge records.
///
/// Each record is laid out as:
///
/// ```text
/// flag: u8          bits 0-1 from, 2-3 control, 4-5 to (00 absent, 01 byte, 10 extended, 11 short)
///                   bit 6 style block present, bit 7 style block present without selection
/// styles            stroke, fill0, fill1 as u16 (each followed by a 0x80/0x00 byte when selected)
/// from              delta from the pen to a pending move target, omitted when zero
/// control           curve control point delta
/// to                anchor delta
/// tag: u8           1 for `/` lines, 0 for `|` lines (curve-tag profiles only, lines only)
/// ```
///
/// Control and anchor deltas are both measured from the point the edge starts at.
#[derive(Debug, Clone, Default)]
pub struct EdgePathCodec {
    pen: PenState,
}

impl EdgePathCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    /// Resets the pen for a new shape; the first edge always carries a style block.
    pub fn begin_shape(&mut self) {
        self.pen = PenState::default();
    }

    pub fn set_styles(&mut self, styles: StyleTriple) {
        if self.pen.styles != styles {
            self.pen.styles = styles;
            self.pen.styles_dirty = true;
        }
    }

    pub fn move_to(&mut self, target: Point, selection: SelectionMask) {
        self.pen.pending_move = Some(PendingMove { target, selection });
    }

    pub fn line_to<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        to: Point,
        tag: LineTag,
    ) -> Result<()> {
        self.write_record(w, None, to, tag)
    }

    pub fn curve_to<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        control: Point,
        to: Point,
    ) -> Result<()> {
        self.write_record(w, Some(control), to, LineTag::General)
    }

    pub fn apply<W: Write>(&mut self, w: &mut FlaWriter<W>, op: &EdgeOp) -> Result<()> {
        match *op {
            EdgeOp::MoveTo { to, selection } => {
                self.move_to(to, selection);
                Ok(())
            }
            EdgeOp::LineTo { to, tag } => self.line_to(w, to, tag),
            EdgeOp::CurveTo { control, to } => self.curve_to(w, control, to),
        }
    }

    /// Encodes a whole edge path with the given styles and returns the number of records.
    ///
    /// The text is parsed completely before anything is written.
    pub fn write_edges<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        text: &str,
        styles: StyleTriple,
    ) -> Result<usize> {
        let ops = parse_edges(text)?;
        self.set_styles(styles);
        let mut records = 0usize;
        for op in &ops {
            self.apply(w, op)?;
            if op.is_edge() {
                records += 1;
            }
        }
        Ok(records)
    }

    /// Writes a u32 record count followed by the records of `text`.
    pub fn write_edge_list<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        text: &str,
        styles: StyleTriple,
    ) -> Result<usize> {
        let ops = parse_edges(text)?;
        let count = edges_count(text);
        debug_assert_eq!(count, ops.iter().filter(|op| op.is_edge()).count());
        w.write_u32(count as u32)?;
        self.set_styles(styles);
        for op in &ops {
            self.apply(w, op)?;
        }
        Ok(count)
    }

    fn write_record<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        control: Option<Point>,
        to: Point,
        tag: LineTag,
    ) -> Result<()> {
        let pending = self.pen.pending_move;
        let start = pending.map_or(self.pen.position, |m| m.target);
        let selection = pending.map_or(SelectionMask::NONE, |m| m.selection);

        let from = pending
            .map(|m| m.target - self.pen.position)
            .filter(|d| *d != Vector::zero());
        let control = control.map(|c| c - start);
        let to_delta = to - start;

        // Tiers are chosen before the first byte of the record is written.
        let from_tier = from.map(choose_tier).transpose()?;
        let control_tier = control.map(choose_tier).transpose()?;
        let to_tier = choose_tier(to_delta)?;

        let mut flag =
            field_bits(from_tier) | (field_bits(control_tier) << 2) | (to_tier.flag_bits() << 4);
        if self.pen.styles_dirty {
            flag |= FLAG_STYLES;
            if selection.is_empty() {
                flag |= FLAG_NO_SELECTION;
            }
        }
        w.write_u8(flag)?;

        if self.pen.styles_dirty {
            write_style_block(w, self.pen.styles, selection)?;
            self.pen.styles_dirty = false;
        }
        if let (Some(delta), Some(tier)) = (from, from_tier) {
            write_vector_as(w, tier, delta)?;
        }
        if let (Some(delta), Some(tier)) = (control, control_tier) {
            write_vector_as(w, tier, delta)?;
        }
        write_vector_as(w, to_tier, to_delta)?;

        if control.is_none() && w.profile().curve_tag_disambiguation {
            w.write_u8(u8::from(tag == LineTag::Alternate))?;
        }

        self.pen.position = to;
        self.pen.pending_move = None;
        Ok(())
    }
}

fn field_bits(tier: Option<Tier>) -> u8 {
    tier.map_or(0, Tier::flag_bits)
}

fn write_style_block<W: Write>(
    w: &mut FlaWriter<W>,
    styles: StyleTriple,
    selection: SelectionMask,
) -> Result<()> {
    let slots = [
        (styles.stroke, SelectionMask::STROKE),
        (styles.fill0, SelectionMask::FILL0),
        (styles.fill1, SelectionMask::FILL1),
    ];
    for (index, bit) in slots {
        w.write_u16(index)?;
        if !selection.is_empty() {
            w.write_u8(if selection.contains(bit) { SELECTED } else { 0 })?;
        }
    }
    Ok(())
}
