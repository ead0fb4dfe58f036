//! Shape outlines: the XFL edge path mini-language and its binary edge records.
//!
//! ```text
//! !X Y        move (Y may carry an `S<mask>` selection suffix)
//! |X Y        line
//! /X Y        line, alternate tag
//! [CX CY X Y  quadratic curve
//! ```

mod codec;
mod lex;
mod literal;
mod parse;

pub use codec::{EdgePathCodec, PenState};
pub use lex::normalize;
pub use literal::{format_hex_literal, parse_coordinate};
pub use parse::parse_edges;

use crate::geom::Point;

/// Line, fill-0 and fill-1 style indices active for the next edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleTriple {
    pub stroke: u16,
    pub fill0: u16,
    pub fill1: u16,
}

impl StyleTriple {
    pub fn new(stroke: u16, fill0: u16, fill1: u16) -> Self {
        Self {
            stroke,
            fill0,
            fill1,
        }
    }
}

/// Selection bits carried by a move (`S<mask>`), used by the authoring tool for highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionMask(pub u8);

impl SelectionMask {
    pub const NONE: SelectionMask = SelectionMask(0);
    pub const FILL0: u8 = 0b001;
    pub const FILL1: u8 = 0b010;
    pub const STROKE: u8 = 0b100;

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    /// `|`
    General,
    /// `/`
    Alternate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeOp {
    MoveTo { to: Point, selection: SelectionMask },
    LineTo { to: Point, tag: LineTag },
    CurveTo { control: Point, to: Point },
}

impl EdgeOp {
    /// Whether this operation produces an edge record.
    pub fn is_edge(&self) -> bool {
        !matches!(self, EdgeOp::MoveTo { .. })
    }
}

/// Number of edge records the encoder will write for `text`.
///
/// Counts line and curve operators in the normalized token stream; does not validate.
pub fn edges_count(text: &str) -> usize {
    lex::tokenize(&lex::normalize(text))
        .iter()
        .filter(|t| matches!(t, lex::Token::Op(op) if lex::is_edge_operator(*op)))
        .count()
}
