use super::lex::{self, Token};
use super::literal::parse_coordinate;
use super::{EdgeOp, LineTag, SelectionMask};
use crate::geom::{Point, point};
use crate::{Error, Result};

/// Parses edge path text into absolute-coordinate operations.
///
/// Empty (or whitespace-only) text yields no operations.
pub fn parse_edges(text: &str) -> Result<Vec<EdgeOp>> {
    let normalized = lex::normalize(text);
    let tokens = lex::tokenize(&normalized);

    if tokens.first().is_some_and(|t| *t != Token::Op(lex::MOVE)) {
        return Err(Error::edge_path(
            fragment(&tokens, 0, 3),
            "edge path must start with `!`",
        ));
    }

    let mut ops = Vec::new();
    let mut i = 0usize;
    while i < tokens.len() {
        let Token::Op(op) = tokens[i] else {
            return Err(Error::edge_path(
                fragment(&tokens, i, 1),
                "expected an operator (`!`, `|`, `/` or `[`)",
            ));
        };
        let group = Group::new(&tokens, i, if op == lex::CURVE { 4 } else { 2 })?;
        i += 1 + group.args.len();

        let op = match op {
            lex::MOVE => {
                let (y, selection) = group.selection_suffix(group.args[1])?;
                EdgeOp::MoveTo {
                    to: point(group.coordinate(group.args[0])?, group.coordinate(y)?),
                    selection,
                }
            }
            lex::LINE => EdgeOp::LineTo {
                to: group.point(0)?,
                tag: LineTag::General,
            },
            lex::LINE_ALT => EdgeOp::LineTo {
                to: group.point(0)?,
                tag: LineTag::Alternate,
            },
            _ => EdgeOp::CurveTo {
                control: group.point(0)?,
                to: group.point(2)?,
            },
        };
        ops.push(op);
    }
    Ok(ops)
}

/// Joins up to `len` tokens starting at `start`, for error messages.
fn fragment(tokens: &[Token<'_>], start: usize, len: usize) -> String {
    tokens
        .iter()
        .skip(start)
        .take(len)
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One operator and its arguments.
struct Group<'a> {
    fragment: String,
    args: Vec<&'a str>,
}

impl<'a> Group<'a> {
    fn new(tokens: &[Token<'a>], op_index: usize, arity: usize) -> Result<Self> {
        let args: Vec<&'a str> = tokens
            .iter()
            .skip(op_index + 1)
            .take(arity)
            .map_while(|token| match token {
                Token::Arg(arg) => Some(*arg),
                Token::Op(_) => None,
            })
            .collect();
        let fragment = fragment(tokens, op_index, args.len() + 1);
        if args.len() < arity {
            return Err(Error::edge_path(
                fragment,
                format!("expected {arity} coordinates, found {}", args.len()),
            ));
        }
        Ok(Self { fragment, args })
    }

    fn coordinate(&self, token: &str) -> Result<f64> {
        parse_coordinate(token).ok_or_else(|| {
            Error::edge_path(
                self.fragment.clone(),
                format!("invalid coordinate `{token}`"),
            )
        })
    }

    fn point(&self, first: usize) -> Result<Point> {
        Ok(point(
            self.coordinate(self.args[first])?,
            self.coordinate(self.args[first + 1])?,
        ))
    }

    /// Strips an `S<mask>` selection suffix from a move's y coordinate.
    fn selection_suffix<'t>(&self, token: &'t str) -> Result<(&'t str, SelectionMask)> {
        let Some((y, mask)) = token.split_once('S') else {
            return Ok((token, SelectionMask::NONE));
        };
        let mask = mask.parse::<u8>().map_err(|_| {
            Error::edge_path(
                self.fragment.clone(),
                format!("invalid selection mask `S{mask}`"),
            )
        })?;
        Ok((y, SelectionMask(mask)))
    }
}
