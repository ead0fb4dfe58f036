//! Whitespace normalization and tokenization of edge path text.
//!
//! Operator glyphs may be glued to their neighbours (`!0 0|10 0`); normalization puts a
//! single space on both sides of every glyph and collapses other whitespace runs, so the
//! encoder and [`super::edges_count`] always agree on the token stream.

pub(crate) const MOVE: char = '!';
pub(crate) const LINE: char = '|';
pub(crate) const LINE_ALT: char = '/';
pub(crate) const CURVE: char = '[';

pub(crate) fn is_operator(ch: char) -> bool {
    matches!(ch, MOVE | LINE | LINE_ALT | CURVE)
}

pub(crate) fn is_edge_operator(ch: char) -> bool {
    matches!(ch, LINE | LINE_ALT | CURVE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Op(char),
    Arg(&'a str),
}

impl Token<'_> {
    pub(crate) fn text(&self) -> String {
        match self {
            Token::Op(ch) => ch.to_string(),
            Token::Arg(s) => s.to_string(),
        }
    }
}

pub fn normalize(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        if is_operator(ch) {
            spaced.push(' ');
            spaced.push(ch);
            spaced.push(' ');
        } else {
            spaced.push(ch);
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn tokenize(normalized: &str) -> Vec<Token<'_>> {
    normalized
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| {
            let mut chars = t.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if is_operator(ch) => Token::Op(ch),
                _ => Token::Arg(t),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glued_operators_are_spaced_and_whitespace_collapsed() {
        assert_eq!(normalize("!0 0|10 0"), "! 0 0 | 10 0");
        assert_eq!(normalize("  !1\t2 \n[3 4  5 6/7 8 "), "! 1 2 [ 3 4 5 6 / 7 8");
    }

    #[test]
    fn tokens_split_operators_from_arguments() {
        let normalized = normalize("!#1A.8 2S3|4 5");
        assert_eq!(
            tokenize(&normalized),
            vec![
                Token::Op('!'),
                Token::Arg("#1A.8"),
                Token::Arg("2S3"),
                Token::Op('|'),
                Token::Arg("4"),
                Token::Arg("5"),
            ]
        );
    }
}
