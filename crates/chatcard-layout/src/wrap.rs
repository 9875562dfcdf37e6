//! Greedy line packing

use crate::token::Token;

/// One visual line of body text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub tokens: Vec<Token>,
    pub width: f32,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(&mut self, token: Token) {
        self.width += token.width;
        self.tokens.push(token);
    }
}

/// Pack tokens into lines no wider than `max_width`.
///
/// A token that fits nowhere still gets a line of its own. The result always
/// has at least one line, so an empty paragraph keeps its vertical space.
pub fn pack_lines(tokens: Vec<Token>, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();

    for token in tokens {
        if !current.is_empty() && current.width + token.width > max_width {
            lines.push(std::mem::take(&mut current));
        }
        current.push(token);
    }

    lines.push(current);
    lines
}
