// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Bracket/Quote Scanner
//!
//! Single-pass classifier over SQL text. For every character it reports the
//! quote and parenthesis state before and after that character.
//!
//! - A single quote toggles the single-quoted state unless a double-quoted
//!   span is open, and vice versa.
//! - Parentheses inside either quote kind are not counted.
//! - A `)` that would take the nesting level below zero yields
//!   [`RewriteError::MalformedParens`] and ends the scan.
//! - At end of input, an open quote yields [`RewriteError::UnbalancedQuotes`]
//!   and an unclosed `(` yields [`RewriteError::MalformedParens`].
//!
//! A doubled quote (`'it''s'`) closes and reopens the span, which leaves the
//! state correct on both sides of it.

use std::str::CharIndices;

use crate::error::{RewriteError, RewriteResult};

/// Quote and nesting state at a point in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanState {
    pub in_single_quote: bool,
    pub in_double_quote: bool,
    pub nesting_level: usize,
}

impl ScanState {
    pub fn in_quote(&self) -> bool {
        self.in_single_quote || self.in_double_quote
    }
}

/// One classified character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    /// Character index
    pub position: usize,
    /// Byte offset of the character
    pub byte_offset: usize,
    pub ch: char,
    /// State before the character is applied
    pub before: ScanState,
    /// State after the character is applied
    pub after: ScanState,
}

impl Scanned {
    /// The character is a counted `)`
    pub fn closes_group(&self) -> bool {
        self.after.nesting_level < self.before.nesting_level
    }

    /// Outside every quote and parenthesis, on both sides of the character
    pub fn is_top_level(&self) -> bool {
        self.before.nesting_level == 0
            && self.after.nesting_level == 0
            && !self.before.in_quote()
            && !self.after.in_quote()
    }
}

/// Iterator over the classified characters of a SQL string
pub struct Scanner<'a> {
    chars: CharIndices<'a>,
    position: usize,
    state: ScanState,
    quote_opened_at: usize,
    open_parens: Vec<usize>,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            chars: sql.char_indices(),
            position: 0,
            state: ScanState::default(),
            quote_opened_at: 0,
            open_parens: Vec::new(),
            finished: false,
        }
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    fn finish(&mut self) -> Option<RewriteResult<Scanned>> {
        self.finished = true;
        if self.state.in_quote() {
            return Some(Err(RewriteError::UnbalancedQuotes {
                position: self.quote_opened_at,
            }));
        }
        self.open_parens
            .last()
            .map(|&position| Err(RewriteError::MalformedParens { position }))
    }
}

impl Iterator for Scanner<'_> {
    type Item = RewriteResult<Scanned>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some((byte_offset, ch)) = self.chars.next() else {
            return self.finish();
        };

        let position = self.position;
        let before = self.state;
        match ch {
            '(' if !before.in_quote() => {
                self.state.nesting_level += 1;
                self.open_parens.push(position);
            }
            ')' if !before.in_quote() => {
                if self.state.nesting_level == 0 {
                    self.finished = true;
                    return Some(Err(RewriteError::MalformedParens { position }));
                }
                self.state.nesting_level -= 1;
                self.open_parens.pop();
            }
            '\'' if !before.in_double_quote => {
                self.state.in_single_quote = !self.state.in_single_quote;
                if self.state.in_single_quote {
                    self.quote_opened_at = position;
                }
            }
            '"' if !before.in_single_quote => {
                self.state.in_double_quote = !self.state.in_double_quote;
                if self.state.in_double_quote {
                    self.quote_opened_at = position;
                }
            }
            _ => {}
        }
        self.position += 1;

        Some(Ok(Scanned {
            position,
            byte_offset,
            ch,
            before,
            after: self.state,
        }))
    }
}
