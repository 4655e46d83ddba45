use std::{ops::Index, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    SourceLocation, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

/// Saved cursor state, see [`TokenSequence::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    overrun: usize,
}

/// Token buffer with a cursor that steps over `Newline` tokens.
///
/// Reading past the last token yields an `End` sentinel and counts the
/// overrun, so `put_back` can undo reads made at the end of input too.
#[derive(Debug, Clone)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    pos: usize,
    overrun: usize,
    eof: Token,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        let location = tokens
            .iter()
            .rev()
            .find(|token| token.kind != TokenKind::Newline)
            .map(|token| token.location.clone())
            .unwrap_or_else(|| SourceLocation::new(file));

        TokenSequence {
            tokens,
            pos: 0,
            overrun: 0,
            eof: MK_TOKEN!(TokenKind::End, String::from("EOF"), location),
        }
    }

    fn skip_newlines(&self, mut index: usize) -> usize {
        while index < self.tokens.len() && self.tokens[index].kind == TokenKind::Newline {
            index += 1;
        }
        index
    }

    pub fn peek(&self) -> &Token {
        let index = self.skip_newlines(self.pos);
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// The token after `peek`, also skipping newlines.
    pub fn peek_next(&self) -> &Token {
        let index = self.skip_newlines(self.pos);
        if index >= self.tokens.len() {
            return &self.eof;
        }
        let index = self.skip_newlines(index + 1);
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    pub fn next(&mut self) -> Token {
        let index = self.skip_newlines(self.pos);
        match self.tokens.get(index) {
            Some(token) => {
                self.pos = index + 1;
                token.clone()
            }
            None => {
                self.overrun += 1;
                self.eof.clone()
            }
        }
    }

    pub fn put_back(&mut self) {
        if self.overrun > 0 {
            self.overrun -= 1;
            return;
        }
        if self.pos == 0 {
            return;
        }

        self.pos -= 1;
        while self.pos > 0 && self.tokens[self.pos - 1].kind == TokenKind::Newline {
            self.pos -= 1;
        }
    }

    pub fn test(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn try_consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.test(kind) {
            Some(self.next())
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.test(kind) {
            return Ok(self.next());
        }

        let found = self.peek();
        let error = if found.kind == TokenKind::End {
            ErrorImpl::PrematureEnd
        } else {
            ErrorImpl::UnexpectedToken {
                expected: kind.to_string(),
                found: found.to_string(),
            }
        };

        Err(Error::new(error, found.location.clone()))
    }

    pub fn mark(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            overrun: self.overrun,
        }
    }

    pub fn reset_to(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.overrun = checkpoint.overrun;
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether only newlines (or nothing) remain before the end.
    pub fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::End
    }

    /// Whether the token at `index` is the first one on its line.
    pub fn is_begin_of_line(&self, index: usize) -> bool {
        if index >= self.tokens.len() {
            return false;
        }

        match index.checked_sub(1) {
            None => true,
            Some(prev) => self
                .tokens
                .get(prev)
                .is_some_and(|token| token.kind == TokenKind::Newline),
        }
    }

    /// All tokens that start on `line`, newlines excluded.
    pub fn get_line(&self, line: u32) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|token| token.location.line == line && token.kind != TokenKind::Newline)
            .collect()
    }

    /// Last token of the stream that is not a newline.
    pub fn back(&self) -> Option<&Token> {
        self.tokens
            .iter()
            .rev()
            .find(|token| token.kind != TokenKind::Newline)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}
