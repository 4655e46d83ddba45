use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    SourceLocation, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    sequence::TokenSequence,
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

/// Longest string literal body accepted by the lexer.
pub const MAX_STRING_LENGTH: usize = 128;

pub type RegexHandler = fn(&mut Lexer) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Patterns only select a handler; handlers consume through the cursor so
    // that line continuations inside a lexeme are honored. Order matters.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^[ \t\r\x0C]").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_]").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\\(\\*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new("^\\(\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Unit, "()") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^;;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleSemicolon, ";;") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LogicalAnd, "&&") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LogicalOr, "||") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^(?s).").unwrap(), handler: invalid_handler },
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    pos: usize,
    line: u32,
    column: u32,
    line_begin: usize,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            pos: 0,
            line: 1,
            column: 1,
            line_begin: 0,
        }
    }
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    cursor: Cursor,
    /// Cursor as it was before the last `next`, for `put_back`.
    previous: Option<Cursor>,
    /// Where the token being scanned starts.
    start: Cursor,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            cursor: Cursor::new(),
            previous: None,
            start: Cursor::new(),
            file: file_name,
        }
    }

    /// Looks at the next character, silently consuming any `\` + newline
    /// continuations in front of it.
    pub fn peek(&mut self) -> Option<char> {
        while self.source[self.cursor.pos..].starts_with("\\\n") {
            self.cursor.pos += 2;
            self.cursor.line += 1;
            self.cursor.column = 1;
            self.cursor.line_begin = self.cursor.pos;
        }

        self.source[self.cursor.pos..].chars().next()
    }

    pub fn next(&mut self) -> Option<char> {
        let saved = self.cursor;
        let c = self.peek()?;

        self.cursor.pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
            self.cursor.line_begin = self.cursor.pos;
        } else {
            self.cursor.column += 1;
        }

        self.previous = Some(saved);
        Some(c)
    }

    /// Undoes the last `next`, including any continuation it skipped.
    pub fn put_back(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.cursor = previous;
        }
    }

    pub fn location(&self) -> SourceLocation {
        location_of(&self.cursor, &self.file)
    }

    pub fn push(&mut self, kind: TokenKind, value: String) {
        let location = location_of(&self.start, &self.file);
        self.tokens.push(MK_TOKEN!(kind, value, location));
    }

    pub fn at_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    fn begin_token(&mut self) {
        self.peek();
        self.start = self.cursor;
    }

    fn remainder(&self) -> &str {
        &self.source[self.cursor.pos..]
    }

    fn take_while(&mut self, value: &mut String, accept: fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.next();
            value.push(c);
        }
    }
}

fn location_of(cursor: &Cursor, file: &Rc<String>) -> SourceLocation {
    SourceLocation {
        file: Rc::clone(file),
        line: cursor.line,
        column: cursor.column,
        line_begin: cursor.line_begin,
    }
}

fn newline_handler(lexer: &mut Lexer) -> Result<(), Error> {
    lexer.next();
    lexer.push(TokenKind::Newline, String::from("\n"));
    Ok(())
}

fn skip_handler(lexer: &mut Lexer) -> Result<(), Error> {
    while let Some(' ' | '\t' | '\r' | '\x0C') = lexer.peek() {
        lexer.next();
    }
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let mut value = String::new();
    lexer.take_while(&mut value, |c| c.is_ascii_alphanumeric() || c == '_');

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Var);

    lexer.push(kind, value);
    Ok(())
}

// `_` and repeated `.` are accepted here and rejected when the literal is parsed.
fn number_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let mut value = String::new();
    lexer.take_while(&mut value, |c| c.is_ascii_digit() || c == '_' || c == '.');

    let kind = if value.contains('.') {
        TokenKind::Float
    } else {
        TokenKind::Int
    };

    lexer.push(kind, value);
    Ok(())
}

fn string_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.location();
    let mut value = String::from("\"");
    let mut length = 0;

    lexer.next();

    loop {
        let here = lexer.location();
        match lexer.next() {
            None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
            Some('"') => break,
            Some(c) => {
                length += 1;
                if length > MAX_STRING_LENGTH {
                    return Err(Error::new(
                        ErrorImpl::StringTooLong {
                            limit: MAX_STRING_LENGTH,
                        },
                        here,
                    ));
                }
                value.push(c);
            }
        }
    }

    value.push('"');
    lexer.push(TokenKind::String, value);
    Ok(())
}

fn comment_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.location();
    lexer.next();
    lexer.next();

    loop {
        match lexer.next() {
            None => return Err(Error::new(ErrorImpl::UnterminatedComment, start)),
            Some('*') => match lexer.next() {
                Some(')') => return Ok(()),
                Some(_) => lexer.put_back(),
                None => return Err(Error::new(ErrorImpl::UnterminatedComment, start)),
            },
            Some(_) => {}
        }
    }
}

fn invalid_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let value = lexer.next().map(String::from).unwrap_or_default();
    lexer.push(TokenKind::Invalid, value);
    Ok(())
}

/// Splits `source` into tokens. Newlines are kept as tokens and the result
/// always ends with one; the first invalid character is a fatal error.
pub fn tokenize(source: String, file: Option<String>) -> Result<TokenSequence, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        lex.begin_token();

        let handler = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()))
            .map(|pattern| pattern.handler)
            .unwrap_or(invalid_handler);

        handler(&mut lex)?;

        if let Some(token) = lex.tokens.last() {
            if token.kind == TokenKind::Invalid {
                return Err(Error::new(
                    ErrorImpl::InvalidCharacter {
                        character: token.value.clone(),
                    },
                    token.location.clone(),
                ));
            }
        }
    }

    if lex.tokens.last().map(|token| token.kind) != Some(TokenKind::Newline) {
        lex.begin_token();
        lex.push(TokenKind::Newline, String::from("\n"));
    }

    Ok(TokenSequence::new(lex.tokens, lex.file))
}
