use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::SourceLocation;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("rec", TokenKind::Rec);
        map.insert("and", TokenKind::And);
        map.insert("in", TokenKind::In);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("done", TokenKind::Done);
        map.insert("fst", TokenKind::Fst);
        map.insert("snd", TokenKind::Snd);
        map.insert("true", TokenKind::Bool);
        map.insert("false", TokenKind::Bool);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    End,
    Newline,
    Invalid,

    Var,
    Int,
    Float,
    Bool,
    String,
    Unit, // ()

    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    DoubleSemicolon,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    LogicalAnd, // &&
    LogicalOr,  // ||

    Plus,
    Dash,
    Star,
    Slash,

    // Reserved
    Let,
    Rec,
    And,
    In,
    If,
    Then,
    Else,
    While,
    Do,
    Done,
    Fst,
    Snd,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::End => "end of input",
            TokenKind::Newline => "newline",
            TokenKind::Invalid => "invalid",
            TokenKind::Var => "identifier",
            TokenKind::Int => "int literal",
            TokenKind::Float => "float literal",
            TokenKind::Bool => "bool literal",
            TokenKind::String => "string literal",
            TokenKind::Unit => "()",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::DoubleSemicolon => ";;",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LogicalAnd => "&&",
            TokenKind::LogicalOr => "||",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Let => "let",
            TokenKind::Rec => "rec",
            TokenKind::And => "and",
            TokenKind::In => "in",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Done => "done",
            TokenKind::Fst => "fst",
            TokenKind::Snd => "snd",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: SourceLocation,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::End | TokenKind::Newline => write!(f, "{}", self.kind),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// One-line description used by the token dump.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::Var,
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Bool,
            TokenKind::String,
        ]) {
            format!("{:?}({})", self.kind, self.value)
        } else {
            format!("{:?}", self.kind)
        }
    }
}
