use std::fmt::Display;

use thiserror::Error;

use crate::SourceLocation;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    location: SourceLocation,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: SourceLocation) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnterminatedString
            | ErrorImpl::StringTooLong { .. }
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::InvalidCharacter { .. } => ErrorCategory::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedExpression { .. }
            | ErrorImpl::PrematureEnd => ErrorCategory::Syntax,
            ErrorImpl::UndefinedVar { .. } => ErrorCategory::Scope,
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::UnexpectedType { .. }
            | ErrorImpl::ArityMismatch { .. }
            | ErrorImpl::NotAFunction { .. }
            | ErrorImpl::IntOutOfRange { .. }
            | ErrorImpl::InvalidFloat { .. } => ErrorCategory::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::StringTooLong { .. } => "StringTooLong",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedExpression { .. } => "UnexpectedExpression",
            ErrorImpl::PrematureEnd => "PrematureEnd",
            ErrorImpl::UndefinedVar { .. } => "UndefinedVar",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::UnexpectedType { .. } => "UnexpectedType",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::IntOutOfRange { .. } => "IntOutOfRange",
            ErrorImpl::InvalidFloat { .. } => "InvalidFloat",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::StringTooLong { limit } => ErrorTip::Suggestion(format!(
                "string literals hold at most {} characters",
                limit
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("did you forget a closing `\"`?"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("close the comment with `*)`"))
            }
            ErrorImpl::UnexpectedToken { expected, .. } if expected == ";;" => {
                ErrorTip::Suggestion(String::from("statements end with `;;`"))
            }
            ErrorImpl::UndefinedVar { name } => ErrorTip::Suggestion(format!(
                "if `{}` refers to the function being defined, declare it with `let rec`",
                name
            )),
            ErrorImpl::ArityMismatch { name, expected, .. } => ErrorTip::Suggestion(format!(
                "`{}` takes {} argument(s)",
                name, expected
            )),
            ErrorImpl::IntOutOfRange { literal } => ErrorTip::Suggestion(format!(
                "`{}` does not fit in a 64-bit integer",
                literal
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: error: {}", self.location, self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Syntax,
    Scope,
    Type,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated string literal, more than {limit} char")]
    StringTooLong { limit: usize },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid character `{character}`")]
    InvalidCharacter { character: String },
    #[error("Token `{expected}` expected, but got `{found}`")]
    UnexpectedToken { expected: String, found: String },
    #[error("expression expected, but got `{found}`")]
    UnexpectedExpression { found: String },
    #[error("premature end of input")]
    PrematureEnd,
    #[error("undefined var `{name}`")]
    UndefinedVar { name: String },
    #[error("Type `{expected}` expected, but got `{found}`")]
    TypeMismatch { expected: String, found: String },
    #[error("Unexpected type `{found}` found here")]
    UnexpectedType { found: String },
    #[error("function `{name}` expects {expected} argument(s), but got {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("`{name}` is not a function")]
    NotAFunction { name: String },
    #[error("int out of range")]
    IntOutOfRange { literal: String },
    #[error("invalid float literal `{literal}`")]
    InvalidFloat { literal: String },
}
