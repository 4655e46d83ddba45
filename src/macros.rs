//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed punctuation

/// Creates a Token instance.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $location:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            location: $location,
        }
    };
}

/// Creates a lexer handler for a fixed lexeme.
///
/// The handler consumes the lexeme one character at a time through the
/// lexer cursor and pushes a token of the given kind.
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer| {
            for _ in $value.chars() {
                lexer.next();
            }
            lexer.push($kind, String::from($value));
            Ok(())
        }
    };
}
