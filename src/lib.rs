#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// Where a token starts. `line` and `column` are 1-based, `column` counts
/// characters; `line_begin` is the byte offset of the physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Rc<String>,
    pub line: u32,
    pub column: u32,
    pub line_begin: usize,
}

impl SourceLocation {
    pub fn new(file: Rc<String>) -> Self {
        SourceLocation {
            file,
            line: 1,
            column: 1,
            line_begin: 0,
        }
    }

    pub fn null() -> Self {
        SourceLocation::new(Rc::new(String::from("<null>")))
    }

    /// Byte offset of the first character this location points at.
    pub fn begin(&self, source: &str) -> usize {
        let line = source.get(self.line_begin..).unwrap_or("");
        line.char_indices()
            .nth(self.column.saturating_sub(1) as usize)
            .map(|(offset, _)| self.line_begin + offset)
            .unwrap_or(self.line_begin + line.len())
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Returns the line number, the text of the physical line (without its
/// newline) and the 0-based character column of `location` in `source`.
pub fn get_line_at_location(source: &str, location: &SourceLocation) -> (u32, String, usize) {
    let rest = source.get(location.line_begin..).unwrap_or("");
    let line = rest.split('\n').next().unwrap_or("").trim_end_matches('\r');

    (
        location.line,
        line.to_string(),
        location.column.saturating_sub(1) as usize,
    )
}

/// Tokenizes and parses one source file.
pub fn compile_source(source: String, file: Option<String>) -> Result<Program, Error> {
    let tokens = tokenize(source, file)?;
    parse(tokens)
}

/// Renders a diagnostic for `error`:
///
/// ```text
/// main.ml:3:9: error: Type `int` expected, but got `float`
/// let y = x + 1.0
///             ^
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let (_, line_text, column) = get_line_at_location(source, error.get_location());
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);

    let mut rendered = format!("{}\n{}\n", error, line_text_removed);
    rendered.push_str(&" ".repeat(column.saturating_sub(removed_whitespace)));
    rendered.push('^');

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        rendered.push_str(&format!("\nhelp: {}", tip));
    }

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        SourceLocation,
    };

    fn location(line: u32, column: u32, line_begin: usize) -> SourceLocation {
        SourceLocation {
            file: Rc::new(String::from("test.ml")),
            line,
            column,
            line_begin,
        }
    }

    #[test]
    fn test_get_line_at_location() {
        let source = "let x = 1\n  let y = x\n";

        let (line, text, column) = super::get_line_at_location(source, &location(1, 5, 0));
        assert_eq!(line, 1);
        assert_eq!(text, "let x = 1");
        assert_eq!(column, 4);

        let (line, text, column) = super::get_line_at_location(source, &location(2, 7, 10));
        assert_eq!(line, 2);
        assert_eq!(text, "  let y = x");
        assert_eq!(column, 6);
    }

    #[test]
    fn test_location_begin() {
        let source = "let x = 1\nlet é = y\n";
        assert_eq!(location(1, 5, 0).begin(source), 4);
        assert_eq!(location(2, 9, 10).begin(source), 19);
    }

    #[test]
    fn test_display_error_places_caret() {
        let source = "let x = 1 ;;\n    x + true ;;\n";
        let error = Error::new(
            ErrorImpl::TypeMismatch {
                expected: String::from("int"),
                found: String::from("bool"),
            },
            location(2, 9, 13),
        );

        let rendered = super::display_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "test.ml:2:9: error: Type `int` expected, but got `bool`");
        assert_eq!(lines[1], "x + true ;;");
        assert_eq!(lines[2], "    ^");
    }
}
