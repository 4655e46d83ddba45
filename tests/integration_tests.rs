//! Integration tests for the whole front end.
//!
//! These run source text through tokenization and parsing (with inline
//! scope resolution and type checking) and inspect the result or the
//! rendered diagnostic.

use leoml::{
    ast::statements::StmtKind,
    compile_source, display_error,
    errors::errors::ErrorCategory,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::types::Kind,
};

const PROGRAM: &str = "\
(* integer helpers *)
let rec fact(n) = if n <= 1 then 1 else n * fact(n - 1) ;;

let scale(x) =
  x * 2.5 ;;

let half(x) = x / 2.0 ;;

let limit = 10 and greeting = \"hello\" ;;

let total = fact(5) + limit ;;

half 3.0 ;;

let i = 0 in
  while i < limit do
    i + 1
  done ;;

(fst (total, greeting), snd (total, greeting)) ;;
";

#[test]
fn test_compile_program() {
    let program = compile_source(PROGRAM.to_string(), Some("main.ml".to_string())).unwrap();

    assert_eq!(program.stmts.len(), 9);
    assert_eq!(program.find("fact").unwrap().type_name(), "int -> int");
    assert_eq!(program.find("scale").unwrap().type_name(), "float -> float");
    assert_eq!(program.find("half").unwrap().type_name(), "float -> float");
    assert_eq!(program.find("total").unwrap().ty.kind(), Some(Kind::Int));
    assert_eq!(program.find("greeting").unwrap().ty.kind(), Some(Kind::String));

    match &program.stmts[6].kind {
        StmtKind::Exp(exp) => {
            assert!(exp.head.is_some());
            assert_eq!(exp.ty.kind(), Some(Kind::Float));
        }
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_tokenize_then_parse() {
    let tokens = tokenize(PROGRAM.to_string(), Some("main.ml".to_string())).unwrap();
    assert!(!tokens.is_empty());

    let program = parse(tokens).unwrap();
    let dump = program.dump().unwrap();

    assert!(dump.contains("+ func rec [int -> int]"));
    assert!(dump.contains("| fun half : float -> float"));
    assert!(dump.contains("+ while [int]"));
}

#[test]
fn test_type_error_diagnostic() {
    let source = "let x = 1 ;;\nlet y = x + 1.0 ;;\n";
    let error = compile_source(source.to_string(), Some("main.ml".to_string())).unwrap_err();

    assert_eq!(error.get_category(), ErrorCategory::Type);

    let rendered = display_error(&error, source);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines[0],
        "main.ml:2:13: error: Type `int` expected, but got `float`"
    );
    assert_eq!(lines[1], "let y = x + 1.0 ;;");
    assert_eq!(lines[2], "            ^");
}

#[test]
fn test_scope_error_diagnostic() {
    let source = "let f(n) =\n    n + g(n) ;;\n";
    let error = compile_source(source.to_string(), Some("main.ml".to_string())).unwrap_err();

    assert_eq!(error.get_category(), ErrorCategory::Scope);

    let rendered = display_error(&error, source);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "main.ml:2:9: error: undefined var `g`");
    assert_eq!(lines[1], "n + g(n) ;;");
    assert_eq!(lines[2], "    ^");
}

#[test]
fn test_lex_error_stops_compilation() {
    let source = "let s = \"never closed ;;\n";
    let error = compile_source(source.to_string(), None).unwrap_err();

    assert_eq!(error.get_category(), ErrorCategory::Lex);
    assert_eq!(error.to_string(), "shell:1:9: error: unterminated string literal");
}

#[test]
fn test_continued_lines_report_physical_location() {
    let source = "let total = 1 + \\\n  true ;;\n";
    let error = compile_source(source.to_string(), Some("main.ml".to_string())).unwrap_err();

    assert_eq!(error.get_location().line, 2);
    assert_eq!(error.get_location().column, 3);

    let rendered = display_error(&error, source);
    assert!(rendered.lines().nth(1) == Some("true ;;"));
}
