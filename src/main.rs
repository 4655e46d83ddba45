use std::{env, fs::read_to_string, path::Path, process, time::Instant};

use leoml::{
    display_error,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
};

#[derive(PartialEq)]
enum Mode {
    Tokens,
    Tree,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let (mode, file_path) = match args.as_slice() {
        [_, path] => (Mode::Tree, path),
        [_, flag, path] if flag == "-p" => (Mode::Tree, path),
        [_, flag, path] if flag == "-l" => (Mode::Tokens, path),
        _ => {
            eprintln!("usage: leoml [-l | -p] <file>");
            process::exit(2);
        }
    };

    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let tokens = match tokenize(file_contents.clone(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => fail(&error, &file_contents),
    };
    eprintln!("Tokenized in {:?}", start.elapsed());

    if mode == Mode::Tokens {
        for (index, token) in tokens.iter().enumerate() {
            if tokens.is_begin_of_line(index) {
                print!("{:>4} | ", token.location.line);
            }
            if token.kind == TokenKind::Newline {
                println!();
            } else {
                print!("{} ", token.debug());
            }
        }
        return;
    }

    let parse_start = Instant::now();
    let program = match parse(tokens) {
        Ok(program) => program,
        Err(error) => fail(&error, &file_contents),
    };
    eprintln!("Parsed in {:?}", parse_start.elapsed());

    match program.dump() {
        Ok(tree) => print!("{}", tree),
        Err(error) => {
            eprintln!("Failed to write the tree: {}", error);
            process::exit(1);
        }
    }
    eprintln!("Total time: {:?}", start.elapsed());
}

fn fail(error: &Error, source: &str) -> ! {
    eprintln!("{}", display_error(error, source));
    process::exit(1);
}
