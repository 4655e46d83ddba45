//! Unit tests for the scope arena.

use std::rc::Rc;

use crate::{
    lexer::tokens::{Token, TokenKind},
    type_checker::types::{Kind, TFunc, Type},
    SourceLocation,
};

use super::{
    scope::{ScopeArena, ScopeKind},
    symbol::Symbol,
};

fn token(name: &str) -> Token {
    Token {
        kind: TokenKind::Var,
        value: name.to_string(),
        location: SourceLocation::new(Rc::new("test.ml".to_string())),
    }
}

#[test]
fn test_find_walks_parents() {
    let mut scopes = ScopeArena::new();
    let file = scopes.create(ScopeKind::File, None);
    let block = scopes.create(ScopeKind::Block, Some(file));
    let func = scopes.create(ScopeKind::Func, Some(block));

    scopes.insert(file, Symbol::var(&token("x"), Type::of(Kind::Int)));

    let found = scopes.find(func, "x").unwrap();
    assert_eq!(found.ty.kind(), Some(Kind::Int));
    assert!(scopes.find_in_current(func, "x").is_none());
    assert!(scopes.find(func, "y").is_none());
    assert!(scopes.find_token(func, &token("x")).is_some());
}

#[test]
fn test_find_stops_at_file_scope() {
    let mut scopes = ScopeArena::new();
    let outer = scopes.create(ScopeKind::Block, None);
    let file = scopes.create(ScopeKind::File, Some(outer));

    scopes.insert(outer, Symbol::var(&token("hidden"), Type::unknown()));

    assert!(scopes.find(file, "hidden").is_none());
}

#[test]
fn test_insert_shadows_in_same_scope() {
    let mut scopes = ScopeArena::new();
    let file = scopes.create(ScopeKind::File, None);

    scopes.insert(file, Symbol::var(&token("x"), Type::of(Kind::Int)));
    scopes.insert(file, Symbol::var(&token("x"), Type::of(Kind::Bool)));

    assert_eq!(scopes.find(file, "x").unwrap().ty.kind(), Some(Kind::Bool));
}

#[test]
fn test_append_keeps_existing_bindings() {
    let mut scopes = ScopeArena::new();
    let file = scopes.create(ScopeKind::File, None);
    let inner = scopes.create(ScopeKind::Block, Some(file));

    scopes.insert(file, Symbol::var(&token("x"), Type::of(Kind::Int)));
    scopes.insert(inner, Symbol::var(&token("x"), Type::of(Kind::Bool)));
    scopes.insert(inner, Symbol::var(&token("y"), Type::of(Kind::Float)));

    scopes.append(inner, file);

    assert_eq!(scopes.find(file, "x").unwrap().ty.kind(), Some(Kind::Int));
    assert_eq!(scopes.find(file, "y").unwrap().ty.kind(), Some(Kind::Float));
    assert_eq!(scopes.dump(file), vec!["x [int]", "y [float]"]);
}

#[test]
fn test_set_parent() {
    let mut scopes = ScopeArena::new();
    let file = scopes.create(ScopeKind::File, None);
    let orphan = scopes.create(ScopeKind::Block, None);

    scopes.insert(file, Symbol::var(&token("x"), Type::unknown()));
    assert!(scopes.find(orphan, "x").is_none());

    scopes.set_parent(orphan, Some(file));
    assert_eq!(scopes.parent(orphan), Some(file));
    assert!(scopes.find(orphan, "x").is_some());
    assert_eq!(scopes.len(), 2);
}

#[test]
fn test_tags_are_separate_from_names() {
    let mut scopes = ScopeArena::new();
    let file = scopes.create(ScopeKind::File, None);
    let block = scopes.create(ScopeKind::Block, Some(file));

    let add = Symbol::func(&token("add"), Rc::new(TFunc::new(2)));
    let mul = Symbol::func(&token("mul"), Rc::new(TFunc::new(2)));
    scopes.insert_tag(file, Rc::clone(&mul));
    scopes.insert_tag(file, Rc::clone(&add));

    assert!(scopes.find(file, "add").is_none());
    assert!(scopes.find_tag(block, "add").is_some());
    assert!(scopes.find_tag_in_current(block, "add").is_none());
    assert!(scopes.find_tag_in_current(file, "mul").is_some());

    let names: Vec<String> = scopes
        .all_tags_in_current(file)
        .iter()
        .map(|symbol| symbol.name.clone())
        .collect();
    assert_eq!(names, vec!["add", "mul"]);
    assert!(scopes.dump(file).is_empty());
}
