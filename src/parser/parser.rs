//! Parser state and entry point.
//!
//! The parser is a recursive descent parser with precedence climbing for
//! binary operators. Scope resolution and type checking happen inline: every
//! node is resolved and checked as soon as its children are parsed.
//!
//! It keeps:
//! - the token cursor, with mark/reset for one speculative step
//! - the scope arena and the scope new names are bound in

use std::rc::Rc;

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        sequence::{Checkpoint, TokenSequence},
        tokens::{Token, TokenKind},
    },
    scope::{
        scope::{ScopeArena, ScopeId, ScopeKind},
        symbol::Symbol,
    },
};

use super::stmt::parse_stmt;

pub struct Parser {
    /// The token cursor
    tokens: TokenSequence,
    /// Every scope created so far
    scopes: ScopeArena,
    /// Scope new bindings go into
    scope: ScopeId,
    /// The root scope of the file
    file: ScopeId,
}

impl Parser {
    pub fn new(tokens: TokenSequence) -> Self {
        let mut scopes = ScopeArena::new();
        let file = scopes.create(ScopeKind::File, None);

        Parser {
            tokens,
            scopes,
            scope: file,
            file,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.peek()
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.peek().kind
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Token {
        self.tokens.next()
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.tokens.expect(expected_kind)
    }

    pub fn try_consume(&mut self, kind: TokenKind) -> Option<Token> {
        self.tokens.try_consume(kind)
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.at_end()
    }

    pub fn mark(&self) -> Checkpoint {
        self.tokens.mark()
    }

    pub fn reset_to(&mut self, checkpoint: Checkpoint) {
        self.tokens.reset_to(checkpoint)
    }

    /// The error for a token that cannot start an expression.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        let error = if token.kind == TokenKind::End {
            ErrorImpl::PrematureEnd
        } else {
            ErrorImpl::UnexpectedExpression {
                found: token.to_string(),
            }
        };

        Error::new(error, token.location.clone())
    }

    pub fn current_scope(&self) -> ScopeId {
        self.scope
    }

    pub fn file_scope(&self) -> ScopeId {
        self.file
    }

    /// Opens a scope nested in the current one and makes it current.
    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scope = self.scopes.create(kind, Some(self.scope));
        self.scope
    }

    /// Makes the parent of the current scope current again.
    pub fn leave_scope(&mut self) {
        if let Some(parent) = self.scopes.parent(self.scope) {
            self.scope = parent;
        }
    }

    /// Copies the bindings of a finished scope into the current one,
    /// keeping names the current scope already binds.
    pub fn append_to_current(&mut self, from: ScopeId) {
        self.scopes.append(from, self.scope);
    }

    pub fn define(&mut self, symbol: Rc<Symbol>) {
        self.scopes.insert(self.scope, symbol);
    }

    pub fn define_in(&mut self, scope: ScopeId, symbol: Rc<Symbol>) {
        self.scopes.insert(scope, symbol);
    }

    pub fn define_tag_in(&mut self, scope: ScopeId, symbol: Rc<Symbol>) {
        self.scopes.insert_tag(scope, symbol);
    }

    /// Finds the symbol a name token refers to.
    pub fn resolve(&self, token: &Token) -> Result<Rc<Symbol>, Error> {
        self.scopes.find_token(self.scope, token).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedVar {
                    name: token.value.clone(),
                },
                token.location.clone(),
            )
        })
    }
}

/// Parses a token stream into a type-checked program, stopping at the first
/// error.
pub fn parse(tokens: TokenSequence) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens);
    let mut stmts = vec![];

    while parser.has_tokens() {
        if parser.try_consume(TokenKind::DoubleSemicolon).is_some() {
            continue;
        }
        stmts.extend(parse_stmt(&mut parser)?);
    }

    Ok(Program {
        stmts,
        scope: parser.file,
        scopes: parser.scopes,
    })
}
