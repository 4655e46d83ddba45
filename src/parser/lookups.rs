use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::expressions::Expb, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Binary operator precedence, lowest first. `;` and the `if`/`while`/`let`
/// prefix forms bind looser than all of these.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Relational,
    Additive,
    Multiplicative,
}

pub type NUDHandler = fn(&mut Parser) -> Result<Expb, Error>;

lazy_static! {
    pub static ref BP_LOOKUP: HashMap<TokenKind, BindingPower> = {
        let mut map = HashMap::new();

        // Logical
        map.insert(TokenKind::LogicalOr, BindingPower::LogicalOr);
        map.insert(TokenKind::LogicalAnd, BindingPower::LogicalAnd);

        // Relational
        map.insert(TokenKind::Less, BindingPower::Relational);
        map.insert(TokenKind::LessEquals, BindingPower::Relational);
        map.insert(TokenKind::Greater, BindingPower::Relational);
        map.insert(TokenKind::GreaterEquals, BindingPower::Relational);
        map.insert(TokenKind::Equals, BindingPower::Relational);
        map.insert(TokenKind::NotEquals, BindingPower::Relational);

        // Additive and multiplicative
        map.insert(TokenKind::Plus, BindingPower::Additive);
        map.insert(TokenKind::Dash, BindingPower::Additive);
        map.insert(TokenKind::Star, BindingPower::Multiplicative);
        map.insert(TokenKind::Slash, BindingPower::Multiplicative);
        map
    };

    pub static ref NUD_LOOKUP: HashMap<TokenKind, NUDHandler> = {
        let mut map: HashMap<TokenKind, NUDHandler> = HashMap::new();

        // Literals and names
        map.insert(TokenKind::Var, parse_var_expr);
        map.insert(TokenKind::Int, parse_constant_expr);
        map.insert(TokenKind::Float, parse_constant_expr);
        map.insert(TokenKind::Bool, parse_constant_expr);
        map.insert(TokenKind::String, parse_constant_expr);
        map.insert(TokenKind::Unit, parse_constant_expr);

        map.insert(TokenKind::Plus, parse_prefix_expr);
        map.insert(TokenKind::Dash, parse_prefix_expr);
        map.insert(TokenKind::OpenParen, parse_grouping_expr);
        map.insert(TokenKind::Fst, parse_projection_expr);
        map.insert(TokenKind::Snd, parse_projection_expr);

        map.insert(TokenKind::If, parse_if_expr);
        map.insert(TokenKind::While, parse_while_expr);
        map.insert(TokenKind::Let, parse_let_expr);
        map
    };
}

/// Precedence of `kind` when it is a binary operator.
pub fn binary_power(kind: TokenKind) -> Option<BindingPower> {
    BP_LOOKUP.get(&kind).copied()
}

/// Whether `kind` can start an argument of an application chain `f a b`.
pub fn starts_argument(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Var
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Bool
            | TokenKind::String
            | TokenKind::Fst
            | TokenKind::Snd
    )
}
