use std::{collections::HashMap, rc::Rc};

use crate::lexer::tokens::Token;

use super::symbol::Symbol;

/// Suffix that keeps tag entries apart from ordinary names. Identifiers
/// cannot contain `@`, so a tag never shadows a variable.
const TAG_SUFFIX: &str = "@:tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    File,
    Block,
    Func,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    parent: Option<ScopeId>,
    bindings: HashMap<String, Rc<Symbol>>,
}

/// Owns every scope of a program. Parents are stored as ids.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

fn tag_name(name: &str) -> String {
    format!("{}{}", name, TAG_SUFFIX)
}

fn is_tag_name(name: &str) -> bool {
    name.ends_with(TAG_SUFFIX)
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena::default()
    }

    pub fn create(&mut self, kind: ScopeKind, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            kind,
            parent,
            bindings: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes[id.0].parent
    }

    pub fn set_parent(&mut self, id: ScopeId, parent: Option<ScopeId>) {
        self.scopes[id.0].parent = parent;
    }

    /// Binds the symbol's name in `id`, replacing an existing binding.
    pub fn insert(&mut self, id: ScopeId, symbol: Rc<Symbol>) {
        self.scopes[id.0]
            .bindings
            .insert(symbol.name.clone(), symbol);
    }

    /// Looks `name` up in `id` and its ancestors, stopping after the first
    /// file scope.
    pub fn find(&self, id: ScopeId, name: &str) -> Option<Rc<Symbol>> {
        let mut current = Some(id);

        while let Some(scope_id) = current {
            let scope = &self.scopes[scope_id.0];
            if let Some(symbol) = scope.bindings.get(name) {
                return Some(Rc::clone(symbol));
            }
            if scope.kind == ScopeKind::File {
                break;
            }
            current = scope.parent;
        }

        None
    }

    pub fn find_token(&self, id: ScopeId, token: &Token) -> Option<Rc<Symbol>> {
        self.find(id, &token.value)
    }

    pub fn find_in_current(&self, id: ScopeId, name: &str) -> Option<Rc<Symbol>> {
        self.scopes[id.0].bindings.get(name).cloned()
    }

    /// Copies the bindings of `from` into `into`, keeping names `into`
    /// already binds.
    pub fn append(&mut self, from: ScopeId, into: ScopeId) {
        if from == into {
            return;
        }

        let bindings: Vec<(String, Rc<Symbol>)> = self.scopes[from.0]
            .bindings
            .iter()
            .map(|(name, symbol)| (name.clone(), Rc::clone(symbol)))
            .collect();

        let target = &mut self.scopes[into.0].bindings;
        for (name, symbol) in bindings {
            target.entry(name).or_insert(symbol);
        }
    }

    pub fn insert_tag(&mut self, id: ScopeId, symbol: Rc<Symbol>) {
        self.scopes[id.0]
            .bindings
            .insert(tag_name(&symbol.name), symbol);
    }

    pub fn find_tag(&self, id: ScopeId, name: &str) -> Option<Rc<Symbol>> {
        self.find(id, &tag_name(name))
    }

    pub fn find_tag_in_current(&self, id: ScopeId, name: &str) -> Option<Rc<Symbol>> {
        self.find_in_current(id, &tag_name(name))
    }

    /// Every tag bound directly in `id`, sorted by name.
    pub fn all_tags_in_current(&self, id: ScopeId) -> Vec<Rc<Symbol>> {
        let mut tags: Vec<Rc<Symbol>> = self.scopes[id.0]
            .bindings
            .iter()
            .filter(|(name, _)| is_tag_name(name))
            .map(|(_, symbol)| Rc::clone(symbol))
            .collect();

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    /// `name [type]` for every ordinary binding of `id`, sorted by name.
    pub fn dump(&self, id: ScopeId) -> Vec<String> {
        let mut lines: Vec<(String, String)> = self.scopes[id.0]
            .bindings
            .iter()
            .filter(|(name, _)| !is_tag_name(name))
            .map(|(name, symbol)| (name.clone(), format!("{} [{}]", name, symbol.type_name())))
            .collect();

        lines.sort();
        lines.into_iter().map(|(_, line)| line).collect()
    }
}
