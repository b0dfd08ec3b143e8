//! Markup front end: source text to a node tree.

mod entities;
mod lexer;
mod node;
mod parser;

#[cfg(test)]
mod lexer_tests;

pub use entities::decode as decode_entities;
pub use lexer::{RAW_TEXT_ELEMENTS, Token, TokenKind, lex, token_text};
pub use node::{Attribute, Element, Node, OtherKind};
pub use parser::parse;

use crate::diagnostics::Diagnostics;

/// Elements that never have children or a close tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// A parsed markup document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    diagnostics: Diagnostics,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let (nodes, diagnostics) = parse(source);
        Self { nodes, diagnostics }
    }

    /// Wrap a tree built in code.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Parse diagnostics.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// First element, depth-first, matching `#id` or a tag name.
    ///
    /// A `<template>` element's children are its content, so the template
    /// to compile is `select(..)?.children`.
    pub fn select(&self, selector: &str) -> Option<&Element> {
        let selector = Selector::parse(selector)?;
        find(&self.nodes, &selector)
    }
}

enum Selector<'a> {
    Id(&'a str),
    Tag(String),
}

impl<'a> Selector<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix('#') {
            Some("") => None,
            Some(id) => Some(Self::Id(id)),
            None => Some(Self::Tag(raw.to_ascii_lowercase())),
        }
    }

    fn matches(&self, el: &Element) -> bool {
        match self {
            Self::Id(id) => el.get_attribute("id") == Some(*id),
            Self::Tag(tag) => el.name == *tag,
        }
    }
}

/// Pre-order search with an explicit stack.
fn find<'n>(nodes: &'n [Node], selector: &Selector<'_>) -> Option<&'n Element> {
    let mut stack: Vec<&'n Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        let Some(el) = node.as_element() else {
            continue;
        };
        if selector.matches(el) {
            return Some(el);
        }
        stack.extend(el.children.iter().rev());
    }
    None
}
