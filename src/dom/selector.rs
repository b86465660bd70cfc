//! Selector engine
//!
//! Parses and matches the selector subset the bridge itself emits and hosts
//! echo back: tag / `#id` / `.class` / `[attr="value"]` compounds joined by
//! descendant or `>` child combinators.

use super::document::Document;
use super::node::NodeId;
use crate::{Error, Result};
use std::iter::Peekable;
use std::str::Chars;

/// Combinator between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Attribute matcher: `[name]` or `[name="value"]`
#[derive(Debug, Clone)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector: optional tag plus id/class/attribute constraints
#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && doc.tag(node) != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        for class in &self.classes {
            if !doc.has_class(node, class) {
                return false;
            }
        }
        for attr in &self.attrs {
            match (&attr.value, doc.attribute(node, &attr.name)) {
                (Some(expected), Some(actual)) if expected == actual => {}
                (None, Some(_)) => {}
                _ => return false,
            }
        }
        true
    }
}

/// A parsed selector
#[derive(Debug, Clone)]
pub struct Selector {
    /// Compounds left-to-right; each entry carries the combinator linking it
    /// to the compound on its left (the first entry's combinator is unused).
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// Unsupported syntax (selector lists, pseudo-classes, sibling
    /// combinators) is a parse error, which callers treat per the bridge's
    /// resolution-failure rules rather than propagating.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::selector("empty selector"));
        }

        let mut chars = trimmed.chars().peekable();
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;

        loop {
            let compound = parse_compound(&mut chars, input)?;
            parts.push((combinator, compound));

            skip_whitespace(&mut chars);
            match chars.peek() {
                None => break,
                Some('>') => {
                    chars.next();
                    skip_whitespace(&mut chars);
                    combinator = Combinator::Child;
                }
                Some(_) => {
                    combinator = Combinator::Descendant;
                }
            }
        }

        Ok(Self { parts })
    }

    /// Whether the selector matches a node in the given document
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.matches_at(doc, node, self.parts.len() - 1)
    }

    fn matches_at(&self, doc: &Document, node: NodeId, idx: usize) -> bool {
        let (_, compound) = &self.parts[idx];
        if !compound.matches(doc, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let combinator = self.parts[idx].0;
        match combinator {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|p| self.matches_at(doc, p, idx - 1)),
            Combinator::Descendant => {
                let mut current = doc.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_at(doc, ancestor, idx - 1) {
                        return true;
                    }
                    current = doc.parent(ancestor);
                }
                false
            }
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<Compound> {
    let mut compound = Compound::default();

    loop {
        match chars.peek().copied() {
            Some('#') => {
                chars.next();
                compound.id = Some(parse_ident(chars, input)?);
            }
            Some('.') => {
                chars.next();
                compound.classes.push(parse_ident(chars, input)?);
            }
            Some('[') => {
                chars.next();
                compound.attrs.push(parse_attr(chars, input)?);
            }
            Some('*') => {
                chars.next();
                compound.tag = Some("*".to_string());
            }
            Some(c) if is_ident_start(c) => {
                compound.tag = Some(parse_ident(chars, input)?.to_ascii_lowercase());
            }
            _ => break,
        }
    }

    if compound.is_empty() {
        return Err(Error::selector(format!("unexpected token in {:?}", input)));
    }
    Ok(compound)
}

fn parse_attr(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<AttrMatch> {
    let name = parse_ident(chars, input)?;
    let value = match chars.peek() {
        Some('=') => {
            chars.next();
            if chars.next() != Some('"') {
                return Err(Error::selector(format!(
                    "expected quoted attribute value in {:?}",
                    input
                )));
            }
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some(c) => value.push(c),
                        None => return Err(Error::selector(format!("unterminated {:?}", input))),
                    },
                    Some(c) => value.push(c),
                    None => return Err(Error::selector(format!("unterminated {:?}", input))),
                }
            }
            Some(value)
        }
        _ => None,
    };
    if chars.next() != Some(']') {
        return Err(Error::selector(format!("expected ']' in {:?}", input)));
    }
    Ok(AttrMatch { name, value })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn parse_ident(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<String> {
    let mut ident = String::new();
    loop {
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                ident.push(parse_escape(chars, input)?);
            }
            Some(c) if is_ident_char(c) => {
                chars.next();
                ident.push(c);
            }
            _ => break,
        }
    }
    if ident.is_empty() {
        return Err(Error::selector(format!("expected identifier in {:?}", input)));
    }
    Ok(ident)
}

/// Decode a CSS escape: either `\HH... ` (hex, optionally space-terminated)
/// or `\c` (literal character).
fn parse_escape(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<char> {
    match chars.peek().copied() {
        Some(c) if c.is_ascii_hexdigit() => {
            let mut hex = String::new();
            while hex.len() < 6 && chars.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                hex.push(chars.next().unwrap());
            }
            // A single whitespace terminates the hex escape
            if chars.peek() == Some(&' ') {
                chars.next();
            }
            let code = u32::from_str_radix(&hex, 16)
                .map_err(|_| Error::selector(format!("bad escape in {:?}", input)))?;
            char::from_u32(code).ok_or_else(|| Error::selector(format!("bad escape in {:?}", input)))
        }
        Some(c) => {
            chars.next();
            Ok(c)
        }
        None => Err(Error::selector(format!("dangling escape in {:?}", input))),
    }
}

/// Escape a string for safe embedding in a selector, after `CSS.escape`:
/// a leading digit becomes a hex escape, identifier characters pass through,
/// everything else gets a backslash.
pub fn css_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if is_ident_char(c) {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}
