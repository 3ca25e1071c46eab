//! CSS-like selector parsing and matching.
//!
//! Delegated handlers and DOM queries are keyed by selector strings. This module
//! parses the small subset the skin needs and matches it against any [`Dom`]
//! implementation by walking the ancestor chain.
//!
//! Supported grammar:
//!
//! ```text
//! list      := complex ( "," complex )*
//! complex   := compound ( combinator compound )*
//! combinator:= whitespace (descendant) | ">" (child)
//! compound  := ( tag | "*" )? ( "#" ident | "." ident | "[" ident ( "=" value )? "]" )*
//! value     := ident | "'" .. "'" | "\"" .. "\""
//! ```

use super::{Dom, NodeId};
use crate::domain::error::{Result, SkinError};
use std::str::FromStr;

/// A parsed selector list.
///
/// # Examples
///
/// ```
/// use mailskin::dom::Selector;
///
/// let selector = Selector::parse(".modal-close, .dialog-close, [data-modal-close]")?;
/// assert_eq!(selector.source(), ".modal-close, .dialog-close, [data-modal-close]");
/// # Ok::<(), mailskin::SkinError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    /// Rightmost compound last. The combinator stored with a compound joins it to
    /// the compound on its left; the first entry's combinator is unused.
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parses a selector list.
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Selector`] for empty selectors, unterminated attribute
    /// brackets or quotes, and characters outside the supported grammar.
    pub fn parse(source: &str) -> Result<Self> {
        let alternatives = split_top_level(source)?
            .into_iter()
            .map(|alt| parse_complex(alt.trim(), source))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// Selector text as parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches any alternative of this selector.
    ///
    /// The document node never matches.
    pub fn matches<D: Dom + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        if node == dom.document() || dom.tag(node).is_none() {
            return false;
        }
        self.alternatives
            .iter()
            .any(|complex| complex.matches_at(dom, node, complex.parts.len() - 1))
    }
}

impl FromStr for Selector {
    type Err = SkinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl Complex {
    fn matches_at<D: Dom + ?Sized>(&self, dom: &D, node: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        if !compound.matches(dom, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match combinator {
            Combinator::Child => dom
                .parent(node)
                .is_some_and(|parent| self.matches_at(dom, parent, index - 1)),
            Combinator::Descendant => {
                let mut current = dom.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_at(dom, ancestor, index - 1) {
                        return true;
                    }
                    current = dom.parent(ancestor);
                }
                false
            }
        }
    }
}

impl Compound {
    fn matches<D: Dom + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        if node == dom.document() {
            return false;
        }
        let Some(tag) = dom.tag(node) else {
            return false;
        };
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if dom.attr(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| dom.has_class(node, class)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (&attr.value, dom.attr(node, &attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => *expected == actual,
        })
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

/// Splits on commas that are not inside brackets or quotes.
fn split_top_level(source: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quote.is_some() {
        return Err(SkinError::Selector(format!("unterminated quote in `{source}`")));
    }
    parts.push(&source[start..]);
    Ok(parts)
}

fn parse_complex(text: &str, source: &str) -> Result<Complex> {
    if text.is_empty() {
        return Err(SkinError::Selector(format!("empty selector in `{source}`")));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    let mut parts = Vec::new();
    let mut pending = Combinator::Descendant;

    while pos < chars.len() {
        let mut saw_space = false;
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
            saw_space = true;
        }
        if pos >= chars.len() {
            break;
        }
        if chars[pos] == '>' {
            if parts.is_empty() {
                return Err(SkinError::Selector(format!("leading `>` in `{source}`")));
            }
            pending = Combinator::Child;
            pos += 1;
            continue;
        }
        if !parts.is_empty() && !saw_space && pending != Combinator::Child {
            return Err(SkinError::Selector(format!("unexpected `{}` in `{source}`", chars[pos])));
        }

        let compound = parse_compound(&chars, &mut pos, source)?;
        parts.push((pending, compound));
        pending = Combinator::Descendant;
    }

    if pending == Combinator::Child {
        return Err(SkinError::Selector(format!("dangling `>` in `{source}`")));
    }
    if parts.is_empty() {
        return Err(SkinError::Selector(format!("empty selector in `{source}`")));
    }
    Ok(Complex { parts })
}

fn parse_compound(chars: &[char], pos: &mut usize, source: &str) -> Result<Compound> {
    let mut compound = Compound::default();
    let universal = chars[*pos] == '*';

    if universal {
        *pos += 1;
    } else if is_ident_char(chars[*pos]) {
        compound.tag = Some(read_ident(chars, pos).to_ascii_lowercase());
    }

    while *pos < chars.len() {
        match chars[*pos] {
            '#' => {
                *pos += 1;
                let id = read_ident(chars, pos);
                if id.is_empty() {
                    return Err(SkinError::Selector(format!("empty id in `{source}`")));
                }
                compound.id = Some(id);
            }
            '.' => {
                *pos += 1;
                let class = read_ident(chars, pos);
                if class.is_empty() {
                    return Err(SkinError::Selector(format!("empty class in `{source}`")));
                }
                compound.classes.push(class);
            }
            '[' => {
                *pos += 1;
                compound.attrs.push(parse_attr(chars, pos, source)?);
            }
            c if c.is_whitespace() || c == '>' => break,
            c => {
                return Err(SkinError::Selector(format!("unexpected `{c}` in `{source}`")));
            }
        }
    }

    if compound.is_empty() && !universal {
        return Err(SkinError::Selector(format!("empty compound in `{source}`")));
    }
    Ok(compound)
}

fn parse_attr(chars: &[char], pos: &mut usize, source: &str) -> Result<AttrMatch> {
    skip_spaces(chars, pos);
    let name = read_ident(chars, pos);
    if name.is_empty() {
        return Err(SkinError::Selector(format!("empty attribute name in `{source}`")));
    }
    skip_spaces(chars, pos);

    let value = match chars.get(*pos) {
        Some(']') => None,
        Some('=') => {
            *pos += 1;
            skip_spaces(chars, pos);
            let value = match chars.get(*pos) {
                Some(&q) if q == '"' || q == '\'' => {
                    *pos += 1;
                    let start = *pos;
                    while *pos < chars.len() && chars[*pos] != q {
                        *pos += 1;
                    }
                    if *pos >= chars.len() {
                        return Err(SkinError::Selector(format!("unterminated quote in `{source}`")));
                    }
                    let value: String = chars[start..*pos].iter().collect();
                    *pos += 1;
                    value
                }
                _ => read_ident(chars, pos),
            };
            skip_spaces(chars, pos);
            Some(value)
        }
        _ => return Err(SkinError::Selector(format!("malformed attribute in `{source}`"))),
    };

    if chars.get(*pos) != Some(&']') {
        return Err(SkinError::Selector(format!("unterminated `[` in `{source}`")));
    }
    *pos += 1;
    Ok(AttrMatch { name, value })
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn skip_spaces(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
