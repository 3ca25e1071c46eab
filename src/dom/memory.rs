//! In-memory reference implementation of [`Dom`].
//!
//! `MemoryDom` is an arena of element nodes with a tiny HTML fragment parser and a
//! deterministic serializer. It backs the test-suite and the demo binary, and is
//! the yardstick for "the enhancement pass is idempotent": two runs must serialize
//! to the same bytes.
//!
//! # Serialization format
//!
//! - Attributes are written in insertion order, then `class`, then `style`.
//! - Text runs are HTML-escaped; there is no way to inject raw markup through
//!   [`Dom::set_text`].
//! - Void elements (`input`, `img`, `br`, `hr`, `meta`, `link`) have no closing tag.

use super::{Dom, NodeId};
use crate::domain::error::{Result, SkinError};
use crate::domain::{Rect, Size};

const VOID_ELEMENTS: &[&str] = &["input", "img", "br", "hr", "meta", "link"];

#[derive(Debug, Clone)]
enum Content {
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    content: Content,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    value: Option<String>,
    rect: Rect,
}

impl NodeData {
    fn new(content: Content) -> Self {
        Self {
            content,
            parent: None,
            children: Vec::new(),
            attrs: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            value: None,
            rect: Rect::default(),
        }
    }
}

/// Arena-backed document.
///
/// # Examples
///
/// ```
/// use mailskin::dom::{Dom, MemoryDom};
///
/// let mut dom = MemoryDom::new();
/// let body = dom.body();
/// dom.append_html(body, r#"<div id="greeting" class="notice">hello</div>"#)?;
///
/// let node = dom.element_by_id("greeting").unwrap();
/// assert!(dom.has_class(node, "notice"));
/// assert_eq!(dom.text(node), "hello");
/// # Ok::<(), mailskin::SkinError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Option<NodeData>>,
    document: NodeId,
    document_element: NodeId,
    head: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    viewport: Size,
    loading: bool,
    prefers_dark: bool,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates `#document > html > (head, body)` with a 1280x800 viewport.
    #[must_use]
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId(0),
            document_element: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            focused: None,
            viewport: Size::new(1280.0, 800.0),
            loading: false,
            prefers_dark: false,
        };
        dom.document = dom.alloc(Content::Element("#document".to_string()));
        dom.document_element = dom.create_element("html");
        dom.head = dom.create_element("head");
        dom.body = dom.create_element("body");
        dom.append_child(dom.document, dom.document_element);
        dom.append_child(dom.document_element, dom.head);
        dom.append_child(dom.document_element, dom.body);
        dom
    }

    /// The `<head>` element.
    #[must_use]
    pub const fn head(&self) -> NodeId {
        self.head
    }

    /// Sets the viewport reported by [`Dom::viewport`].
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Marks the document as still parsing, or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Sets the colour scheme reported by [`Dom::prefers_dark`].
    pub fn set_prefers_dark(&mut self, dark: bool) {
        self.prefers_dark = dark;
    }

    /// Sets the layout box reported by [`Dom::rect`].
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.node_mut(node) {
            data.rect = rect;
        }
    }

    /// Parses an HTML fragment and appends its top-level nodes to `parent`.
    ///
    /// Returns the top-level elements created, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Markup`] for mismatched or unterminated tags.
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> Result<Vec<NodeId>> {
        let mut parser = FragmentParser {
            chars: html.chars().collect(),
            pos: 0,
        };
        let mut created = Vec::new();
        let mut stack: Vec<(NodeId, String)> = Vec::new();

        while let Some(token) = parser.next_token()? {
            let current = stack.last().map_or(parent, |(node, _)| *node);
            match token {
                Token::Text(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    let node = self.alloc(Content::Text(collapse_whitespace(&text)));
                    self.append_child(current, node);
                }
                Token::Open { tag, attrs, self_closing } => {
                    let node = self.create_element(&tag);
                    for (name, value) in attrs {
                        self.set_attr(node, &name, &value);
                    }
                    self.append_child(current, node);
                    if stack.is_empty() {
                        created.push(node);
                    }
                    if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
                        stack.push((node, tag));
                    }
                }
                Token::Close(tag) => match stack.pop() {
                    Some((_, open)) if open == tag => {}
                    Some((_, open)) => {
                        return Err(SkinError::Markup(format!("expected </{open}>, found </{tag}>")));
                    }
                    None => return Err(SkinError::Markup(format!("unexpected </{tag}>"))),
                },
            }
        }

        if let Some((_, open)) = stack.pop() {
            return Err(SkinError::Markup(format!("unclosed <{open}>")));
        }
        Ok(created)
    }

    /// Serializes the whole `<html>` element.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.serialize_node(self.document_element)
    }

    /// Serializes a single subtree.
    #[must_use]
    pub fn serialize_node(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Number of live nodes, including the document.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.node(node) else {
            return;
        };
        let tag = match &data.content {
            Content::Text(text) => {
                out.push_str(&escape(text, false));
                return;
            }
            Content::Element(tag) => tag,
        };

        out.push('<');
        out.push_str(tag);
        for (name, value) in &data.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
        }
        if !data.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&data.classes.join(" "), true)));
        }
        if !data.styles.is_empty() {
            let style = data
                .styles
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", escape(&style, true)));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag.as_str()) {
            return;
        }
        for &child in &data.children {
            self.write_node(child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }

    fn alloc(&mut self, content: Content) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Some(NodeData::new(content)));
        id
    }

    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize).and_then(Option::as_mut)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.node_mut(node)
            .filter(|data| matches!(data.content, Content::Element(_)))
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).and_then(|d| d.parent) else {
            return;
        };
        if let Some(parent_data) = self.node_mut(parent) {
            parent_data.children.retain(|&c| c != node);
        }
        if let Some(data) = self.node_mut(node) {
            data.parent = None;
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.node(n).and_then(|d| d.parent);
        }
        false
    }
}

impl Dom for MemoryDom {
    fn document(&self) -> NodeId {
        self.document
    }

    fn document_element(&self) -> NodeId {
        self.document_element
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Content::Element(tag.to_ascii_lowercase()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Some(data) = self.node_mut(parent) {
            data.children.push(child);
        }
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Some(data) = self.node_mut(parent) {
            data.children.insert(0, child);
        }
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || child == reference
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        self.detach(child);
        let Some(data) = self.node_mut(parent) else {
            return;
        };
        match data.children.iter().position(|&c| c == reference) {
            Some(index) => data.children.insert(index, child),
            None => data.children.push(child),
        }
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.document || self.node(node).is_none() {
            return;
        }
        self.detach(node);
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if self.focused == Some(n) {
                self.focused = None;
            }
            if let Some(slot) = self.nodes.get_mut(n.0 as usize) {
                if let Some(data) = slot.take() {
                    stack.extend(data.children);
                }
            }
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|d| d.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|d| {
                d.children
                    .iter()
                    .copied()
                    .filter(|&c| matches!(self.node(c).map(|c| &c.content), Some(Content::Element(_))))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.content {
            Content::Element(tag) => Some(tag.as_str()),
            Content::Text(_) => None,
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        let data = self.node(node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(data) = self.element_mut(node) else {
            return;
        };
        match name {
            "class" => {
                data.classes = value.split_whitespace().map(String::from).collect();
                return;
            }
            "style" => {
                data.styles = parse_style(value);
                return;
            }
            "value" if data.value.is_none() => data.value = Some(value.to_string()),
            _ => {}
        }
        match data.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => data.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.element_mut(node) {
            if name == "class" {
                data.classes.clear();
            } else {
                data.attrs.retain(|(k, _)| k != name);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.element_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.element_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node)?
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(data) = self.element_mut(node) else {
            return;
        };
        if value.is_empty() {
            data.styles.retain(|(k, _)| k != property);
            return;
        }
        match data.styles.iter_mut().find(|(k, _)| k == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => data.styles.push((property.to_string(), value.to_string())),
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(data) = self.element_mut(node) {
            data.styles.retain(|(k, _)| k != property);
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(data) = self.node(node) else {
            return String::new();
        };
        match &data.content {
            Content::Text(text) => text.clone(),
            Content::Element(_) => data.children.iter().map(|&c| self.text(c)).collect(),
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if self.element_mut(node).is_none() {
            return;
        }
        for child in self.node(node).map(|d| d.children.clone()).unwrap_or_default() {
            self.remove(child);
        }
        if !text.is_empty() {
            let run = self.alloc(Content::Text(text.to_string()));
            self.append_child(node, run);
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.node(node)
            .and_then(|d| d.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.element_mut(node) {
            data.value = Some(value.to_string());
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.tag(node).is_some() && self.is_connected(node) {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn rect(&self, node: NodeId) -> Rect {
        self.node(node).map(|d| d.rect).unwrap_or_default()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

fn parse_style(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty() && !v.is_empty()).then(|| (k.to_string(), v.to_string()))
        })
        .collect()
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

enum Token {
    Text(String),
    Open {
        tag: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
}

struct FragmentParser {
    chars: Vec<char>,
    pos: usize,
}

impl FragmentParser {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.pos >= self.chars.len() {
            return Ok(None);
        }
        if self.chars[self.pos] != '<' {
            let start = self.pos;
            while self.pos < self.chars.len() && self.chars[self.pos] != '<' {
                self.pos += 1;
            }
            let raw: String = self.chars[start..self.pos].iter().collect();
            return Ok(Some(Token::Text(unescape(&raw))));
        }

        self.pos += 1;
        if self.peek() == Some('/') {
            self.pos += 1;
            let tag = self.read_name().to_ascii_lowercase();
            self.skip_spaces();
            self.expect('>')?;
            return Ok(Some(Token::Close(tag)));
        }

        let tag = self.read_name().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(SkinError::Markup(format!("empty tag name at offset {}", self.pos)));
        }

        let mut attrs = Vec::new();
        loop {
            self.skip_spaces();
            match self.peek() {
                Some('>') => {
                    self.pos += 1;
                    return Ok(Some(Token::Open { tag, attrs, self_closing: false }));
                }
                Some('/') => {
                    self.pos += 1;
                    self.expect('>')?;
                    return Ok(Some(Token::Open { tag, attrs, self_closing: true }));
                }
                Some(_) => {
                    let name = self.read_name();
                    if name.is_empty() {
                        return Err(SkinError::Markup(format!("bad attribute in <{tag}>")));
                    }
                    self.skip_spaces();
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_spaces();
                        self.read_value()?
                    } else {
                        String::new()
                    };
                    attrs.push((name, value));
                }
                None => return Err(SkinError::Markup(format!("unterminated <{tag}>"))),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(SkinError::Markup(format!("expected `{c}` at offset {}", self.pos)))
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn read_value(&mut self) -> Result<String> {
        match self.peek() {
            Some(q) if q == '"' || q == '\'' => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != q) {
                    self.pos += 1;
                }
                let raw: String = self.chars[start..self.pos].iter().collect();
                self.expect(q)?;
                Ok(unescape(&raw))
            }
            _ => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !c.is_whitespace() && c != '>' && c != '/') {
                    self.pos += 1;
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
        }
    }
}

fn unescape(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Selector;

    #[test]
    fn parses_nested_fragment_with_void_elements() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let created = dom
            .append_html(body, r#"<form id="f"><input type="text" name="_user"><button>Go</button></form>"#)
            .unwrap();

        assert_eq!(created.len(), 1);
        let form = created[0];
        assert_eq!(dom.children(form).len(), 2);
        assert_eq!(dom.text(form), "Go");
        assert_eq!(
            dom.serialize_node(form),
            r#"<form id="f"><input type="text" name="_user"><button>Go</button></form>"#
        );
    }

    #[test]
    fn rejects_mismatched_tags() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        assert!(dom.append_html(body, "<div><span></div>").is_err());
        assert!(dom.append_html(body, "<div>").is_err());
        assert!(dom.append_html(body, "</div>").is_err());
    }

    #[test]
    fn text_is_escaped_on_serialization() {
        let mut dom = MemoryDom::new();
        let div = dom.create_element("div");
        dom.set_text(div, "<script>alert(1)</script>");
        assert_eq!(
            dom.serialize_node(div),
            "<div>&lt;script&gt;alert(1)&lt;/script&gt;</div>"
        );
    }

    #[test]
    fn remove_drops_subtree_and_focus() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(body, r#"<div id="outer"><input id="field"></div>"#).unwrap();
        let outer = dom.element_by_id("outer").unwrap();
        let field = dom.element_by_id("field").unwrap();
        dom.focus(field);
        assert_eq!(dom.focused(), Some(field));

        dom.remove(outer);
        assert!(dom.element_by_id("field").is_none());
        assert_eq!(dom.focused(), None);
        assert!(dom.tag(field).is_none());
    }

    #[test]
    fn wrap_keeps_position_among_siblings() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(body, r#"<p id="a"></p><p id="b"></p><p id="c"></p>"#).unwrap();
        let b = dom.element_by_id("b").unwrap();
        let wrapper = dom.create_element("div");
        dom.wrap(b, wrapper);

        assert_eq!(
            dom.serialize_node(body),
            r#"<body><p id="a"></p><div><p id="b"></p></div><p id="c"></p></body>"#
        );
    }

    #[test]
    fn query_all_is_in_document_order() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(
            body,
            r#"<ul><li class="x" id="1"><span class="x" id="2"></span></li><li class="x" id="3"></li></ul>"#,
        )
        .unwrap();
        let ids: Vec<String> = dom
            .query_all(body, &Selector::parse(".x").unwrap())
            .into_iter()
            .filter_map(|n| dom.id(n))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn append_child_refuses_cycles() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let outer = dom.create_element("div");
        let inner = dom.create_element("div");
        dom.append_child(body, outer);
        dom.append_child(outer, inner);
        dom.append_child(inner, outer);
        assert_eq!(dom.parent(outer), Some(body));
    }
}
