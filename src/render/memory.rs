//! In-process page for exercising the runtime without a browser.
//!
//! DESIGN
//! ======
//! Nodes live in an arena (`Vec<Node>`) shared through `Rc<RefCell<_>>`;
//! an element is an index into it. Index 0 is `<html>`, index 1 is `<body>`.
//! Removed nodes stay in the arena, detached from their parent, so stale
//! handles keep answering queries and report `is_connected() == false`.
//!
//! The selector engine covers what the page uses: comma-separated groups of
//! descendant chains whose compounds are `tag`, `.class`, `#id`, `[attr]`,
//! `[attr="v"]`, and `[attr^="v"]`.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Element, RenderTarget};

const ROOT: usize = 0;
const BODY: usize = 1;
/// Tag of the anonymous nodes `append_text` creates.
const TEXT_NODE: &str = "#text";

#[derive(Debug, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    disabled: bool,
    sealed: bool,
    offset_top: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    scrolled_into_view: usize,
    resets: usize,
}

impl Node {
    fn new(tag: &str, parent: Option<usize>) -> Self {
        Self { tag: tag.to_ascii_lowercase(), parent, ..Self::default() }
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    scroll_y: f64,
    viewport_width: f64,
}

impl Tree {
    fn is_connected(&self, mut index: usize) -> bool {
        loop {
            if index == ROOT {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn is_ancestor(&self, ancestor: usize, mut index: usize) -> bool {
        loop {
            if index == ancestor {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn descendants(&self, index: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[index].children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn matches_compound(&self, index: usize, compound: &Compound) -> bool {
        let node = &self.nodes[index];
        if node.tag == TEXT_NODE {
            return false;
        }
        if compound.tag.as_deref().is_some_and(|tag| tag != "*" && tag != node.tag) {
            return false;
        }
        if compound.id.as_deref().is_some_and(|id| node.attrs.get("id").map(String::as_str) != Some(id)) {
            return false;
        }
        if !compound.classes.iter().all(|class| node.classes.contains(class)) {
            return false;
        }
        compound.attrs.iter().all(|attr| {
            let value = node.attrs.get(&attr.name);
            match &attr.op {
                AttrOp::Exists => value.is_some(),
                AttrOp::Equals(expected) => value == Some(expected),
                AttrOp::Prefix(prefix) => value.is_some_and(|v| v.starts_with(prefix.as_str())),
            }
        })
    }

    fn matches_chain(&self, index: usize, chain: &[Compound]) -> bool {
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !self.matches_compound(index, last) {
            return false;
        }
        let mut cursor = self.nodes[index].parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = cursor else {
                    return false;
                };
                cursor = self.nodes[candidate].parent;
                if self.matches_compound(candidate, compound) {
                    break;
                }
            }
        }
        true
    }

    fn select(&self, scope: usize, selector: &str) -> Vec<usize> {
        let groups = parse_selector(selector);
        let mut candidates = Vec::new();
        self.descendants(scope, &mut candidates);
        candidates.into_iter().filter(|&i| groups.iter().any(|chain| self.matches_chain(i, chain))).collect()
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

fn parse_selector(selector: &str) -> Vec<Vec<Compound>> {
    selector
        .split(',')
        .map(|group| group.split_whitespace().map(parse_compound).collect::<Vec<_>>())
        .filter(|chain| !chain.is_empty())
        .collect()
}

fn parse_compound(raw: &str) -> Compound {
    let mut compound = Compound::default();
    let tag_end = raw.find(['.', '#', '[']).unwrap_or(raw.len());
    if tag_end > 0 {
        compound.tag = Some(raw[..tag_end].to_ascii_lowercase());
    }
    let mut rest = &raw[tag_end..];
    while let Some(marker) = rest.chars().next() {
        match marker {
            '.' | '#' => {
                let body = &rest[1..];
                let end = body.find(['.', '#', '[']).unwrap_or(body.len());
                let name = body[..end].to_owned();
                if marker == '.' {
                    compound.classes.push(name);
                } else {
                    compound.id = Some(name);
                }
                rest = &body[end..];
            }
            '[' => {
                let end = rest.find(']').unwrap_or(rest.len());
                compound.attrs.push(parse_attr(&rest[1..end]));
                rest = rest.get(end + 1..).unwrap_or("");
            }
            _ => break,
        }
    }
    compound
}

fn parse_attr(inner: &str) -> AttrMatch {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_owned();
    if let Some((name, value)) = inner.split_once("^=") {
        AttrMatch { name: name.trim().to_owned(), op: AttrOp::Prefix(unquote(value)) }
    } else if let Some((name, value)) = inner.split_once('=') {
        AttrMatch { name: name.trim().to_owned(), op: AttrOp::Equals(unquote(value)) }
    } else {
        AttrMatch { name: inner.trim().to_owned(), op: AttrOp::Exists }
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// An in-memory document with `<html>` and `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        let mut html = Node::new("html", None);
        html.children.push(BODY);
        let body = Node::new("body", Some(ROOT));
        let tree = Tree { nodes: vec![html, body], scroll_y: 0.0, viewport_width: 1280.0 };
        Self { tree: Rc::new(RefCell::new(tree)) }
    }

    fn element(&self, index: usize) -> MemoryElement {
        MemoryElement { tree: Rc::clone(&self.tree), index }
    }

    pub fn html(&self) -> MemoryElement {
        self.element(ROOT)
    }

    pub fn body_element(&self) -> MemoryElement {
        self.element(BODY)
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.tree.borrow_mut().scroll_y = y;
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.tree.borrow_mut().viewport_width = width;
    }
}

impl RenderTarget for MemoryPage {
    type Element = MemoryElement;

    fn root(&self) -> Option<MemoryElement> {
        Some(self.html())
    }

    fn body(&self) -> Option<MemoryElement> {
        Some(self.body_element())
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        let found = self.tree.borrow().select(ROOT, selector);
        found.into_iter().map(|i| self.element(i)).collect()
    }

    fn scroll_y(&self) -> f64 {
        self.tree.borrow().scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.tree.borrow().viewport_width
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// Handle to one node of a [`MemoryPage`].
#[derive(Clone)]
pub struct MemoryElement {
    tree: Rc<RefCell<Tree>>,
    index: usize,
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.borrow();
        let node = &tree.nodes[self.index];
        write!(f, "<{}#{} class={:?}>", node.tag, self.index, node.classes.join(" "))
    }
}

impl MemoryElement {
    fn sibling(&self, index: usize) -> Self {
        Self { tree: Rc::clone(&self.tree), index }
    }

    fn with_node<T>(&self, f: impl FnOnce(&Node) -> T) -> T {
        f(&self.tree.borrow().nodes[self.index])
    }

    fn with_node_mut<T>(&self, f: impl FnOnce(&mut Node) -> T) -> T {
        f(&mut self.tree.borrow_mut().nodes[self.index])
    }

    /// Append a `<tag>` child and return it.
    pub fn child(&self, tag: &str) -> Self {
        let index = {
            let mut tree = self.tree.borrow_mut();
            let index = tree.nodes.len();
            tree.nodes.push(Node::new(tag, Some(self.index)));
            tree.nodes[self.index].children.push(index);
            index
        };
        self.sibling(index)
    }

    #[must_use]
    pub fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.set_attr("id", id);
        self
    }

    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    #[must_use]
    pub fn with_offset_top(self, top: f64) -> Self {
        self.with_node_mut(|n| n.offset_top = top);
        self
    }

    pub fn set_value(&self, value: &str) {
        self.with_node_mut(|n| n.value = value.to_owned());
    }

    pub fn set_checked(&self, checked: bool) {
        self.with_node_mut(|n| n.checked = checked);
    }

    /// Make `append_element` fail on this element from now on.
    pub fn seal(&self) {
        self.with_node_mut(|n| n.sealed = true);
    }

    /// How many times `scroll_into_view` was called on this element.
    pub fn scroll_count(&self) -> usize {
        self.with_node(|n| n.scrolled_into_view)
    }

    /// How many times `reset_form` was called on this element.
    pub fn reset_count(&self) -> usize {
        self.with_node(|n| n.resets)
    }
}

impl Element for MemoryElement {
    fn has_class(&self, class: &str) -> bool {
        self.with_node(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, class: &str) {
        self.with_node_mut(|n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, class: &str) {
        self.with_node_mut(|n| n.classes.retain(|c| c != class));
    }

    fn classes(&self) -> Vec<String> {
        self.with_node(|n| n.classes.clone())
    }

    fn set_class_name(&self, value: &str) {
        self.with_node_mut(|n| n.classes = value.split_whitespace().map(str::to_owned).collect());
    }

    fn attr(&self, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.classes().join(" "));
        }
        self.with_node(|n| n.attrs.get(name).cloned())
    }

    fn set_attr(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
            return;
        }
        self.with_node_mut(|n| n.attrs.insert(name.to_owned(), value.to_owned()));
    }

    fn style(&self, property: &str) -> Option<String> {
        self.with_node(|n| n.style.get(property).cloned())
    }

    fn set_style(&self, property: &str, value: &str) {
        self.with_node_mut(|n| {
            if value.is_empty() {
                n.style.remove(property);
            } else {
                n.style.insert(property.to_owned(), value.to_owned());
            }
        });
    }

    fn text(&self) -> String {
        let tree = self.tree.borrow();
        let mut text = tree.nodes[self.index].text.clone();
        let mut nested = Vec::new();
        tree.descendants(self.index, &mut nested);
        for index in nested {
            text.push_str(&tree.nodes[index].text);
        }
        text
    }

    fn set_text(&self, text: &str) {
        let detached = self.with_node_mut(|n| {
            n.text = text.to_owned();
            std::mem::take(&mut n.children)
        });
        let mut tree = self.tree.borrow_mut();
        for child in detached {
            tree.nodes[child].parent = None;
        }
    }

    fn value(&self) -> String {
        self.with_node(|n| n.value.clone())
    }

    fn is_checked(&self) -> bool {
        self.with_node(|n| n.checked)
    }

    fn is_disabled(&self) -> bool {
        self.with_node(|n| n.disabled)
    }

    fn set_disabled(&self, disabled: bool) {
        self.with_node_mut(|n| n.disabled = disabled);
    }

    fn parent(&self) -> Option<Self> {
        self.with_node(|n| n.parent).map(|p| self.sibling(p))
    }

    fn children(&self) -> Vec<Self> {
        let tree = self.tree.borrow();
        let children = &tree.nodes[self.index].children;
        children.iter().filter(|&&c| tree.nodes[c].tag != TEXT_NODE).map(|&c| self.sibling(c)).collect()
    }

    fn contains(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.tree.borrow().is_ancestor(self.index, other.index)
    }

    fn is_connected(&self) -> bool {
        self.tree.borrow().is_connected(self.index)
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let found = self.tree.borrow().select(self.index, selector);
        found.into_iter().map(|i| self.sibling(i)).collect()
    }

    fn offset_top(&self) -> f64 {
        self.with_node(|n| n.offset_top)
    }

    fn scroll_into_view(&self) {
        self.with_node_mut(|n| n.scrolled_into_view += 1);
    }

    fn append_element(&self, tag: &str, class: &str) -> Option<Self> {
        if self.with_node(|n| n.sealed) {
            return None;
        }
        Some(self.child(tag).with_class(class))
    }

    fn append_text(&self, text: &str) {
        self.child(TEXT_NODE).with_node_mut(|n| n.text = text.to_owned());
    }

    fn remove(&self) {
        let mut tree = self.tree.borrow_mut();
        let Some(parent) = tree.nodes[self.index].parent.take() else {
            return;
        };
        let index = self.index;
        tree.nodes[parent].children.retain(|&c| c != index);
    }

    fn reset_form(&self) {
        let mut tree = self.tree.borrow_mut();
        let mut fields = Vec::new();
        tree.descendants(self.index, &mut fields);
        for field in fields {
            let node = &mut tree.nodes[field];
            node.value.clear();
            node.checked = node.attrs.contains_key("checked");
        }
        tree.nodes[self.index].resets += 1;
    }
}
