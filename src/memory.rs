//! An in-memory output tree.
//!
//! Implements [`Host`] over a small document model and counts every
//! mutation made through the trait, which makes it suitable for tests and
//! headless rendering.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Write};
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::host::Host;

#[derive(Clone)]
pub struct Node {
	body: Rc<NodeBody>,
}

struct NodeBody {
	kind: NodeKind,
	attributes: RefCell<BTreeMap<String, String>>,
	children: RefCell<Vec<Node>>,
	parent: RefCell<Weak<NodeBody>>,
}

enum NodeKind {
	Element(String),
	Text(String),
}

impl Node {
	pub fn element(tag: &str) -> Self {
		Self::with_kind(NodeKind::Element(tag.to_owned()))
	}

	pub fn text(text: &str) -> Self {
		Self::with_kind(NodeKind::Text(text.to_owned()))
	}

	fn with_kind(kind: NodeKind) -> Self {
		Node {
			body: Rc::new(NodeBody {
				kind,
				attributes: RefCell::new(BTreeMap::new()),
				children: RefCell::new(Vec::new()),
				parent: RefCell::new(Weak::new()),
			}),
		}
	}

	/// Tag name, `None` for text nodes.
	pub fn tag(&self) -> Option<&str> {
		match &self.body.kind {
			NodeKind::Element(tag) => Some(tag),
			NodeKind::Text(_) => None,
		}
	}

	pub fn is_text(&self) -> bool {
		matches!(self.body.kind, NodeKind::Text(_))
	}

	pub fn attribute(&self, key: &str) -> Option<String> {
		self.body.attributes.borrow().get(key).cloned()
	}

	pub fn children(&self) -> Vec<Node> {
		self.body.children.borrow().clone()
	}

	/// Element children only, skipping text.
	pub fn elements(&self) -> Vec<Node> {
		self.body
			.children
			.borrow()
			.iter()
			.filter(|child| !child.is_text())
			.cloned()
			.collect()
	}

	pub fn parent(&self) -> Option<Node> {
		self.body.parent.borrow().upgrade().map(|body| Node { body })
	}

	pub fn next_sibling(&self) -> Option<Node> {
		let parent = self.parent()?;
		let children = parent.body.children.borrow();
		let index = children.iter().position(|child| child.ptr_eq(self))?;
		children.get(index + 1).cloned()
	}

	pub fn text_content(&self) -> String {
		match &self.body.kind {
			NodeKind::Text(text) => text.clone(),
			NodeKind::Element(_) => self
				.body
				.children
				.borrow()
				.iter()
				.map(Node::text_content)
				.collect(),
		}
	}

	#[inline]
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	/// Fixture helper: sets an attribute without going through a document.
	pub fn with_attribute(self, key: &str, value: &str) -> Self {
		self.body
			.attributes
			.borrow_mut()
			.insert(key.to_owned(), value.to_owned());
		self
	}

	/// Fixture helper: appends `child` without going through a document.
	pub fn append(&self, child: &Node) {
		child.detach();
		*child.body.parent.borrow_mut() = Rc::downgrade(&self.body);
		self.body.children.borrow_mut().push(child.clone());
	}

	fn index_of(&self, child: &Node) -> Option<usize> {
		self.body
			.children
			.borrow()
			.iter()
			.position(|item| item.ptr_eq(child))
	}

	fn detach(&self) {
		if let Some(parent) = self.parent() {
			if let Some(index) = parent.index_of(self) {
				parent.body.children.borrow_mut().remove(index);
			}
		}
		*self.body.parent.borrow_mut() = Weak::new();
	}

	fn find(&self, matches: &dyn Fn(&Node) -> bool) -> Option<Node> {
		if matches(self) {
			return Some(self.clone());
		}
		self.children().iter().find_map(|child| child.find(matches))
	}

	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match &self.body.kind {
			NodeKind::Text(text) => escape(text, out),
			NodeKind::Element(tag) => {
				let _ = write!(out, "<{}", tag);
				for (key, value) in self.body.attributes.borrow().iter() {
					let _ = write!(out, " {}=\"", key);
					escape(value, out);
					out.push('"');
				}
				out.push('>');
				for child in self.body.children.borrow().iter() {
					child.write_html(out);
				}
				let _ = write!(out, "</{}>", tag);
			}
		}
	}
}

fn escape(text: &str, out: &mut String) {
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			_ => out.push(ch),
		}
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Node {}

impl Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_html())
	}
}

/// Counts of mutations applied through [`Host`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mutations {
	pub created: usize,
	pub inserted: usize,
	pub appended: usize,
	pub removed: usize,
	pub attributes: usize,
	pub texts: usize,
}

impl Mutations {
	/// Changes to the attached tree. Node creation is not counted.
	pub fn total(&self) -> usize {
		self.inserted + self.appended + self.removed + self.attributes + self.texts
	}
}

/// A document rooted at a `<body>` element. Clones share the same tree.
#[derive(Clone)]
pub struct Document {
	inner: Rc<DocumentInner>,
}

struct DocumentInner {
	body: Node,
	mutations: Cell<Mutations>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	pub fn new() -> Self {
		Document {
			inner: Rc::new(DocumentInner {
				body: Node::element("body"),
				mutations: Cell::new(Mutations::default()),
			}),
		}
	}

	pub fn body(&self) -> Node {
		self.inner.body.clone()
	}

	/// First node matching `#id` or a tag name, in document order.
	pub fn query(&self, selector: &str) -> Option<Node> {
		match selector.strip_prefix('#') {
			Some(id) => self
				.inner
				.body
				.find(&|node| node.attribute("id").as_deref() == Some(id)),
			None => self.inner.body.find(&|node| node.tag() == Some(selector)),
		}
	}

	pub fn mutations(&self) -> Mutations {
		self.inner.mutations.get()
	}

	pub fn reset_mutations(&self) {
		self.inner.mutations.set(Mutations::default());
	}

	pub fn to_html(&self) -> String {
		self.inner.body.to_html()
	}

	fn record(&self, func: impl FnOnce(&mut Mutations)) {
		let mut mutations = self.inner.mutations.get();
		func(&mut mutations);
		self.inner.mutations.set(mutations);
	}
}

impl Host for Document {
	type Node = Node;

	fn query_root(&self, selector: &str) -> Option<Node> {
		self.query(selector)
	}

	fn create_node(&self, tag: &str) -> Result<Node> {
		self.record(|m| m.created += 1);
		Ok(Node::element(tag))
	}

	fn insert_before(&self, parent: &Node, node: &Node, reference: Option<&Node>) -> Result<()> {
		if let Some(reference) = reference {
			if parent.index_of(reference).is_none() || reference.ptr_eq(node) {
				return Err(Error::Host(
					"reference node is not a child of the parent".to_owned(),
				));
			}
		}

		tracing::trace!(tag = ?node.tag(), "insert");
		node.detach();

		let index = reference
			.and_then(|reference| parent.index_of(reference))
			.unwrap_or_else(|| parent.body.children.borrow().len());
		*node.body.parent.borrow_mut() = Rc::downgrade(&parent.body);
		parent.body.children.borrow_mut().insert(index, node.clone());

		self.record(|m| m.inserted += 1);
		Ok(())
	}

	fn remove_child(&self, parent: &Node, node: &Node) -> Result<()> {
		let index = parent
			.index_of(node)
			.ok_or_else(|| Error::Host("node is not a child of the parent".to_owned()))?;

		tracing::trace!(tag = ?node.tag(), "remove");
		parent.body.children.borrow_mut().remove(index);
		*node.body.parent.borrow_mut() = Weak::new();

		self.record(|m| m.removed += 1);
		Ok(())
	}

	fn append_child(&self, parent: &Node, node: &Node) -> Result<()> {
		tracing::trace!(tag = ?node.tag(), "append");
		parent.append(node);
		self.record(|m| m.appended += 1);
		Ok(())
	}

	fn set_attribute(&self, node: &Node, key: &str, value: &str) -> Result<()> {
		if node.is_text() {
			return Err(Error::Host("text nodes have no attributes".to_owned()));
		}

		node.body
			.attributes
			.borrow_mut()
			.insert(key.to_owned(), value.to_owned());

		self.record(|m| m.attributes += 1);
		Ok(())
	}

	fn set_text_content(&self, node: &Node, text: &str) {
		tracing::trace!(text, "text");
		for child in node.body.children.take() {
			*child.body.parent.borrow_mut() = Weak::new();
		}
		if !text.is_empty() {
			node.append(&Node::text(text));
		}

		self.record(|m| m.texts += 1);
	}

	fn parent(&self, node: &Node) -> Option<Node> {
		node.parent()
	}

	fn next_sibling(&self, node: &Node) -> Option<Node> {
		node.next_sibling()
	}
}
