use std::collections::BTreeMap;

pub type Attributes = BTreeMap<String, String>;

/// Signature of the element constructor handed to render functions.
pub type CreateElement<N> = fn(&str, Attributes, Children<N>) -> VNode<N>;

/// Abstract description of one output element.
///
/// `N` is the host's node handle. `output` links the description to the
/// node it was materialized into; the reconciler owns that node's lifecycle.
#[derive(Debug, Clone)]
pub struct VNode<N> {
	pub(crate) tag: String,
	pub(crate) attributes: Attributes,
	pub(crate) children: Children<N>,
	pub(crate) output: Option<N>,
}

#[derive(Debug, Clone)]
pub enum Children<N> {
	Text(String),
	Nodes(Vec<VNode<N>>),
}

impl<N> VNode<N> {
	pub fn new(
		tag: impl Into<String>,
		attributes: Attributes,
		children: impl Into<Children<N>>,
	) -> Self {
		VNode {
			tag: tag.into(),
			attributes,
			children: children.into(),
			output: None,
		}
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	pub fn children(&self) -> &Children<N> {
		&self.children
	}

	/// The live node this description was materialized into, if any.
	pub fn output(&self) -> Option<&N> {
		self.output.as_ref()
	}
}

/// Pure constructor passed to render functions.
pub fn create_element<N>(tag: &str, attributes: Attributes, children: Children<N>) -> VNode<N> {
	VNode::new(tag, attributes, children)
}

impl<N> Children<N> {
	pub fn text(text: impl Into<String>) -> Self {
		Children::Text(text.into())
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Children::Text(text) => Some(text),
			Children::Nodes(_) => None,
		}
	}

	pub fn as_nodes(&self) -> Option<&[VNode<N>]> {
		match self {
			Children::Nodes(nodes) => Some(nodes),
			Children::Text(_) => None,
		}
	}
}

impl<N> Default for Children<N> {
	fn default() -> Self {
		Children::Nodes(Vec::new())
	}
}

impl<N> From<&str> for Children<N> {
	fn from(text: &str) -> Self {
		Children::Text(text.to_owned())
	}
}

impl<N> From<String> for Children<N> {
	fn from(text: String) -> Self {
		Children::Text(text)
	}
}

impl<N> From<Vec<VNode<N>>> for Children<N> {
	fn from(nodes: Vec<VNode<N>>) -> Self {
		Children::Nodes(nodes)
	}
}
