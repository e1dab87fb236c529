use crate::error::Result;

/// The live output tree the reconciler mutates.
///
/// Implementations own node storage; `Node` is a cheap handle to one node.
pub trait Host: 'static {
	type Node: Clone + 'static;

	/// Locates the mount placeholder.
	fn query_root(&self, selector: &str) -> Option<Self::Node>;

	fn create_node(&self, tag: &str) -> Result<Self::Node>;

	/// Inserts `node` into `parent` before `reference`, or at the end when
	/// `reference` is `None`.
	fn insert_before(
		&self,
		parent: &Self::Node,
		node: &Self::Node,
		reference: Option<&Self::Node>,
	) -> Result<()>;

	fn remove_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<()>;

	fn append_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<()>;

	fn set_attribute(&self, node: &Self::Node, key: &str, value: &str) -> Result<()>;

	/// Replaces all content of `node` with `text`.
	fn set_text_content(&self, node: &Self::Node, text: &str);

	fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

	fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
}
