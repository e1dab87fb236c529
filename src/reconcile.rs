use crate::error::{Error, Result};
use crate::host::Host;
use crate::vnode::{Children, VNode};

/// What a new tree is reconciled against.
pub enum Previous<'a, N> {
	/// A raw node already in the output tree, replaced on first render.
	Placeholder(N),
	/// The tree produced by the previous render.
	Tree(&'a VNode<N>),
}

/// Builds output nodes from abstract trees and patches existing output to
/// match a new tree.
///
/// Children are diffed by index with no keys: a reordering is seen as a
/// series of in-place updates. Attributes are only written at creation.
pub struct Reconciler<'a, H: Host> {
	host: &'a H,
}

impl<'a, H: Host> Reconciler<'a, H> {
	pub fn new(host: &'a H) -> Self {
		Reconciler { host }
	}

	pub fn materialize(&self, node: &mut VNode<H::Node>) -> Result<H::Node> {
		let el = self.host.create_node(&node.tag)?;

		for (key, value) in &node.attributes {
			self.host.set_attribute(&el, key, value)?;
		}

		match &mut node.children {
			Children::Text(text) => {
				if !text.is_empty() {
					self.host.set_text_content(&el, text);
				}
			}
			Children::Nodes(children) => {
				for child in children {
					let child_el = self.materialize(child)?;
					self.host.append_child(&el, &child_el)?;
				}
			}
		}

		node.output = Some(el.clone());
		Ok(el)
	}

	pub fn patch(&self, previous: Previous<'_, H::Node>, next: &mut VNode<H::Node>) -> Result<()> {
		match previous {
			Previous::Placeholder(placeholder) => {
				tracing::debug!(tag = %next.tag, "replacing mount placeholder");
				self.replace(&placeholder, next)
			}
			Previous::Tree(old) => self.patch_node(old, next),
		}
	}

	/// Materializes `next` in place of `old`, keeping its sibling position.
	fn replace(&self, old: &H::Node, next: &mut VNode<H::Node>) -> Result<()> {
		let parent = self.host.parent(old).ok_or(Error::Detached)?;
		let reference = self.host.next_sibling(old);

		let el = self.materialize(next)?;
		self.host.insert_before(&parent, &el, reference.as_ref())?;
		self.host.remove_child(&parent, old)
	}

	fn patch_node(&self, old: &VNode<H::Node>, next: &mut VNode<H::Node>) -> Result<()> {
		let el = old
			.output
			.clone()
			.ok_or_else(|| Error::Unmaterialized(old.tag.clone()))?;

		if old.tag != next.tag {
			tracing::debug!(from = %old.tag, to = %next.tag, "replacing subtree");
			return self.replace(&el, next);
		}

		next.output = Some(el.clone());

		match (&old.children, &mut next.children) {
			(Children::Text(old_text), Children::Text(text)) => {
				if old_text.as_str() != text.as_str() {
					self.host.set_text_content(&el, text);
				}
			}
			(Children::Nodes(_), Children::Text(text)) => {
				self.host.set_text_content(&el, text);
			}
			(Children::Text(_), Children::Nodes(children)) => {
				self.host.set_text_content(&el, "");
				for child in children {
					let child_el = self.materialize(child)?;
					self.host.append_child(&el, &child_el)?;
				}
			}
			(Children::Nodes(old_children), Children::Nodes(children)) => {
				self.update_children(&el, old_children, children)?;
			}
		}

		Ok(())
	}

	fn update_children(
		&self,
		parent: &H::Node,
		old: &[VNode<H::Node>],
		new: &mut [VNode<H::Node>],
	) -> Result<()> {
		let common = old.len().min(new.len());

		for (old_child, child) in old.iter().zip(new.iter_mut()) {
			self.patch_node(old_child, child)?;
		}

		for child in new.iter_mut().skip(common) {
			let el = self.materialize(child)?;
			self.host.append_child(parent, &el)?;
		}

		for old_child in old.iter().skip(common) {
			let el = old_child
				.output
				.as_ref()
				.ok_or_else(|| Error::Unmaterialized(old_child.tag.clone()))?;
			self.host.remove_child(parent, el)?;
		}

		Ok(())
	}
}
