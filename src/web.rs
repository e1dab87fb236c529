#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

use crate::error::{Error, Result};
use crate::host::Host;

/// Browser document host.
pub struct WebHost {
	document: Document,
}

impl WebHost {
	pub fn new(document: Document) -> Self {
		WebHost { document }
	}

	/// Host over the document of the current window.
	pub fn current() -> Result<Self> {
		web_sys::window()
			.and_then(|window| window.document())
			.map(WebHost::new)
			.ok_or_else(|| Error::Host("no document available".to_owned()))
	}
}

fn host_error(err: JsValue) -> Error {
	Error::Host(format!("{:?}", err))
}

impl Host for WebHost {
	type Node = Node;

	fn query_root(&self, selector: &str) -> Option<Node> {
		self.document
			.query_selector(selector)
			.ok()
			.flatten()
			.map(Into::into)
	}

	fn create_node(&self, tag: &str) -> Result<Node> {
		self.document
			.create_element(tag)
			.map(Into::into)
			.map_err(host_error)
	}

	fn insert_before(&self, parent: &Node, node: &Node, reference: Option<&Node>) -> Result<()> {
		parent
			.insert_before(node, reference)
			.map(drop)
			.map_err(host_error)
	}

	fn remove_child(&self, parent: &Node, node: &Node) -> Result<()> {
		parent.remove_child(node).map(drop).map_err(host_error)
	}

	fn append_child(&self, parent: &Node, node: &Node) -> Result<()> {
		parent.append_child(node).map(drop).map_err(host_error)
	}

	fn set_attribute(&self, node: &Node, key: &str, value: &str) -> Result<()> {
		node.dyn_ref::<Element>()
			.ok_or_else(|| Error::Host("attributes can only be set on elements".to_owned()))?
			.set_attribute(key, value)
			.map_err(host_error)
	}

	fn set_text_content(&self, node: &Node, text: &str) {
		node.set_text_content(Some(text));
	}

	fn parent(&self, node: &Node) -> Option<Node> {
		node.parent_node()
	}

	fn next_sibling(&self, node: &Node) -> Option<Node> {
		node.next_sibling()
	}
}
