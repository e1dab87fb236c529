use std::cell::Cell;

use miniview::memory::{Document, Node};
use miniview::{
	array, attrs, evaluation, object, Error, Host, Instance, Object, Options, Result, Value, VNode,
};

use crate::init_tracing;
use crate::mock::{SharedMock, Spy};

/// A document holding `<header>`, the `#app` placeholder and `<footer>`.
fn document() -> Document {
	let doc = Document::new();
	doc.body().append(&Node::element("header"));
	doc.body()
		.append(&Node::element("div").with_attribute("id", "app"));
	doc.body().append(&Node::element("footer"));
	doc
}

fn counter(doc: &Document, data: Object) -> Instance<Document> {
	let options = Options::<Node>::new(|vm, h| {
		Ok(h("p", attrs! {}, vm.get("count")?.to_string().into()))
	})
	.el("#app")
	.data(data);

	Instance::new(doc.clone(), options).unwrap()
}

#[test]
fn counter_renders_and_updates() {
	init_tracing();

	let doc = document();
	let instance = counter(&doc, object! { "count" => 0 });

	assert_eq!(
		doc.to_html(),
		"<body><header></header><p>0</p><footer></footer></body>"
	);
	assert_eq!(instance.evaluations(), 1);

	instance.set("count", 1).unwrap();

	let root = instance.root().unwrap();
	assert_eq!(root.text_content(), "1");
	assert_eq!(instance.evaluations(), 2);
	assert_eq!(instance.get("count"), Ok(Value::from(1)));
}

#[test]
fn equal_write_does_not_rerender() {
	let doc = document();
	let instance = counter(&doc, object! { "count" => 3 });
	doc.reset_mutations();

	instance.set("count", 3).unwrap();

	assert_eq!(instance.evaluations(), 1);
	assert_eq!(doc.mutations().total(), 0);
}

#[test]
fn rerender_without_changes_mutates_nothing() {
	let doc = document();
	let instance = counter(&doc, object! { "count" => 0, "unused" => 0 });
	doc.reset_mutations();

	// Forces a re-render: the computation is what a write would trigger.
	instance.computation().unwrap().evaluate().unwrap();

	assert_eq!(instance.evaluations(), 2);
	assert_eq!(doc.mutations().total(), 0);
}

#[test]
fn unread_properties_do_not_trigger_renders() {
	let doc = document();
	let instance = counter(&doc, object! { "count" => 0, "unused" => 0 });

	instance.set("unused", 1).unwrap();

	assert_eq!(instance.evaluations(), 1);
}

#[test]
fn render_receives_every_change() {
	let doc = document();
	let mock = SharedMock::new();

	let options = Options::<Node>::new({
		let mock = mock.clone();
		move |vm, h| {
			let count = vm.get("count")?;
			mock.get().evaluated(count.as_f64().unwrap_or_default() as i64);
			Ok(h("p", attrs! {}, count.to_string().into()))
		}
	})
	.el("#app")
	.data(object! { "count" => 0 });

	mock.get().expect_evaluated().times(1).return_const(());
	let instance = Instance::new(doc.clone(), options).unwrap();
	mock.get().checkpoint();

	mock.get().expect_evaluated().times(3).return_const(());
	for count in 1..=3 {
		instance.set("count", count).unwrap();
	}
	mock.get().checkpoint();

	assert_eq!(instance.root().unwrap().text_content(), "3");
}

#[test]
fn children_switch_between_text_and_nodes() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		let children = if vm.get("list")?.as_bool().unwrap_or_default() {
			vec![h("span", attrs! {}, "a".into()), h("span", attrs! {}, "b".into())].into()
		} else {
			"text".into()
		};
		Ok(h("div", attrs! { "class" => "box" }, children))
	})
	.el("#app")
	.data(object! { "list" => false });

	let instance = Instance::new(doc.clone(), options).unwrap();
	let root = instance.root().unwrap();
	assert_eq!(root.to_html(), r#"<div class="box">text</div>"#);

	instance.set("list", true).unwrap();
	assert_eq!(
		root.to_html(),
		r#"<div class="box"><span>a</span><span>b</span></div>"#
	);

	instance.set("list", false).unwrap();
	assert_eq!(root.to_html(), r#"<div class="box">text</div>"#);
	assert_eq!(instance.root(), Some(root));
}

#[test]
fn nested_writes_rerender() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		let user = vm.get("user")?;
		let name = user
			.as_object()
			.and_then(|user| user.get("name"))
			.unwrap_or_default();
		Ok(h("b", attrs! {}, name.to_string().into()))
	})
	.el("#app")
	.data(object! { "user" => object! { "name" => "ada" } });

	let instance = Instance::new(doc.clone(), options).unwrap();

	let user = instance.get("user").unwrap();
	user.as_object().unwrap().set("name", "grace").unwrap();
	assert_eq!(instance.root().unwrap().text_content(), "grace");

	instance
		.set("user", object! { "name" => "linus" })
		.unwrap();
	assert_eq!(instance.root().unwrap().text_content(), "linus");
	assert_eq!(instance.evaluations(), 3);
}

#[test]
fn list_follows_array_assignments() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		let items = vm.get("items")?;
		let items = items
			.as_array()
			.map(|items| items.values())
			.unwrap_or_default()
			.into_iter()
			.map(|item| h("li", attrs! {}, item.to_string().into()))
			.collect::<Vec<VNode<Node>>>();
		Ok(h("ul", attrs! {}, items.into()))
	})
	.el("#app")
	.data(object! { "items" => array!["a", "b"] });

	let instance = Instance::new(doc.clone(), options).unwrap();
	let root = instance.root().unwrap();

	let items = instance.get("items").unwrap();
	let items = items.as_array().unwrap();
	items.set(0, "z").unwrap();
	assert_eq!(root.to_html(), "<ul><li>z</li><li>b</li></ul>");

	// Length changes are not observed.
	items.push("c");
	assert_eq!(root.to_html(), "<ul><li>z</li><li>b</li></ul>");

	doc.reset_mutations();
	instance.set("items", array!["z", "b", "c"]).unwrap();
	assert_eq!(root.to_html(), "<ul><li>z</li><li>b</li><li>c</li></ul>");
	assert_eq!(doc.mutations().appended, 1);
	assert_eq!(doc.mutations().removed, 0);
}

#[test]
fn tag_change_replaces_root() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		let tag = if vm.get("heading")?.as_bool().unwrap_or_default() {
			"h1"
		} else {
			"p"
		};
		Ok(h(tag, attrs! {}, "title".into()))
	})
	.el("#app")
	.data(object! { "heading" => false });

	let instance = Instance::new(doc.clone(), options).unwrap();
	instance.set("heading", true).unwrap();

	assert_eq!(
		doc.to_html(),
		"<body><header></header><h1>title</h1><footer></footer></body>"
	);
	assert_eq!(instance.root().unwrap().tag(), Some("h1"));
}

#[test]
fn data_factory_is_called_once() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		Ok(h("p", attrs! {}, vm.get("count")?.to_string().into()))
	})
	.el("#app")
	.data_fn(|| Value::from(object! { "count" => 7 }));

	let instance = Instance::new(doc.clone(), options).unwrap();
	assert_eq!(instance.root().unwrap().text_content(), "7");
	assert!(instance.data().is_observed());
}

#[test]
fn non_object_data_is_rejected() {
	let options = Options::<Node>::new(|_, h| Ok(h("p", attrs! {}, "".into()))).data(3);

	let result = Instance::new(document(), options);

	assert_eq!(result.err(), Some(Error::InvalidData("number")));
}

#[test]
fn missing_mount_target_is_reported() {
	let options =
		Options::<Node>::new(|_, h| Ok(h("p", attrs! {}, "".into()))).el("#nowhere");

	let result = Instance::new(document(), options);

	assert_eq!(
		result.err(),
		Some(Error::MountTargetNotFound("#nowhere".to_owned()))
	);
}

#[test]
fn explicit_mount_and_double_mount() {
	let doc = document();
	let options = Options::<Node>::new(|_, h| Ok(h("main", attrs! {}, "".into())));

	let instance = Instance::new(doc.clone(), options).unwrap();
	assert!(!instance.is_mounted());
	assert_eq!(instance.evaluations(), 0);

	instance.mount("#app").unwrap();
	assert_eq!(
		doc.to_html(),
		"<body><header></header><main></main><footer></footer></body>"
	);

	assert_eq!(instance.mount("header"), Err(Error::AlreadyMounted));
}

#[test]
fn render_errors_reach_the_writer() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		let count = vm.get("count")?;
		if count.as_f64().unwrap_or_default() > 5.0 {
			return Err(Error::Render("count too large".to_owned()));
		}
		Ok(h("p", attrs! {}, count.to_string().into()))
	})
	.el("#app")
	.data(object! { "count" => 0 });

	let instance = Instance::new(doc.clone(), options).unwrap();

	assert_eq!(
		instance.set("count", 6),
		Err(Error::Render("count too large".to_owned()))
	);
	assert_eq!(evaluation::depth(), 0);
	assert_eq!(instance.root().unwrap().text_content(), "0");

	instance.set("count", 2).unwrap();
	assert_eq!(instance.root().unwrap().text_content(), "2");
}

#[test]
fn undefined_properties() {
	let doc = document();

	let options = Options::<Node>::new(|vm, h| {
		Ok(h("p", attrs! {}, vm.get("missing")?.to_string().into()))
	})
	.data(object! { "count" => 0 });

	let instance = Instance::new(doc.clone(), options).unwrap();
	assert_eq!(
		instance.mount("#app"),
		Err(Error::UndefinedProperty("missing".to_owned()))
	);
	assert_eq!(evaluation::depth(), 0);

	// Late keys are stored untracked and are not forwarded.
	instance.set("missing", "late").unwrap();
	assert!(!instance.proxy().is_forwarded("missing"));
	assert_eq!(instance.data().peek("missing"), Some(Value::from("late")));
	assert_eq!(instance.evaluations(), 1);
	assert_eq!(instance.proxy().keys(), vec!["count"]);
}

/// A document whose `append_child` can be switched to fail.
struct FlakyDocument {
	doc: Document,
	fail_appends: Cell<bool>,
}

impl Host for FlakyDocument {
	type Node = Node;

	fn query_root(&self, selector: &str) -> Option<Node> {
		self.doc.query_root(selector)
	}

	fn create_node(&self, tag: &str) -> Result<Node> {
		self.doc.create_node(tag)
	}

	fn insert_before(&self, parent: &Node, node: &Node, reference: Option<&Node>) -> Result<()> {
		self.doc.insert_before(parent, node, reference)
	}

	fn remove_child(&self, parent: &Node, node: &Node) -> Result<()> {
		self.doc.remove_child(parent, node)
	}

	fn append_child(&self, parent: &Node, node: &Node) -> Result<()> {
		if self.fail_appends.get() {
			return Err(Error::Host("append refused".to_owned()));
		}
		self.doc.append_child(parent, node)
	}

	fn set_attribute(&self, node: &Node, key: &str, value: &str) -> Result<()> {
		self.doc.set_attribute(node, key, value)
	}

	fn set_text_content(&self, node: &Node, text: &str) {
		self.doc.set_text_content(node, text)
	}

	fn parent(&self, node: &Node) -> Option<Node> {
		self.doc.parent(node)
	}

	fn next_sibling(&self, node: &Node) -> Option<Node> {
		self.doc.next_sibling(node)
	}
}

#[test]
fn failed_patch_rebuilds_on_next_render() {
	let host = FlakyDocument {
		doc: document(),
		fail_appends: Cell::new(false),
	};

	let options = Options::<Node>::new(|vm, h| {
		let items = vm.get("items")?;
		let items = items
			.as_array()
			.map(|items| items.values())
			.unwrap_or_default()
			.into_iter()
			.map(|item| h("li", attrs! {}, item.to_string().into()))
			.collect::<Vec<VNode<Node>>>();
		Ok(h("ul", attrs! {}, items.into()))
	})
	.el("#app")
	.data(object! { "items" => array!["a", "b"] });

	let instance = Instance::new(host, options).unwrap();
	let doc = instance.host().doc.clone();

	// The first item is patched before the append of the third one fails.
	instance.host().fail_appends.set(true);
	assert_eq!(
		instance.set("items", array!["x", "b", "c"]),
		Err(Error::Host("append refused".to_owned()))
	);
	assert_eq!(
		doc.to_html(),
		"<body><header></header><ul><li>x</li><li>b</li></ul><footer></footer></body>"
	);

	// Diffing against the last good tree would see no change here.
	instance.host().fail_appends.set(false);
	instance.set("items", array!["a", "b"]).unwrap();
	assert_eq!(
		doc.to_html(),
		"<body><header></header><ul><li>a</li><li>b</li></ul><footer></footer></body>"
	);
	assert_eq!(instance.root().unwrap().to_html(), "<ul><li>a</li><li>b</li></ul>");
}
