use std::cell::RefCell;
use std::rc::Rc;

use crate::computation::Computation;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::observer::observe;
use crate::options::{Options, Render};
use crate::proxy::Proxy;
use crate::reconcile::{Previous, Reconciler};
use crate::vnode::{create_element, VNode};
use crate::{Object, Value};

/// Root controller: owns the observed data and one render computation that
/// re-renders and patches the output tree whenever the data it read changes.
pub struct Instance<H: Host> {
	inner: Rc<InstanceInner<H>>,
}

struct InstanceInner<H: Host> {
	host: H,
	data: Object,
	proxy: Proxy,
	render: Render<H::Node>,
	phase: RefCell<Phase<H::Node>>,
	computation: RefCell<Option<Computation>>,
}

enum Phase<N> {
	Unmounted,
	/// Mounted over a placeholder that the next render replaces: the mount
	/// target, or the previous root after a failed patch.
	FirstRender(N),
	/// Holds the most recently rendered tree.
	Steady(VNode<N>),
}

impl<H: Host> Instance<H> {
	pub fn new(host: H, options: Options<H::Node>) -> Result<Self> {
		let Options { el, data, render } = options;

		let data = data.resolve()?;
		observe(&Value::Object(data.clone()));
		let proxy = Proxy::new(&data);

		let instance = Instance {
			inner: Rc::new(InstanceInner {
				host,
				data,
				proxy,
				render,
				phase: RefCell::new(Phase::Unmounted),
				computation: RefCell::new(None),
			}),
		};

		if let Some(selector) = el {
			instance.mount(&selector)?;
		}

		Ok(instance)
	}

	/// Replaces the node matching `selector` with the rendered tree.
	pub fn mount(&self, selector: &str) -> Result<()> {
		let placeholder = self
			.inner
			.host
			.query_root(selector)
			.ok_or_else(|| Error::MountTargetNotFound(selector.to_owned()))?;

		self.mount_node(placeholder)
	}

	pub fn mount_node(&self, placeholder: H::Node) -> Result<()> {
		{
			let mut phase = self.inner.phase.borrow_mut();
			if !matches!(*phase, Phase::Unmounted) {
				return Err(Error::AlreadyMounted);
			}
			*phase = Phase::FirstRender(placeholder);
		}

		tracing::debug!("mounting instance");

		let inner = Rc::downgrade(&self.inner);
		let computation = Computation::new_with_name(
			"render",
			Box::new(move || match inner.upgrade() {
				Some(inner) => inner.update(),
				None => Ok(()),
			}),
		);

		*self.inner.computation.borrow_mut() = Some(computation.clone());
		computation.evaluate()
	}

	/// Tracked read through the top-level forwarding table.
	pub fn get(&self, key: &str) -> Result<Value> {
		self.inner.proxy.get(key)
	}

	/// Writes a top-level key; dependent renders complete before this returns.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
		self.inner.proxy.set(key, value)
	}

	pub fn data(&self) -> &Object {
		&self.inner.data
	}

	pub fn proxy(&self) -> &Proxy {
		&self.inner.proxy
	}

	pub fn host(&self) -> &H {
		&self.inner.host
	}

	pub fn is_mounted(&self) -> bool {
		!matches!(*self.inner.phase.borrow(), Phase::Unmounted)
	}

	/// The output node standing for this instance: the placeholder until the
	/// first render succeeds, the rendered root afterwards.
	pub fn root(&self) -> Option<H::Node> {
		match &*self.inner.phase.borrow() {
			Phase::Unmounted => None,
			Phase::FirstRender(placeholder) => Some(placeholder.clone()),
			Phase::Steady(tree) => tree.output().cloned(),
		}
	}

	/// The render computation, once mounted.
	pub fn computation(&self) -> Option<Computation> {
		self.inner.computation.borrow().clone()
	}

	/// How many times the render computation has run.
	pub fn evaluations(&self) -> usize {
		self.inner
			.computation
			.borrow()
			.as_ref()
			.map_or(0, Computation::evaluations)
	}
}

impl<H: Host> InstanceInner<H> {
	fn update(&self) -> Result<()> {
		let mut next = (self.render)(&self.proxy, create_element::<H::Node>)?;

		let reconciler = Reconciler::new(&self.host);
		let mut phase = self.phase.borrow_mut();
		let result = match &*phase {
			Phase::Unmounted => return Ok(()),
			Phase::FirstRender(placeholder) => {
				reconciler.patch(Previous::Placeholder(placeholder.clone()), &mut next)
			}
			Phase::Steady(previous) => reconciler.patch(Previous::Tree(previous), &mut next),
		};

		match result {
			Ok(()) => {
				*phase = Phase::Steady(next);
				Ok(())
			}
			Err(err) => {
				// A failed patch may have changed part of the output, so the
				// stored tree no longer describes it. Rebuild from scratch.
				if let Phase::Steady(previous) = &*phase {
					if let Some(root) = previous.output().cloned() {
						tracing::warn!(error = %err, "patch failed, next render replaces the root");
						*phase = Phase::FirstRender(root);
					}
				}
				Err(err)
			}
		}
	}
}
