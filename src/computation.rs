use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::evaluation::Evaluation;
use crate::Derived;

/// A re-runnable unit of work that discovers its dependencies by reading
/// property cells while it evaluates.
///
/// The callback captures whatever receiver it needs. A computation is not
/// evaluated on construction; call [`Computation::evaluate`] once to run it
/// and collect its initial dependencies.
#[derive(Clone)]
pub struct Computation {
	body: Rc<ComputationBody>,
}

pub(crate) struct ComputationBody {
	name: &'static str,
	func: Box<dyn Fn() -> Result<()>>,
	running: Cell<bool>,
	evaluations: Cell<usize>,
	this: Weak<ComputationBody>,
}

impl Computation {
	#[must_use]
	pub fn new(func: Box<dyn Fn() -> Result<()>>) -> Self {
		Self::new_with_name("<unnamed>", func)
	}

	#[must_use]
	pub fn new_with_name(name: &'static str, func: Box<dyn Fn() -> Result<()>>) -> Self {
		Computation {
			body: Rc::new_cyclic(|this| ComputationBody {
				name,
				func,
				running: Cell::new(false),
				evaluations: Cell::new(0),
				this: this.clone(),
			}),
		}
	}

	#[inline]
	pub fn evaluate(&self) -> Result<()> {
		self.body.evaluate()
	}

	pub fn name(&self) -> &'static str {
		self.body.name
	}

	/// How many times the callback has been invoked.
	pub fn evaluations(&self) -> usize {
		self.body.evaluations.get()
	}

	/// The identity under which this computation subscribes to cells.
	pub fn as_derived(&self) -> Weak<dyn Derived> {
		Rc::downgrade(&self.body) as Weak<dyn Derived>
	}
}

impl ComputationBody {
	fn evaluate(&self) -> Result<()> {
		// A write made by the callback itself must not restart it mid-run.
		if self.running.get() {
			tracing::warn!(name = self.name, "skipping re-entrant evaluation");
			return Ok(());
		}

		let span = tracing::debug_span!("evaluate", name = self.name);
		let _enter = span.enter();

		let _running = Running::start(&self.running);
		let _scope = Evaluation::enter(self.this.clone() as Weak<dyn Derived>);
		self.evaluations.set(self.evaluations.get() + 1);

		(self.func)()
	}
}

impl Derived for ComputationBody {
	fn invalidate(self: Rc<Self>) -> Result<()> {
		self.evaluate()
	}
}

struct Running<'a>(&'a Cell<bool>);

impl<'a> Running<'a> {
	fn start(flag: &'a Cell<bool>) -> Self {
		flag.set(true);
		Running(flag)
	}
}

impl Drop for Running<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

impl std::fmt::Debug for Computation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Computation")
			.field("name", &self.body.name)
			.field("evaluations", &self.body.evaluations.get())
			.finish()
	}
}
