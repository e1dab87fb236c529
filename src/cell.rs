use std::cell::RefCell;
use std::fmt::{self, Debug};

use crate::dependencies::DependencySet;
use crate::error::Result;
use crate::evaluation;
use crate::observer::observe;
use crate::Value;

/// Intercepted storage of one observed property.
///
/// Reads made while a computation is evaluating subscribe that computation;
/// writes of a different value notify every subscriber before returning.
pub struct PropertyCell {
	key: String,
	value: RefCell<Value>,
	dependencies: DependencySet,
}

impl PropertyCell {
	pub fn new(key: impl Into<String>, value: Value) -> Self {
		observe(&value);
		PropertyCell {
			key: key.into(),
			value: RefCell::new(value),
			dependencies: DependencySet::new(),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn read(&self) -> Value {
		tracing::trace!(key = %self.key, "get");
		if let Some(active) = evaluation::active() {
			self.dependencies.add(active);
		}
		self.value.borrow().clone()
	}

	/// Reads the current value without subscribing anyone.
	pub fn peek(&self) -> Value {
		self.value.borrow().clone()
	}

	pub fn write(&self, value: Value) -> Result<()> {
		if *self.value.borrow() == value {
			return Ok(());
		}

		observe(&value);
		// Formatting a container would read its cells; log the kind only.
		tracing::trace!(key = %self.key, kind = value.type_name(), "set");
		*self.value.borrow_mut() = value;

		self.dependencies.notify()
	}

	pub fn dependencies(&self) -> &DependencySet {
		&self.dependencies
	}
}

impl Debug for PropertyCell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyCell")
			.field("key", &self.key)
			.field("value", &*self.value.borrow())
			.field("dependencies", &self.dependencies.len())
			.finish()
	}
}
