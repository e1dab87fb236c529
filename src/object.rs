use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::cell::PropertyCell;
use crate::error::{Error, Result};
use crate::Value;

/// Storage for one key of a container.
///
/// Keys present when the container is observed become `Observed`; keys added
/// afterwards stay `Plain` and bypass dependency tracking.
#[derive(Clone)]
pub(crate) enum Slot {
	Plain(Value),
	Observed(Rc<PropertyCell>),
}

impl Slot {
	fn cell(&self) -> Option<Rc<PropertyCell>> {
		match self {
			Slot::Observed(cell) => Some(cell.clone()),
			Slot::Plain(_) => None,
		}
	}

	fn peek(&self) -> Value {
		match self {
			Slot::Plain(value) => value.clone(),
			Slot::Observed(cell) => cell.peek(),
		}
	}
}

/// A keyed container. Cloning yields another handle to the same object.
#[derive(Clone, Default)]
pub struct Object {
	body: Rc<ObjectBody>,
}

#[derive(Default)]
pub(crate) struct ObjectBody {
	slots: RefCell<BTreeMap<String, Slot>>,
	observed: Cell<bool>,
}

impl Object {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of a plain insert, used to assemble data before it is
	/// observed.
	pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.body
			.slots
			.borrow_mut()
			.insert(key.into(), Slot::Plain(value.into()));
		self
	}

	/// Reads `key`, registering the active computation if the key is observed.
	pub fn get(&self, key: &str) -> Option<Value> {
		let slot = self.body.slots.borrow().get(key).cloned()?;
		Some(match slot {
			Slot::Observed(cell) => cell.read(),
			Slot::Plain(value) => value,
		})
	}

	/// Reads `key` without registering any dependency.
	pub fn peek(&self, key: &str) -> Option<Value> {
		self.body.slots.borrow().get(key).map(Slot::peek)
	}

	/// Writes `key`. Observed keys notify their dependents, anything else is
	/// stored as a plain untracked value.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		let cell = self.body.slots.borrow().get(key).and_then(Slot::cell);
		match cell {
			Some(cell) => cell.write(value),
			None => {
				tracing::trace!(key, "untracked write");
				self.body
					.slots
					.borrow_mut()
					.insert(key.to_owned(), Slot::Plain(value));
				Ok(())
			}
		}
	}

	pub fn cell(&self, key: &str) -> Option<Rc<PropertyCell>> {
		self.body.slots.borrow().get(key).and_then(Slot::cell)
	}

	pub fn keys(&self) -> Vec<String> {
		self.body.slots.borrow().keys().cloned().collect()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.body.slots.borrow().contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.body.slots.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether the observer has already walked this object.
	pub fn is_observed(&self) -> bool {
		self.body.observed.get()
	}

	#[inline]
	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	/// Marks the object as observed. Returns `false` if it already was.
	pub(crate) fn begin_observe(&self) -> bool {
		!self.body.observed.replace(true)
	}

	pub(crate) fn plain_entries(&self) -> Vec<(String, Value)> {
		self.body
			.slots
			.borrow()
			.iter()
			.filter_map(|(key, slot)| match slot {
				Slot::Plain(value) => Some((key.clone(), value.clone())),
				Slot::Observed(_) => None,
			})
			.collect()
	}

	pub(crate) fn install(&self, key: String, cell: Rc<PropertyCell>) {
		self.body
			.slots
			.borrow_mut()
			.insert(key, Slot::Observed(cell));
	}
}

impl<K, V> FromIterator<(K, V)> for Object
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		iter.into_iter()
			.fold(Object::new(), |object, (key, value)| object.with(key, value))
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots = self.body.slots.borrow();
		f.debug_map()
			.entries(slots.iter().map(|(key, slot)| (key, slot.peek())))
			.finish()
	}
}

/// An indexed container. Elements present when the array is observed are
/// tracked by index; `push` appends untracked elements.
#[derive(Clone, Default)]
pub struct Array {
	body: Rc<ArrayBody>,
}

#[derive(Default)]
pub(crate) struct ArrayBody {
	slots: RefCell<Vec<Slot>>,
	observed: Cell<bool>,
}

impl Array {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, index: usize) -> Option<Value> {
		let slot = self.body.slots.borrow().get(index).cloned()?;
		Some(match slot {
			Slot::Observed(cell) => cell.read(),
			Slot::Plain(value) => value,
		})
	}

	pub fn peek(&self, index: usize) -> Option<Value> {
		self.body.slots.borrow().get(index).map(Slot::peek)
	}

	pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		let cell = {
			let slots = self.body.slots.borrow();
			let len = slots.len();
			slots
				.get(index)
				.ok_or(Error::IndexOutOfBounds { index, len })?
				.cell()
		};

		match cell {
			Some(cell) => cell.write(value),
			None => {
				tracing::trace!(index, "untracked write");
				self.body.slots.borrow_mut()[index] = Slot::Plain(value);
				Ok(())
			}
		}
	}

	/// Appends an element. The length of an array is never tracked.
	pub fn push(&self, value: impl Into<Value>) {
		self.body.slots.borrow_mut().push(Slot::Plain(value.into()));
	}

	/// Tracked read of every element in order.
	pub fn values(&self) -> Vec<Value> {
		(0..self.len()).filter_map(|index| self.get(index)).collect()
	}

	pub fn cell(&self, index: usize) -> Option<Rc<PropertyCell>> {
		self.body.slots.borrow().get(index).and_then(Slot::cell)
	}

	pub fn len(&self) -> usize {
		self.body.slots.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_observed(&self) -> bool {
		self.body.observed.get()
	}

	#[inline]
	pub fn ptr_eq(&self, other: &Array) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	pub(crate) fn begin_observe(&self) -> bool {
		!self.body.observed.replace(true)
	}

	pub(crate) fn plain_entries(&self) -> Vec<(usize, Value)> {
		self.body
			.slots
			.borrow()
			.iter()
			.enumerate()
			.filter_map(|(index, slot)| match slot {
				Slot::Plain(value) => Some((index, value.clone())),
				Slot::Observed(_) => None,
			})
			.collect()
	}

	pub(crate) fn install(&self, index: usize, cell: Rc<PropertyCell>) {
		self.body.slots.borrow_mut()[index] = Slot::Observed(cell);
	}
}

impl<V: Into<Value>> FromIterator<V> for Array {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		let array = Array::new();
		for value in iter {
			array.push(value);
		}
		array
	}
}

impl Debug for Array {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots = self.body.slots.borrow();
		f.debug_list().entries(slots.iter().map(Slot::peek)).finish()
	}
}
