use fxhash::FxHashSet;

use crate::error::{Error, Result};
use crate::{Object, Value};

/// Forwards top-level keys of the root data object, so render functions
/// read `vm.get("count")` instead of going through the data object.
///
/// The table of forwarded keys is fixed at construction.
pub struct Proxy {
	data: Object,
	forwarded: FxHashSet<String>,
}

impl Proxy {
	pub fn new(data: &Object) -> Self {
		Proxy {
			data: data.clone(),
			forwarded: data.keys().into_iter().collect(),
		}
	}

	/// Tracked read of a forwarded key.
	pub fn get(&self, key: &str) -> Result<Value> {
		if !self.forwarded.contains(key) {
			return Err(Error::UndefinedProperty(key.to_owned()));
		}

		self.data
			.get(key)
			.ok_or_else(|| Error::UndefinedProperty(key.to_owned()))
	}

	/// Writes through to the data object. Keys that were not present at
	/// construction end up as untracked data.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
		self.data.set(key, value)
	}

	pub fn is_forwarded(&self, key: &str) -> bool {
		self.forwarded.contains(key)
	}

	/// Forwarded keys in sorted order.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.forwarded.iter().map(String::as_str).collect();
		keys.sort_unstable();
		keys
	}

	pub fn data(&self) -> &Object {
		&self.data
	}
}
