use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::addr::WeakAddr;
use crate::error::Result;
use crate::Derived;

/// The computations subscribed to one property cell.
pub struct DependencySet {
	used_by: RefCell<BTreeSet<WeakAddr<dyn Derived>>>,
}

impl Default for DependencySet {
	fn default() -> Self {
		DependencySet {
			used_by: RefCell::new(BTreeSet::new()),
		}
	}
}

impl DependencySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribes `derived`. Adding the same computation twice is a no-op.
	pub fn add(&self, derived: Weak<dyn Derived>) {
		self.used_by.borrow_mut().insert(WeakAddr::new(derived));
	}

	pub fn contains(&self, derived: &Weak<dyn Derived>) -> bool {
		self.used_by
			.borrow()
			.contains(&WeakAddr::new(derived.clone()))
	}

	pub fn len(&self) -> usize {
		self.used_by.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Re-evaluates every live subscriber, stopping at the first error.
	///
	/// Subscribers are collected up front: evaluations read cells and may
	/// subscribe to this very set while it is being notified.
	pub fn notify(&self) -> Result<()> {
		let live: SmallVec<[Rc<dyn Derived>; 4]> = {
			let mut used_by = self.used_by.borrow_mut();
			used_by.retain(WeakAddr::is_live);
			used_by.iter().filter_map(|item| item.upgrade()).collect()
		};

		for derived in live {
			derived.invalidate()?;
		}

		Ok(())
	}
}
