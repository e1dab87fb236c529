use std::cmp::Ordering;
use std::rc::{Rc, Weak};

/// Orders and compares weak pointers by the address they point to, so that
/// computations can be kept in sets by identity.
pub struct WeakAddr<T: ?Sized> {
	ptr: Weak<T>,
}

impl<T: ?Sized> WeakAddr<T> {
	pub fn new(ptr: Weak<T>) -> Self {
		WeakAddr { ptr }
	}

	fn addr(&self) -> *const () {
		Weak::as_ptr(&self.ptr) as *const ()
	}

	pub fn is_live(&self) -> bool {
		self.ptr.strong_count() > 0
	}

	pub fn upgrade(&self) -> Option<Rc<T>> {
		self.ptr.upgrade()
	}
}

impl<T: ?Sized> PartialEq for WeakAddr<T> {
	fn eq(&self, other: &Self) -> bool {
		self.addr().eq(&other.addr())
	}
}

impl<T: ?Sized> Eq for WeakAddr<T> {}

impl<T: ?Sized> Ord for WeakAddr<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.addr().cmp(&other.addr())
	}
}

impl<T: ?Sized> PartialOrd for WeakAddr<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
