use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Weak;

use crate::Derived;

thread_local! {
	/// Evaluations currently on the call stack, innermost last. `None` marks
	/// an untracked section.
	static ACTIVE: RefCell<Vec<Option<Weak<dyn Derived>>>> = RefCell::new(Vec::new());
}

/// The computation that reads should currently be attributed to.
pub fn active() -> Option<Weak<dyn Derived>> {
	ACTIVE.with(|stack| stack.borrow().last().cloned().flatten())
}

/// Number of evaluation scopes currently entered on this thread.
pub fn depth() -> usize {
	ACTIVE.with(|stack| stack.borrow().len())
}

/// Runs `func` without attributing its reads to any computation.
pub fn untracked<R>(func: impl FnOnce() -> R) -> R {
	let _scope = Evaluation::push(None);
	func()
}

/// Scope guard of one evaluation. The previous active computation is
/// restored when the guard drops, including during unwinding.
#[must_use]
pub struct Evaluation {
	_not_send: PhantomData<*const ()>,
}

impl Evaluation {
	pub fn enter(derived: Weak<dyn Derived>) -> Self {
		Self::push(Some(derived))
	}

	fn push(entry: Option<Weak<dyn Derived>>) -> Self {
		ACTIVE.with(|stack| stack.borrow_mut().push(entry));
		Evaluation {
			_not_send: PhantomData,
		}
	}
}

impl Drop for Evaluation {
	fn drop(&mut self) {
		ACTIVE.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}
