pub mod evaluation;
pub mod macros;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

mod addr;
mod cell;
mod computation;
mod dependencies;
mod error;
mod host;
mod instance;
mod object;
mod observer;
mod options;
mod proxy;
mod reconcile;
mod value;
mod vnode;

use std::rc::Rc;

pub use cell::PropertyCell;
pub use computation::Computation;
pub use dependencies::DependencySet;
pub use error::{Error, Result};
pub use evaluation::{untracked, Evaluation};
pub use host::Host;
pub use instance::Instance;
pub use object::{Array, Object};
pub use observer::observe;
pub use options::{DataSource, Options, Render};
pub use proxy::Proxy;
pub use reconcile::{Previous, Reconciler};
pub use value::Value;
pub use vnode::{create_element, Attributes, Children, CreateElement, VNode};

pub trait Derived: 'static {
	/// Called by a dependency that changed. Implementations re-run
	/// synchronously and report the outcome to the writer.
	fn invalidate(self: Rc<Self>) -> Result<()>;
}
