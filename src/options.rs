use crate::error::{Error, Result};
use crate::proxy::Proxy;
use crate::vnode::{CreateElement, VNode};
use crate::{Object, Value};

pub type Render<N> = Box<dyn Fn(&Proxy, CreateElement<N>) -> Result<VNode<N>>>;

/// Where instance data comes from.
pub enum DataSource {
	Value(Value),
	Factory(Box<dyn FnOnce() -> Value>),
}

impl DataSource {
	pub(crate) fn resolve(self) -> Result<Object> {
		let value = match self {
			DataSource::Value(value) => value,
			DataSource::Factory(factory) => factory(),
		};

		match value {
			Value::Object(object) => Ok(object),
			other => Err(Error::InvalidData(other.type_name())),
		}
	}
}

/// Construction options of an [`Instance`](crate::Instance).
///
/// ```ignore
/// let options = Options::new(|vm, h| {
///     Ok(h("p", Attributes::new(), vm.get("count")?.to_string().into()))
/// })
/// .el("#app")
/// .data(Object::new().with("count", 0));
/// ```
pub struct Options<N> {
	pub(crate) el: Option<String>,
	pub(crate) data: DataSource,
	pub(crate) render: Render<N>,
}

impl<N> Options<N> {
	pub fn new(render: impl Fn(&Proxy, CreateElement<N>) -> Result<VNode<N>> + 'static) -> Self {
		Options {
			el: None,
			data: DataSource::Value(Value::Object(Object::new())),
			render: Box::new(render),
		}
	}

	/// Selector of the placeholder to mount over on construction.
	pub fn el(mut self, selector: impl Into<String>) -> Self {
		self.el = Some(selector.into());
		self
	}

	pub fn data(mut self, data: impl Into<Value>) -> Self {
		self.data = DataSource::Value(data.into());
		self
	}

	pub fn data_fn(mut self, factory: impl FnOnce() -> Value + 'static) -> Self {
		self.data = DataSource::Factory(Box::new(factory));
		self
	}
}
