use std::fmt::{self, Debug, Display};

use crate::object::{Array, Object};

/// Dynamic data stored in observed containers.
///
/// Containers are reference handles: cloning a `Value::Object` clones the
/// handle, not the object. Equality is strict, primitives compare by value
/// and containers by identity.
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	Object(Object),
	Array(Array),
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Object(_) => "object",
			Value::Array(_) => "array",
		}
	}

	#[inline]
	pub fn is_container(&self) -> bool {
		matches!(self, Value::Object(_) | Value::Array(_))
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&Array> {
		match self {
			Value::Array(array) => Some(array),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			(Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Number(n) => fmt_number(*n, f),
			Value::String(s) => f.write_str(s),
			Value::Object(_) => f.write_str("[object Object]"),
			Value::Array(array) => {
				for (index, item) in array.values().iter().enumerate() {
					if index > 0 {
						f.write_str(",")?;
					}
					if !matches!(item, Value::Null) {
						Display::fmt(item, f)?;
					}
				}
				Ok(())
			}
		}
	}
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	if n.is_nan() {
		f.write_str("NaN")
	} else if n.is_infinite() {
		f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
	} else if n == 0.0 {
		f.write_str("0")
	} else if n.fract() == 0.0 && n.abs() < 1e21 {
		write!(f, "{:.0}", n)
	} else {
		write!(f, "{}", n)
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("Null"),
			Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Value::String(s) => f.debug_tuple("String").field(s).finish(),
			Value::Object(object) => object.fmt(f),
			Value::Array(array) => array.fmt(f),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

macro_rules! from_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Number(value as f64)
				}
			}
		)*
	};
}

from_number!(i32, i64, u32, u64, usize, f32);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Value::Object(value)
	}
}

impl From<Array> for Value {
	fn from(value: Array) -> Self {
		Value::Array(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}
