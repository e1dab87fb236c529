use std::rc::Rc;

use crate::cell::PropertyCell;
use crate::Value;

/// Makes every own key of a container reactive, recursing into nested
/// containers. Primitives pass through untouched.
///
/// A container is walked once; observing it again, directly or through a
/// reference cycle, does nothing. Keys added after the walk stay untracked.
pub fn observe(value: &Value) {
	match value {
		Value::Object(object) => {
			if !object.begin_observe() {
				return;
			}
			for (key, value) in object.plain_entries() {
				let cell = PropertyCell::new(key.as_str(), value);
				object.install(key, Rc::new(cell));
			}
		}
		Value::Array(array) => {
			if !array.begin_observe() {
				return;
			}
			for (index, value) in array.plain_entries() {
				let cell = PropertyCell::new(index.to_string(), value);
				array.install(index, Rc::new(cell));
			}
		}
		_ => {}
	}
}
