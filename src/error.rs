use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Instance data must resolve to an object.
	#[error("instance data must be an object, got {0}")]
	InvalidData(&'static str),

	#[error("mount target `{0}` was not found")]
	MountTargetNotFound(String),

	#[error("instance is already mounted")]
	AlreadyMounted,

	/// The node to replace has no parent to insert the replacement into.
	#[error("cannot replace a node that is not attached to a parent")]
	Detached,

	/// A previous tree node has no output to patch.
	#[error("node `{0}` was never materialized")]
	Unmaterialized(String),

	#[error("property `{0}` is not defined")]
	UndefinedProperty(String),

	#[error("index {index} is out of bounds for an array of length {len}")]
	IndexOutOfBounds { index: usize, len: usize },

	#[error("host operation failed: {0}")]
	Host(String),

	/// Raised by user render functions.
	#[error("render failed: {0}")]
	Render(String),
}
