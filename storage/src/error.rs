use std::fmt;

use primitives::hash::H256;

/// Faults of the chain-state backend, as opposed to consensus violations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// Low-level database failure.
	DatabaseDriverError(String),
	/// The requested chain position is not stored.
	UnknownParent(H256),
	/// Recorded state contradicts itself, e.g. spend markers without the
	/// transaction they belong to.
	InconsistentData(H256),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::DatabaseDriverError(ref message) => write!(f, "database driver error: {}", message),
			Error::UnknownParent(ref hash) => write!(f, "parent block {} is not stored", hash.to_reversed_str()),
			Error::InconsistentData(ref hash) => write!(f, "stored state for transaction {} is inconsistent", hash.to_reversed_str()),
		}
	}
}
