//! Wrapper around `Vec<u8>`

use std::{fmt, ops};
use rustc_hex::{FromHex, ToHex};

/// Owned byte buffer with hex conveniences, used for script payloads.
#[derive(Default, PartialEq, Eq, Clone, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
	pub fn new() -> Self {
		Bytes::default()
	}

	pub fn new_with_len(len: usize) -> Self {
		Bytes(vec![0; len])
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(vec: Vec<u8>) -> Self {
		Bytes(vec)
	}
}

impl From<&'static str> for Bytes {
	fn from(s: &'static str) -> Self {
		Bytes(s.from_hex().expect("byte literals are valid hex"))
	}
}

impl ops::Deref for Bytes {
	type Target = Vec<u8>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Debug for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

#[cfg(test)]
mod tests {
	use super::Bytes;

	#[test]
	fn hex_literal() {
		let bytes: Bytes = "a914000087".into();
		assert_eq!(*bytes, vec![0xa9, 0x14, 0x00, 0x00, 0x87]);
	}
}
