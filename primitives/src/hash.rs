//! Fixed-size hashes

use std::{fmt, ops, str};
use rustc_hex::{FromHex, FromHexError, ToHex};

/// A 256-bit hash, stored in the byte order it appears on the wire.
///
/// User-facing representations (explorers, log messages) reverse the bytes;
/// use [`H256::to_reversed_str`] and [`H256::from_reversed_str`] for those.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct H256([u8; 32]);

impl H256 {
	pub fn from_reversed_str(s: &'static str) -> Self {
		H256::from(s).reversed()
	}

	pub fn to_reversed_str(&self) -> String {
		self.reversed().to_string()
	}

	pub fn reversed(&self) -> Self {
		let mut result = *self;
		result.0.reverse();
		result
	}

	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|byte| *byte == 0)
	}
}

impl From<[u8; 32]> for H256 {
	fn from(bytes: [u8; 32]) -> Self {
		H256(bytes)
	}
}

impl From<u8> for H256 {
	fn from(value: u8) -> Self {
		let mut result = H256::default();
		result.0[0] = value;
		result
	}
}

impl From<&'static str> for H256 {
	fn from(s: &'static str) -> Self {
		s.parse().expect("hash literals are valid hex")
	}
}

impl str::FromStr for H256 {
	type Err = FromHexError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bytes: Vec<u8> = s.from_hex()?;
		if bytes.len() != 32 {
			return Err(FromHexError::InvalidHexLength);
		}
		let mut result = H256::default();
		result.0.copy_from_slice(&bytes);
		Ok(result)
	}
}

impl ops::Deref for H256 {
	type Target = [u8; 32];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl AsRef<[u8]> for H256 {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Debug for H256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

impl fmt::Display for H256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}
