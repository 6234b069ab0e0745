use std::cmp;

use primitives::hash::H256;

use crate::block_header::BlockHeader;

/// A block header together with its hash.
///
/// Hashing happens in the wire layer; this type only pairs the two so that
/// downstream code never recomputes the hash.
#[derive(Debug, Clone)]
pub struct IndexedBlockHeader {
	pub hash: H256,
	pub raw: BlockHeader,
}

impl IndexedBlockHeader {
	pub fn new(hash: H256, raw: BlockHeader) -> Self {
		IndexedBlockHeader { hash, raw }
	}
}

impl cmp::PartialEq for IndexedBlockHeader {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
	}
}
