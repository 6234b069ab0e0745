use std::cmp;

use primitives::hash::H256;

use crate::indexed_header::IndexedBlockHeader;
use crate::indexed_transaction::IndexedTransaction;

#[derive(Debug, Clone)]
pub struct IndexedBlock {
	pub header: IndexedBlockHeader,
	pub transactions: Vec<IndexedTransaction>,
}

impl cmp::PartialEq for IndexedBlock {
	fn eq(&self, other: &Self) -> bool {
		self.header.hash == other.header.hash
	}
}

impl IndexedBlock {
	pub fn new(header: IndexedBlockHeader, transactions: Vec<IndexedTransaction>) -> Self {
		IndexedBlock { header, transactions }
	}

	pub fn hash(&self) -> &H256 {
		&self.header.hash
	}
}
