use std::cmp;

use primitives::hash::H256;

use crate::transaction::Transaction;

/// A transaction together with its hash.
#[derive(Debug, Clone)]
pub struct IndexedTransaction {
	pub hash: H256,
	pub raw: Transaction,
}

impl IndexedTransaction {
	pub fn new(hash: H256, raw: Transaction) -> Self {
		IndexedTransaction { hash, raw }
	}
}

impl cmp::PartialEq for IndexedTransaction {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
	}
}
