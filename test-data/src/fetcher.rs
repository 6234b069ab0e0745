use std::collections::HashMap;

use chain::{IndexedBlock, IndexedTransaction};
use primitives::hash::H256;
use storage::{
	BlockNode, Error, InputTransactionProvider, RecordedTransactionProvider, TransactionData,
	TransactionDataMap,
};

/// In-memory stand-in for the chain-state fetch interfaces.
///
/// One map backs both roles: resolving the previous outputs of a block and
/// looking up recorded occurrences of transaction hashes. Every call hands
/// out clones, so a validation pass owns its data exclusively.
pub struct MemoryFetcher {
	transactions: HashMap<H256, TransactionData>,
	fail: bool,
}

impl MemoryFetcher {
	pub fn new() -> Self {
		MemoryFetcher {
			transactions: HashMap::new(),
			fail: false,
		}
	}

	/// A fetcher whose every call fails, for propagation tests and for
	/// asserting that no fetch happens at all.
	pub fn failing() -> Self {
		MemoryFetcher {
			transactions: HashMap::new(),
			fail: true,
		}
	}

	pub fn fund(&mut self, transaction: &IndexedTransaction, height: u32) {
		self.transactions.insert(
			transaction.hash,
			TransactionData::new(transaction.raw.clone(), height),
		);
	}

	pub fn fund_with_data(&mut self, hash: H256, data: TransactionData) {
		self.transactions.insert(hash, data);
	}
}

impl Default for MemoryFetcher {
	fn default() -> Self {
		MemoryFetcher::new()
	}
}

impl InputTransactionProvider for MemoryFetcher {
	fn input_transactions(&self, _node: &BlockNode, block: &IndexedBlock) -> Result<TransactionDataMap, Error> {
		if self.fail {
			return Err(Error::DatabaseDriverError("memory fetcher set to fail".into()));
		}

		let mut map = TransactionDataMap::new();
		for tx in &block.transactions {
			for input in &tx.raw.inputs {
				let prevout = &input.previous_output;
				if prevout.is_null() {
					continue;
				}
				if let Some(data) = self.transactions.get(&prevout.hash) {
					map.insert(prevout.hash, data.clone());
				}
			}
		}
		Ok(map)
	}
}

impl RecordedTransactionProvider for MemoryFetcher {
	fn recorded_transactions(&self, _node: &BlockNode, hashes: &[H256]) -> Result<Vec<Option<TransactionData>>, Error> {
		if self.fail {
			return Err(Error::DatabaseDriverError("memory fetcher set to fail".into()));
		}

		Ok(hashes
			.iter()
			.map(|hash| self.transactions.get(hash).cloned())
			.collect())
	}
}
