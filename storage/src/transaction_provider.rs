use chain::IndexedBlock;
use primitives::hash::H256;

use crate::{BlockNode, Error, TransactionData, TransactionDataMap};

/// Resolves the previous outputs referenced by a block's inputs.
pub trait InputTransactionProvider {
	/// Builds the input-resolution map for `block`: every transaction
	/// referenced by a non-coinbase input, with spend state as of the
	/// parent of `node`. References the chain does not know are absent
	/// from the map.
	fn input_transactions(&self, node: &BlockNode, block: &IndexedBlock) -> Result<TransactionDataMap, Error>;
}

/// Looks up prior occurrences of transaction hashes in the recorded chain.
pub trait RecordedTransactionProvider {
	/// Fetches each hash as of the parent of `node`; `None` marks a hash
	/// that was never recorded.
	fn recorded_transactions(&self, node: &BlockNode, hashes: &[H256]) -> Result<Vec<Option<TransactionData>>, Error>;
}
