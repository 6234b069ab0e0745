use std::collections::HashMap;

use bit_vec::BitVec;
use chain::Transaction;
use primitives::hash::H256;

/// Input-resolution entries for one validation pass, keyed by the hash of
/// the referenced transaction.
pub type TransactionDataMap = HashMap<H256, TransactionData>;

/// A previously recorded transaction together with its confirmation height
/// and per-output spend markers.
///
/// The `spent` bitmap is snapshotted by the chain layer when the map is
/// built and mutated in place while the connecting block's inputs are
/// walked. The map is owned by a single validation pass; committing the
/// updated markers is the chain layer's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionData {
	pub transaction: Transaction,
	pub height: u32,
	pub spent: BitVec,
}

impl TransactionData {
	pub fn new(transaction: Transaction, height: u32) -> Self {
		let outputs = transaction.outputs.len();
		TransactionData {
			transaction,
			height,
			spent: BitVec::from_elem(outputs, false),
		}
	}

	pub fn is_coinbase(&self) -> bool {
		self.transaction.is_coinbase()
	}

	/// True once every output has been consumed.
	pub fn is_fully_spent(&self) -> bool {
		self.spent.iter().all(|spent| spent)
	}
}
