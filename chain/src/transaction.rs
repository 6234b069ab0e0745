//! Bitcoin transaction.
//! https://en.bitcoin.it/wiki/Protocol_documentation#tx

use primitives::bytes::Bytes;
use primitives::hash::H256;

use crate::constants::{LOCKTIME_THRESHOLD, SEQUENCE_FINAL};

#[derive(Debug, PartialEq, Eq, Clone, Default, Hash)]
pub struct OutPoint {
	pub hash: H256,
	pub index: u32,
}

impl OutPoint {
	pub fn null() -> Self {
		OutPoint {
			hash: H256::default(),
			index: u32::max_value(),
		}
	}

	pub fn is_null(&self) -> bool {
		self.hash.is_zero() && self.index == u32::max_value()
	}
}

#[derive(Debug, PartialEq, Default, Clone)]
pub struct TransactionInput {
	pub previous_output: OutPoint,
	pub script_sig: Bytes,
	pub sequence: u32,
}

impl TransactionInput {
	pub fn coinbase(script_sig: Bytes) -> Self {
		TransactionInput {
			previous_output: OutPoint::null(),
			script_sig,
			sequence: SEQUENCE_FINAL,
		}
	}

	pub fn is_final(&self) -> bool {
		self.sequence == SEQUENCE_FINAL
	}
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct TransactionOutput {
	pub value: i64,
	pub script_pubkey: Bytes,
}

#[derive(Debug, PartialEq, Default, Clone)]
pub struct Transaction {
	pub version: i32,
	pub inputs: Vec<TransactionInput>,
	pub outputs: Vec<TransactionOutput>,
	pub lock_time: u32,
}

impl Transaction {
	pub fn is_empty(&self) -> bool {
		self.inputs.is_empty() || self.outputs.is_empty()
	}

	pub fn is_null(&self) -> bool {
		self.inputs.iter().any(|input| input.previous_output.is_null())
	}

	pub fn is_coinbase(&self) -> bool {
		self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
	}

	pub fn is_final_in_block(&self, block_height: u32, block_time: u32) -> bool {
		// if lock_time is 0, transaction is final
		if self.lock_time == 0 {
			return true;
		}

		let cutoff = if self.lock_time < LOCKTIME_THRESHOLD {
			block_height
		} else {
			block_time
		};

		if self.lock_time < cutoff {
			return true;
		}

		// setting all sequence numbers to 0xffffffff disables the time lock,
		// so if you want to use locktime, at least one input must have a
		// sequence number below the maximum.
		self.inputs.iter().all(TransactionInput::is_final)
	}

	/// Sum of the output values, saturating at the `i64` maximum.
	pub fn total_spends(&self) -> i64 {
		self.outputs
			.iter()
			.fold(0i64, |acc, output| acc.saturating_add(output.value))
	}
}
