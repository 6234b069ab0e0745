//! Deterministic identity hashes for fixtures.
//!
//! Wire hashing lives outside this workspace, so fixtures derive their
//! hashes from content with an FNV-style fold. Distinct content yields
//! distinct hashes for test-sized data. The most significant byte of the
//! big-endian interpretation is kept clear, so every fixture hash
//! satisfies the permissive test-network proof-of-work target.

use chain::{BlockHeader, Transaction};
use primitives::hash::H256;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

struct Fold(u64);

impl Fold {
	fn new() -> Self {
		Fold(FNV_OFFSET)
	}

	fn byte(&mut self, byte: u8) {
		self.0 = (self.0 ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
	}

	fn bytes(&mut self, bytes: &[u8]) {
		for byte in bytes {
			self.byte(*byte);
		}
	}

	fn u32(&mut self, value: u32) {
		self.bytes(&value.to_le_bytes());
	}

	fn i64(&mut self, value: i64) {
		self.bytes(&value.to_le_bytes());
	}

	fn finish(self) -> H256 {
		let mut out = [0u8; 32];
		let mut lane = self.0;
		for chunk in out.chunks_mut(8) {
			lane = (lane ^ 0x9e37_79b9_7f4a_7c15).wrapping_mul(FNV_PRIME);
			chunk.copy_from_slice(&lane.to_le_bytes());
		}
		// byte 31 becomes the most significant byte of the big-endian value
		out[31] = 0;
		H256::from(out)
	}
}

pub fn transaction_hash(transaction: &Transaction) -> H256 {
	let mut fold = Fold::new();
	fold.u32(transaction.version as u32);
	for input in &transaction.inputs {
		fold.bytes(input.previous_output.hash.as_ref());
		fold.u32(input.previous_output.index);
		fold.bytes(&input.script_sig);
		fold.u32(input.sequence);
	}
	for output in &transaction.outputs {
		fold.i64(output.value);
		fold.bytes(&output.script_pubkey);
	}
	fold.u32(transaction.lock_time);
	fold.finish()
}

pub fn header_hash(header: &BlockHeader) -> H256 {
	let mut fold = Fold::new();
	fold.u32(header.version);
	fold.bytes(header.previous_header_hash.as_ref());
	fold.bytes(header.merkle_root_hash.as_ref());
	fold.u32(header.time);
	fold.u32(header.bits.into());
	fold.u32(header.nonce);
	fold.finish()
}

#[cfg(test)]
mod tests {
	use chain::{Transaction, TransactionOutput};
	use super::transaction_hash;

	#[test]
	fn identical_content_hashes_identically() {
		let tx = Transaction {
			outputs: vec![TransactionOutput { value: 1, script_pubkey: Default::default() }],
			..Default::default()
		};
		assert_eq!(transaction_hash(&tx), transaction_hash(&tx.clone()));
	}

	#[test]
	fn distinct_content_hashes_distinctly() {
		let one = Transaction {
			outputs: vec![TransactionOutput { value: 1, script_pubkey: Default::default() }],
			..Default::default()
		};
		let two = Transaction {
			outputs: vec![TransactionOutput { value: 2, script_pubkey: Default::default() }],
			..Default::default()
		};
		assert_ne!(transaction_hash(&one), transaction_hash(&two));
	}

	#[test]
	fn fixture_hashes_stay_below_easy_targets() {
		let tx = Transaction::default();
		assert_eq!(transaction_hash(&tx).as_ref()[31], 0);
	}
}
