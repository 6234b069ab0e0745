//! Builder-style fixtures for blocks and transactions.

use chain::{
	BlockHeader, IndexedBlock, IndexedBlockHeader, IndexedTransaction, OutPoint, Transaction,
	TransactionInput, TransactionOutput,
};
use chain::constants::SEQUENCE_FINAL;
use primitives::bytes::Bytes;
use primitives::compact::Compact;
use primitives::hash::H256;

use crate::identity::{header_hash, transaction_hash};
use crate::merkle::FoldingMerkle;

/// Default bits for fixture headers: the permissive regtest target.
pub const EASY_BITS: u32 = 0x207f_ffff;

pub fn block_builder() -> BlockBuilder {
	BlockBuilder::new()
}

pub struct BlockBuilder {
	version: u32,
	parent: H256,
	merkle_root: Option<H256>,
	time: u32,
	bits: Compact,
	nonce: u32,
	transactions: Vec<IndexedTransaction>,
}

impl BlockBuilder {
	pub fn new() -> Self {
		BlockBuilder {
			version: 1,
			parent: H256::default(),
			merkle_root: None,
			time: 0,
			bits: Compact::new(EASY_BITS),
			nonce: 0,
			transactions: Vec::new(),
		}
	}

	pub fn header(self) -> BlockHeaderBuilder {
		BlockHeaderBuilder { block: self }
	}

	pub fn transaction(self) -> TransactionBuilder {
		TransactionBuilder::new(self)
	}

	pub fn with_transaction(mut self, transaction: IndexedTransaction) -> Self {
		self.transactions.push(transaction);
		self
	}

	pub fn build(self) -> IndexedBlock {
		let merkle_root = self.merkle_root.unwrap_or_else(|| {
			let hashes: Vec<H256> = self.transactions.iter().map(|tx| tx.hash).collect();
			FoldingMerkle::fold(&hashes)
		});

		let raw = BlockHeader {
			version: self.version,
			previous_header_hash: self.parent,
			merkle_root_hash: merkle_root,
			time: self.time,
			bits: self.bits,
			nonce: self.nonce,
		};
		let hash = header_hash(&raw);

		IndexedBlock::new(IndexedBlockHeader::new(hash, raw), self.transactions)
	}
}

pub struct BlockHeaderBuilder {
	block: BlockBuilder,
}

impl BlockHeaderBuilder {
	pub fn version(mut self, version: u32) -> Self {
		self.block.version = version;
		self
	}

	pub fn parent(mut self, parent: H256) -> Self {
		self.block.parent = parent;
		self
	}

	pub fn merkle_root(mut self, merkle_root: H256) -> Self {
		self.block.merkle_root = Some(merkle_root);
		self
	}

	pub fn time(mut self, time: u32) -> Self {
		self.block.time = time;
		self
	}

	pub fn bits(mut self, bits: Compact) -> Self {
		self.block.bits = bits;
		self
	}

	pub fn nonce(mut self, nonce: u32) -> Self {
		self.block.nonce = nonce;
		self
	}

	pub fn build(self) -> BlockBuilder {
		self.block
	}
}

pub struct TransactionBuilder {
	block: BlockBuilder,
	version: i32,
	inputs: Vec<TransactionInput>,
	outputs: Vec<TransactionOutput>,
	lock_time: u32,
	hash: Option<H256>,
}

impl TransactionBuilder {
	fn new(block: BlockBuilder) -> Self {
		TransactionBuilder {
			block,
			version: 1,
			inputs: Vec::new(),
			outputs: Vec::new(),
			lock_time: 0,
			hash: None,
		}
	}

	pub fn version(mut self, version: i32) -> Self {
		self.version = version;
		self
	}

	pub fn coinbase(mut self) -> Self {
		self.inputs.push(TransactionInput::coinbase(Bytes::new_with_len(2)));
		self
	}

	pub fn coinbase_with_height(mut self, height: u32) -> Self {
		self.inputs.push(TransactionInput::coinbase(coinbase_height_script(height)));
		self
	}

	pub fn input(self) -> TransactionInputBuilder {
		TransactionInputBuilder::new(self)
	}

	pub fn output(self) -> TransactionOutputBuilder {
		TransactionOutputBuilder::new(self)
	}

	pub fn lock_time(mut self, lock_time: u32) -> Self {
		self.lock_time = lock_time;
		self
	}

	pub fn hash(mut self, hash: H256) -> Self {
		self.hash = Some(hash);
		self
	}

	pub fn build(self) -> BlockBuilder {
		let raw = Transaction {
			version: self.version,
			inputs: self.inputs,
			outputs: self.outputs,
			lock_time: self.lock_time,
		};
		let hash = self.hash.unwrap_or_else(|| transaction_hash(&raw));
		let mut block = self.block;
		block.transactions.push(IndexedTransaction::new(hash, raw));
		block
	}
}

pub struct TransactionInputBuilder {
	transaction: TransactionBuilder,
	hash: H256,
	index: u32,
	script_sig: Bytes,
	sequence: u32,
}

impl TransactionInputBuilder {
	fn new(transaction: TransactionBuilder) -> Self {
		TransactionInputBuilder {
			transaction,
			hash: H256::from(1),
			index: 0,
			script_sig: Bytes::new(),
			sequence: SEQUENCE_FINAL,
		}
	}

	pub fn hash(mut self, hash: H256) -> Self {
		self.hash = hash;
		self
	}

	pub fn index(mut self, index: u32) -> Self {
		self.index = index;
		self
	}

	pub fn script_sig(mut self, script_sig: Bytes) -> Self {
		self.script_sig = script_sig;
		self
	}

	pub fn sequence(mut self, sequence: u32) -> Self {
		self.sequence = sequence;
		self
	}

	pub fn build(mut self) -> TransactionBuilder {
		self.transaction.inputs.push(TransactionInput {
			previous_output: OutPoint { hash: self.hash, index: self.index },
			script_sig: self.script_sig,
			sequence: self.sequence,
		});
		self.transaction
	}
}

pub struct TransactionOutputBuilder {
	transaction: TransactionBuilder,
	value: i64,
	script_pubkey: Bytes,
}

impl TransactionOutputBuilder {
	fn new(transaction: TransactionBuilder) -> Self {
		TransactionOutputBuilder {
			transaction,
			value: 0,
			script_pubkey: Bytes::new(),
		}
	}

	pub fn value(mut self, value: i64) -> Self {
		self.value = value;
		self
	}

	pub fn script_pubkey(mut self, script_pubkey: Bytes) -> Self {
		self.script_pubkey = script_pubkey;
		self
	}

	pub fn build(mut self) -> TransactionBuilder {
		self.transaction.outputs.push(TransactionOutput {
			value: self.value,
			script_pubkey: self.script_pubkey,
		});
		self.transaction
	}
}

/// Coinbase signature script embedding the block height: a 3-byte push
/// opcode followed by the little-endian height.
pub fn coinbase_height_script(height: u32) -> Bytes {
	let bytes = height.to_le_bytes();
	Bytes::from(vec![0x03, bytes[0], bytes[1], bytes[2]])
}

/// A plain spendable transaction with the given output values, for seeding
/// fetcher fixtures.
pub fn funding_transaction(values: &[i64]) -> IndexedTransaction {
	let outputs = values
		.iter()
		.map(|value| (*value, Bytes::new()))
		.collect::<Vec<_>>();
	funding_transaction_with_scripts(&outputs)
}

/// A plain spendable transaction with explicit output scripts.
pub fn funding_transaction_with_scripts(outputs: &[(i64, Bytes)]) -> IndexedTransaction {
	let raw = Transaction {
		version: 1,
		inputs: vec![TransactionInput {
			previous_output: OutPoint { hash: H256::from(0xff), index: 0 },
			script_sig: Bytes::new(),
			sequence: SEQUENCE_FINAL,
		}],
		outputs: outputs
			.iter()
			.map(|(value, script_pubkey)| TransactionOutput {
				value: *value,
				script_pubkey: script_pubkey.clone(),
			})
			.collect(),
		lock_time: 0,
	};
	IndexedTransaction::new(transaction_hash(&raw), raw)
}

/// A coinbase with a single output, for maturity fixtures.
pub fn coinbase_transaction(value: i64) -> IndexedTransaction {
	let raw = Transaction {
		version: 1,
		inputs: vec![TransactionInput::coinbase(Bytes::new_with_len(2))],
		outputs: vec![TransactionOutput { value, script_pubkey: Bytes::new() }],
		lock_time: 0,
	};
	IndexedTransaction::new(transaction_hash(&raw), raw)
}
