use byteorder::{ByteOrder, LittleEndian};
use network::{Checkpoint, ConsensusParams};
use primitives::hash::H256;
use script::ScriptEngine;
use storage::{BlockNode, RecordedTransactionProvider, TransactionDataMap};

use crate::canon::CanonBlock;
use crate::constants::{MAX_BLOCK_SIGOPS, SERIALIZED_HEIGHT_VERSION};
use crate::error::{Error, TransactionError};
use crate::fee::checked_transaction_fee;
use crate::sigops::{transaction_p2sh_sigops, transaction_sigops};
use crate::work::block_subsidy;
use crate::VerificationLevel;

/// Every transaction of a connecting block must be finalized with respect
/// to the node's height and time.
pub struct BlockFinality<'a> {
	block: CanonBlock<'a>,
	height: u32,
	time: u32,
}

impl<'a> BlockFinality<'a> {
	pub fn new(block: CanonBlock<'a>, node: &BlockNode) -> Self {
		BlockFinality {
			block,
			height: node.height,
			time: node.time,
		}
	}

	pub fn check(&self) -> Result<(), Error> {
		if self
			.block
			.transactions
			.iter()
			.all(|tx| tx.raw.is_final_in_block(self.height, self.time))
		{
			Ok(())
		} else {
			Err(Error::NonFinalBlock)
		}
	}
}

/// For block versions that embed the height, the coinbase signature script
/// must start with a push of the node's height as a little-endian u32.
pub struct BlockSerializedHeight<'a> {
	block: CanonBlock<'a>,
	height: u32,
	active: bool,
}

impl<'a> BlockSerializedHeight<'a> {
	pub fn new(block: CanonBlock<'a>, node: &BlockNode) -> Self {
		BlockSerializedHeight {
			block,
			height: node.height,
			active: block.header.raw.version >= SERIALIZED_HEIGHT_VERSION,
		}
	}

	pub fn check(&self) -> Result<(), Error> {
		if !self.active {
			return Ok(());
		}

		let script = match self.block.transactions.first().and_then(|tx| tx.raw.inputs.first()) {
			Some(input) => &input.script_sig,
			None => return Err(Error::CoinbaseScript { expected: self.height, found: None }),
		};

		if script.len() < 4 {
			return Err(Error::CoinbaseScript { expected: self.height, found: None });
		}

		// byte 0 is the push opcode, bytes 1..4 carry the height
		let mut raw_height = [0u8; 4];
		raw_height[..3].copy_from_slice(&script[1..4]);
		let found = LittleEndian::read_u32(&raw_height);

		if found == self.height {
			Ok(())
		} else {
			Err(Error::CoinbaseScript { expected: self.height, found: Some(found) })
		}
	}
}

/// Rejects blocks carrying a transaction whose hash is already recorded in
/// the chain while the recorded occurrence still has unspent outputs.
/// Overwriting it would strip the earlier spends of their confirmations.
pub struct BlockBip30<'a> {
	block: CanonBlock<'a>,
	node: &'a BlockNode,
	store: &'a dyn RecordedTransactionProvider,
}

impl<'a> BlockBip30<'a> {
	pub fn new(block: CanonBlock<'a>, node: &'a BlockNode, store: &'a dyn RecordedTransactionProvider) -> Self {
		BlockBip30 { block, node, store }
	}

	pub fn check(&self) -> Result<(), Error> {
		let hashes: Vec<H256> = self.block.transactions.iter().map(|tx| tx.hash).collect();
		let recorded = self.store.recorded_transactions(self.node, &hashes)?;

		for (index, prior) in recorded.iter().enumerate() {
			match prior {
				// a duplicate was not found; the common case
				None => continue,
				// a duplicate is only acceptable when fully spent
				Some(prior) if prior.is_fully_spent() => continue,
				Some(_) => {
					return Err(Error::Transaction(
						index,
						TransactionError::UnspentTransactionWithTheSameHash,
					));
				},
			}
		}

		Ok(())
	}
}

/// Block-wide signature-operation accounting. Once pay-to-script-hash rules
/// are active the count includes the precise cost of P2SH inputs, resolved
/// through the input store.
pub struct BlockSigops<'a> {
	block: CanonBlock<'a>,
	engine: &'a dyn ScriptEngine,
	bip16_active: bool,
	max_sigops: usize,
}

impl<'a> BlockSigops<'a> {
	pub fn new(block: CanonBlock<'a>, engine: &'a dyn ScriptEngine, bip16_active: bool) -> Self {
		BlockSigops {
			block,
			engine,
			bip16_active,
			max_sigops: MAX_BLOCK_SIGOPS,
		}
	}

	pub fn check(&self, store: &TransactionDataMap) -> Result<(), Error> {
		let mut total = 0usize;
		for (tx_index, tx) in self.block.transactions.iter().enumerate() {
			let mut sigops = transaction_sigops(&tx.raw, self.engine).ok_or(Error::MaximumSigops)?;

			if self.bip16_active {
				// the first transaction is already known to be the only
				// coinbase
				let p2sh = transaction_p2sh_sigops(&tx.raw, tx_index == 0, store, self.engine)
					.map_err(|err| Error::Transaction(tx_index, err))?;
				sigops = sigops.checked_add(p2sh).ok_or(Error::MaximumSigops)?;
			}

			total = total.checked_add(sigops).ok_or(Error::MaximumSigops)?;
			if total > self.max_sigops {
				return Err(Error::MaximumSigops);
			}
		}
		Ok(())
	}
}

/// Runs the contextual input checks of every transaction, accumulates the
/// fees and bounds the coinbase claim by subsidy plus fees.
pub struct BlockCoinbaseClaim<'a> {
	block: CanonBlock<'a>,
	consensus: &'a ConsensusParams,
	height: u32,
}

impl<'a> BlockCoinbaseClaim<'a> {
	pub fn new(block: CanonBlock<'a>, consensus: &'a ConsensusParams, height: u32) -> Self {
		BlockCoinbaseClaim { block, consensus, height }
	}

	pub fn check(&self, store: &mut TransactionDataMap) -> Result<(), Error> {
		let mut total_fees: i64 = 0;
		for (tx_index, tx) in self.block.transactions.iter().enumerate() {
			let fee = checked_transaction_fee(store, self.height, self.consensus.coinbase_maturity, tx)
				.map_err(|err| Error::Transaction(tx_index, err))?;

			total_fees = total_fees
				.checked_add(fee)
				.ok_or(Error::TransactionFeesOverflow)?;
		}

		let claim = self
			.block
			.transactions
			.first()
			.map(|tx| tx.raw.total_spends())
			.unwrap_or(0);

		let subsidy = block_subsidy(self.height, self.consensus.subsidy_halving_interval);
		let expected_max = subsidy
			.checked_add(total_fees)
			.ok_or(Error::TransactionFeeAndRewardOverflow)?;

		if claim > expected_max {
			Err(Error::CoinbaseOverspend { expected_max, actual: claim })
		} else {
			Ok(())
		}
	}
}

/// Final and most expensive step: execute the input scripts. Elided for
/// blocks at or below the latest trusted checkpoint and for verification
/// levels that exclude scripts.
pub struct BlockScripts<'a> {
	block: CanonBlock<'a>,
	engine: &'a dyn ScriptEngine,
	enabled: bool,
}

impl<'a> BlockScripts<'a> {
	pub fn new(
		block: CanonBlock<'a>,
		engine: &'a dyn ScriptEngine,
		node: &BlockNode,
		checkpoint: Option<&Checkpoint>,
		level: VerificationLevel,
	) -> Self {
		let above_checkpoint = checkpoint.map_or(true, |checkpoint| node.height > checkpoint.height);
		BlockScripts {
			block,
			engine,
			enabled: level.intersects(VerificationLevel::FULL) && above_checkpoint,
		}
	}

	pub fn check(&self, store: &TransactionDataMap) -> Result<(), Error> {
		if !self.enabled {
			return Ok(());
		}

		self.engine
			.verify_block_scripts(self.block.raw(), store)
			.map_err(Error::Script)
	}
}
