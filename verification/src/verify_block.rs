use std::collections::HashSet;

use chain::{IndexedBlock, MerkleRootBuilder};
use primitives::hash::H256;
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use script::ScriptEngine;

use crate::constants::MAX_BLOCK_SIGOPS;
use crate::error::{Error, TransactionError};
use crate::sigops::transaction_sigops;
use crate::verify_transaction::TransactionVerifier;

/// Context-free block checks, in consensus order: structure first, then the
/// sanity of every transaction, then the cross-transaction rules.
pub struct BlockVerifier<'a> {
	pub empty: BlockEmpty<'a>,
	pub coinbase: BlockCoinbase<'a>,
	pub extra_coinbases: BlockExtraCoinbases<'a>,
	pub transactions: Vec<TransactionVerifier<'a>>,
	pub merkle_root: BlockMerkleRoot<'a>,
	pub transactions_uniqueness: BlockTransactionsUniqueness<'a>,
	pub sigops: BlockSanitySigops<'a>,
}

impl<'a> BlockVerifier<'a> {
	pub fn new(block: &'a IndexedBlock, merkle: &'a dyn MerkleRootBuilder, engine: &'a dyn ScriptEngine) -> Self {
		BlockVerifier {
			empty: BlockEmpty::new(block),
			coinbase: BlockCoinbase::new(block),
			extra_coinbases: BlockExtraCoinbases::new(block),
			transactions: block.transactions.iter().map(TransactionVerifier::new).collect(),
			merkle_root: BlockMerkleRoot::new(block, merkle),
			transactions_uniqueness: BlockTransactionsUniqueness::new(block),
			sigops: BlockSanitySigops::new(block, engine, MAX_BLOCK_SIGOPS),
		}
	}

	pub fn check(&self) -> Result<(), Error> {
		self.empty.check()?;
		self.coinbase.check()?;
		self.extra_coinbases.check()?;
		self.check_transactions()?;
		self.merkle_root.check()?;
		self.transactions_uniqueness.check()?;
		self.sigops.check()?;
		Ok(())
	}

	fn check_transactions(&self) -> Result<(), Error> {
		self.transactions
			.par_iter()
			.enumerate()
			.fold(
				|| Ok(()),
				|result, (index, tx)| {
					result.and_then(|_| tx.check().map_err(|err| Error::Transaction(index, err)))
				},
			)
			.reduce(|| Ok(()), |acc, check| acc.and(check))
	}
}

pub struct BlockEmpty<'a> {
	block: &'a IndexedBlock,
}

impl<'a> BlockEmpty<'a> {
	fn new(block: &'a IndexedBlock) -> Self {
		BlockEmpty { block }
	}

	fn check(&self) -> Result<(), Error> {
		if self.block.transactions.is_empty() {
			Err(Error::Empty)
		} else {
			Ok(())
		}
	}
}

pub struct BlockCoinbase<'a> {
	block: &'a IndexedBlock,
}

impl<'a> BlockCoinbase<'a> {
	fn new(block: &'a IndexedBlock) -> Self {
		BlockCoinbase { block }
	}

	fn check(&self) -> Result<(), Error> {
		if self
			.block
			.transactions
			.first()
			.map(|tx| tx.raw.is_coinbase())
			.unwrap_or(false)
		{
			Ok(())
		} else {
			Err(Error::Coinbase)
		}
	}
}

pub struct BlockExtraCoinbases<'a> {
	block: &'a IndexedBlock,
}

impl<'a> BlockExtraCoinbases<'a> {
	fn new(block: &'a IndexedBlock) -> Self {
		BlockExtraCoinbases { block }
	}

	fn check(&self) -> Result<(), Error> {
		let misplaced = self
			.block
			.transactions
			.iter()
			.enumerate()
			.skip(1)
			.find(|&(_, tx)| tx.raw.is_coinbase());

		match misplaced {
			Some((index, _)) => Err(Error::Transaction(index, TransactionError::MisplacedCoinbase)),
			None => Ok(()),
		}
	}
}

pub struct BlockMerkleRoot<'a> {
	block: &'a IndexedBlock,
	merkle: &'a dyn MerkleRootBuilder,
}

impl<'a> BlockMerkleRoot<'a> {
	fn new(block: &'a IndexedBlock, merkle: &'a dyn MerkleRootBuilder) -> Self {
		BlockMerkleRoot { block, merkle }
	}

	fn check(&self) -> Result<(), Error> {
		if self.merkle.merkle_root(self.block) == self.block.header.raw.merkle_root_hash {
			Ok(())
		} else {
			Err(Error::MerkleRoot)
		}
	}
}

pub struct BlockTransactionsUniqueness<'a> {
	block: &'a IndexedBlock,
}

impl<'a> BlockTransactionsUniqueness<'a> {
	fn new(block: &'a IndexedBlock) -> Self {
		BlockTransactionsUniqueness { block }
	}

	fn check(&self) -> Result<(), Error> {
		let hashes: HashSet<H256> = self.block.transactions.iter().map(|tx| tx.hash).collect();
		if hashes.len() == self.block.transactions.len() {
			Ok(())
		} else {
			Err(Error::DuplicatedTransactions)
		}
	}
}

pub struct BlockSanitySigops<'a> {
	block: &'a IndexedBlock,
	engine: &'a dyn ScriptEngine,
	max_sigops: usize,
}

impl<'a> BlockSanitySigops<'a> {
	fn new(block: &'a IndexedBlock, engine: &'a dyn ScriptEngine, max_sigops: usize) -> Self {
		BlockSanitySigops { block, engine, max_sigops }
	}

	fn check(&self) -> Result<(), Error> {
		let mut total = 0usize;
		for tx in &self.block.transactions {
			let sigops = transaction_sigops(&tx.raw, self.engine).ok_or(Error::MaximumSigops)?;
			total = total.checked_add(sigops).ok_or(Error::MaximumSigops)?;
			if total > self.max_sigops {
				return Err(Error::MaximumSigops);
			}
		}
		Ok(())
	}
}
