use lazy_static::lazy_static;
use log::trace;
use network::{Checkpoint, ConsensusParams};
use primitives::hash::H256;
use script::{ScriptEngine, BIP16_ACTIVATION_TIME};
use storage::{BlockNode, InputTransactionProvider, RecordedTransactionProvider};

use crate::accept_block::{
	BlockBip30, BlockCoinbaseClaim, BlockFinality, BlockScripts, BlockSerializedHeight, BlockSigops,
};
use crate::canon::CanonBlock;
use crate::error::Error;
use crate::VerificationLevel;

lazy_static! {
	/// The two historic blocks that duplicated an earlier, not fully spent
	/// transaction before the overwrite rule activated. A closed set; do
	/// not extend.
	static ref DUPLICATE_EXEMPT_NODES: [(u32, H256); 2] = [
		(91_842, H256::from_reversed_str("00000000000a4d0a398161ffc163c503763b1f4360639393e0e4c8e300e0caec")),
		(91_880, H256::from_reversed_str("00000000000743f190a18c5577a3c2d2a1f610ae9601ac046a38084ccb7cd721")),
	];
}

/// Returns true for the grandfathered nodes that are allowed to overwrite
/// an unspent transaction.
pub fn is_duplicate_exempt(node: &BlockNode) -> bool {
	DUPLICATE_EXEMPT_NODES
		.iter()
		.any(|&(height, ref hash)| node.height == height && node.hash == *hash)
}

/// Contextual acceptance of an ordered block on top of its parent node.
///
/// The block is assumed to have passed pre-verification. Checks run in
/// cost order: the recorded-duplicate rule and the cheap per-block rules
/// first, then signature-operation accounting, then the input walk, and
/// script execution strictly last. Reordering them weakens the protection
/// against CPU-exhaustion blocks.
pub struct ChainAcceptor<'a> {
	node: &'a BlockNode,
	consensus: &'a ConsensusParams,
	level: VerificationLevel,
	input_provider: &'a dyn InputTransactionProvider,
	block: CanonBlock<'a>,
	pub bip30: BlockBip30<'a>,
	pub finality: BlockFinality<'a>,
	pub serialized_height: BlockSerializedHeight<'a>,
	pub sigops: BlockSigops<'a>,
	pub coinbase_claim: BlockCoinbaseClaim<'a>,
	pub scripts: BlockScripts<'a>,
}

impl<'a> ChainAcceptor<'a> {
	pub fn new(
		input_provider: &'a dyn InputTransactionProvider,
		recorded_provider: &'a dyn RecordedTransactionProvider,
		engine: &'a dyn ScriptEngine,
		consensus: &'a ConsensusParams,
		level: VerificationLevel,
		block: CanonBlock<'a>,
		node: &'a BlockNode,
		checkpoint: Option<&'a Checkpoint>,
	) -> Self {
		trace!(target: "verification", "Block verification {}", block.hash().to_reversed_str());
		let bip16_active = node.time > BIP16_ACTIVATION_TIME;

		ChainAcceptor {
			node,
			consensus,
			level,
			input_provider,
			block,
			bip30: BlockBip30::new(block, node, recorded_provider),
			finality: BlockFinality::new(block, node),
			serialized_height: BlockSerializedHeight::new(block, node),
			sigops: BlockSigops::new(block, engine, bip16_active),
			coinbase_claim: BlockCoinbaseClaim::new(block, consensus, node.height),
			scripts: BlockScripts::new(block, engine, node, checkpoint, level),
		}
	}

	pub fn check(&self) -> Result<(), Error> {
		if self.level.intersects(VerificationLevel::NO_VERIFICATION) {
			return Ok(());
		}

		// the genesis coinbase is unspendable; nothing to connect
		if self.node.hash == self.consensus.network.genesis_block_hash() {
			return Ok(());
		}

		if !is_duplicate_exempt(self.node) {
			self.bip30.check()?;
		}

		let mut store = self.input_provider.input_transactions(self.node, self.block.raw())?;

		self.finality.check()?;
		self.serialized_height.check()?;
		self.sigops.check(&store)?;
		self.coinbase_claim.check(&mut store)?;
		self.scripts.check(&store)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use chain::IndexedBlock;
	use network::{Checkpoint, ConsensusParams, Network};
	use primitives::bytes::Bytes;
	use primitives::hash::H256;
	use script::BIP16_ACTIVATION_TIME;
	use storage::{BlockNode, TransactionData};
	use test_data::{
		block_builder, funding_transaction, funding_transaction_with_scripts, p2sh_redeem_push,
		p2sh_script, MemoryFetcher, OpcodeScriptEngine,
	};

	use crate::canon::CanonBlock;
	use crate::error::{Error, TransactionError};
	use crate::VerificationLevel;
	use super::{is_duplicate_exempt, ChainAcceptor};

	fn accept(
		fetcher: &MemoryFetcher,
		consensus: &ConsensusParams,
		level: VerificationLevel,
		block: &IndexedBlock,
		node: &BlockNode,
		checkpoint: Option<&Checkpoint>,
	) -> Result<(), Error> {
		ChainAcceptor::new(
			fetcher,
			fetcher,
			&OpcodeScriptEngine,
			consensus,
			level,
			CanonBlock::new(block),
			node,
			checkpoint,
		)
		.check()
	}

	fn node_at(height: u32, time: u32) -> BlockNode {
		BlockNode { hash: H256::from(0x42), height, time }
	}

	#[test]
	fn genesis_is_accepted_without_any_fetch() {
		let consensus = ConsensusParams::new(Network::Unitest);
		// a block this malformed would fail every other gate
		let block = block_builder().build();
		let node = BlockNode {
			hash: consensus.network.genesis_block_hash(),
			height: 0,
			time: 0,
		};

		let fetcher = MemoryFetcher::failing();
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Ok(())
		);
	}

	#[test]
	fn no_verification_level_skips_everything() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let block = block_builder().build();
		let node = node_at(1, 0);

		let fetcher = MemoryFetcher::failing();
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::NO_VERIFICATION, &block, &node, None),
			Ok(())
		);
	}

	#[test]
	fn unspent_duplicate_is_rejected_for_ordinary_nodes() {
		let consensus = ConsensusParams::new(Network::Mainnet);
		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.build();
		let node = node_at(91_843, 0);

		let mut fetcher = MemoryFetcher::new();
		// the same hash is already recorded, with its output unspent
		fetcher.fund_with_data(
			block.transactions[0].hash,
			TransactionData::new(block.transactions[0].raw.clone(), 1_000),
		);

		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Err(Error::Transaction(0, TransactionError::UnspentTransactionWithTheSameHash))
		);
	}

	#[test]
	fn grandfathered_nodes_may_overwrite_unspent_duplicates() {
		let consensus = ConsensusParams::new(Network::Mainnet);
		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.build();
		let node = BlockNode {
			hash: H256::from_reversed_str("00000000000a4d0a398161ffc163c503763b1f4360639393e0e4c8e300e0caec"),
			height: 91_842,
			time: 0,
		};
		assert!(is_duplicate_exempt(&node));

		let mut fetcher = MemoryFetcher::new();
		fetcher.fund_with_data(
			block.transactions[0].hash,
			TransactionData::new(block.transactions[0].raw.clone(), 1_000),
		);

		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Ok(())
		);
	}

	#[test]
	fn exemption_requires_the_matching_hash() {
		let node = BlockNode { hash: H256::from(3), height: 91_842, time: 0 };
		assert!(!is_duplicate_exempt(&node));
	}

	#[test]
	fn fully_spent_duplicate_is_acceptable() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.build();
		let node = node_at(200, 0);

		let mut data = TransactionData::new(block.transactions[0].raw.clone(), 10);
		data.spent.set(0, true);
		let mut fetcher = MemoryFetcher::new();
		fetcher.fund_with_data(block.transactions[0].hash, data);

		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Ok(())
		);
	}

	#[test]
	fn fetch_errors_propagate() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.build();
		let node = node_at(200, 0);

		let fetcher = MemoryFetcher::failing();
		assert_matches::assert_matches!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Err(Error::Database(_))
		);
	}

	#[test]
	fn p2sh_sigops_count_only_after_activation() {
		let consensus = ConsensusParams::new(Network::Unitest);

		// 14 pay-to-script-hash outputs; each redeem script prices at
		// 75 * 20 = 1500 operations, 21000 for the block
		let outputs: Vec<(i64, Bytes)> = (0..14).map(|_| (1_000, p2sh_script())).collect();
		let funding = funding_transaction_with_scripts(&outputs);

		let mut spender = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.transaction();
		for index in 0..14u32 {
			spender = spender
				.input()
				.hash(funding.hash)
				.index(index)
				.script_sig(p2sh_redeem_push(&[0xae; 75]))
				.sequence(0)
				.build();
		}
		let block = spender.output().value(14_000).build().build().build();

		let mut fetcher = MemoryFetcher::new();
		fetcher.fund(&funding, 1);

		// at the activation instant the precise counting is still off
		let node = node_at(200, BIP16_ACTIVATION_TIME);
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Ok(())
		);

		// one second later it is on, and the block exceeds the cap
		let fetcher = {
			let mut fetcher = MemoryFetcher::new();
			fetcher.fund(&funding, 1);
			fetcher
		};
		let node = node_at(200, BIP16_ACTIVATION_TIME + 1);
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Err(Error::MaximumSigops)
		);
	}

	#[test]
	fn coinbase_claim_is_bounded_by_subsidy_plus_fees() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let funding = funding_transaction(&[1_100]);

		// at the first halving the subsidy is 25 coins; fees are 100
		let block_claiming = |claim: i64| {
			block_builder()
				.transaction().coinbase().output().value(claim).build().build()
				.transaction()
					.input().hash(funding.hash).sequence(0).build()
					.output().value(1_000).build()
					.build()
				.build()
		};
		let node = node_at(210_000, 0);
		let subsidy: i64 = 2_500_000_000;

		for (claim, expected) in vec![
			(subsidy + 101, Err(Error::CoinbaseOverspend { expected_max: subsidy + 100, actual: subsidy + 101 })),
			(subsidy + 100, Ok(())),
			(subsidy + 50, Ok(())),
		] {
			let mut fetcher = MemoryFetcher::new();
			fetcher.fund(&funding, 1);
			assert_eq!(
				accept(&fetcher, &consensus, VerificationLevel::FULL, &block_claiming(claim), &node, None),
				expected
			);
		}
	}

	#[test]
	fn second_spend_of_the_same_output_is_rejected() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let funding = funding_transaction(&[1_000]);

		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.transaction()
				.input().hash(funding.hash).sequence(0).build()
				.output().value(900).build()
				.build()
			.transaction()
				.input().hash(funding.hash).sequence(1).build()
				.output().value(800).build()
				.build()
			.build();
		let node = node_at(200, 0);

		let mut fetcher = MemoryFetcher::new();
		fetcher.fund(&funding, 1);

		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, None),
			Err(Error::Transaction(2, TransactionError::UsingSpentOutput(funding.hash, 0)))
		);
	}

	#[test]
	fn scripts_are_skipped_at_or_below_the_checkpoint() {
		let consensus = ConsensusParams::new(Network::Unitest);
		let funding = funding_transaction(&[1_000]);

		// the spending script is deliberately unverifiable
		let block = block_builder()
			.transaction().coinbase().output().value(5_000_000_000).build().build()
			.transaction()
				.input().hash(funding.hash).script_sig(Bytes::from(vec![0x6a])).sequence(0).build()
				.output().value(1_000).build()
				.build()
			.build();

		let checkpoint = Checkpoint { height: 500, hash: H256::from(0x77) };

		let mut fetcher = MemoryFetcher::new();
		fetcher.fund(&funding, 1);
		let node = node_at(500, 0);
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, Some(&checkpoint)),
			Ok(())
		);

		let mut fetcher = MemoryFetcher::new();
		fetcher.fund(&funding, 1);
		let node = node_at(501, 0);
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::FULL, &block, &node, Some(&checkpoint)),
			Err(Error::Script(script::Error { transaction_index: 1, input_index: 0 }))
		);

		// the header level never runs scripts
		let mut fetcher = MemoryFetcher::new();
		fetcher.fund(&funding, 1);
		let node = node_at(501, 0);
		assert_eq!(
			accept(&fetcher, &consensus, VerificationLevel::HEADER, &block, &node, Some(&checkpoint)),
			Ok(())
		);
	}
}
