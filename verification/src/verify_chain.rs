use chain::{IndexedBlock, MerkleRootBuilder};
use log::trace;
use network::ConsensusParams;
use script::ScriptEngine;

use crate::error::Error;
use crate::verify_block::BlockVerifier;
use crate::verify_header::HeaderVerifier;

/// Full pre-verification of a block: header rules first, then the block
/// structure and every transaction.
pub struct ChainVerifier<'a> {
	pub header: HeaderVerifier<'a>,
	pub block: BlockVerifier<'a>,
}

impl<'a> ChainVerifier<'a> {
	pub fn new(
		block: &'a IndexedBlock,
		consensus: &'a ConsensusParams,
		merkle: &'a dyn MerkleRootBuilder,
		engine: &'a dyn ScriptEngine,
		current_time: u32,
	) -> Self {
		trace!(target: "verification", "Block pre-verification {}", block.hash().to_reversed_str());
		ChainVerifier {
			header: HeaderVerifier::new(&block.header, consensus, current_time),
			block: BlockVerifier::new(block, merkle, engine),
		}
	}

	pub fn check(&self) -> Result<(), Error> {
		self.header.check()?;
		self.block.check()?;
		Ok(())
	}
}
