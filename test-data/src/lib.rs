//! Fixtures for validation tests: block and transaction builders, an
//! in-memory chain-state fetcher, and a stub script engine.

mod block;
mod fetcher;
mod identity;
mod merkle;
mod script_engine;

pub use crate::block::{
	block_builder, coinbase_height_script, coinbase_transaction, funding_transaction,
	funding_transaction_with_scripts, BlockBuilder, BlockHeaderBuilder, TransactionBuilder,
	TransactionInputBuilder, TransactionOutputBuilder,
};
pub use crate::fetcher::MemoryFetcher;
pub use crate::identity::{header_hash, transaction_hash};
pub use crate::merkle::FoldingMerkle;
pub use crate::script_engine::{p2sh_redeem_push, p2sh_script, OpcodeScriptEngine};
