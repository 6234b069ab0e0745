//! Consensus verification of blocks and transactions.
//!
//! Full block verification consists of two phases:
//! - pre-verification: context-free checks, done by `VerifyXXX` structures
//! - full verification: checks against the current chain state, done by
//!   `AcceptXXX` structures
//!
//! Use cases:
//!
//! --> A. on_new_block:
//!
//! A.1 `ChainVerifier` (header rules, block structure, per-transaction
//!     sanity)
//!
//! A.2 if the block extends the canon chain:
//!     `ChainAcceptor` on top of its parent node, with the
//!     input-resolution map requested from the chain layer
//!
//! A.3 if it is a side-chain block becoming canon, the chain layer
//!     re-runs A.2 for each block of the new canon chain after
//!     decanonizing the old one; any failure reverts to the old chain
//!
//! --> B. the pre-verification of A.1 has no chain dependencies and may run
//!     for distinct candidate blocks in parallel; each `ChainAcceptor`
//!     however owns its input-resolution map exclusively

use bitflags::bitflags;

pub mod constants;
mod accept_block;
mod accept_chain;
mod canon;
mod error;
mod fee;
mod sigops;
mod verify_block;
mod verify_chain;
mod verify_header;
mod verify_transaction;
mod work;

pub use primitives::{bigint, bytes, compact, hash};

pub use crate::accept_block::{
	BlockBip30, BlockCoinbaseClaim, BlockFinality, BlockScripts, BlockSerializedHeight, BlockSigops,
};
pub use crate::accept_chain::{is_duplicate_exempt, ChainAcceptor};
pub use crate::canon::CanonBlock;
pub use crate::error::{Error, TransactionError};
pub use crate::fee::checked_transaction_fee;
pub use crate::sigops::{transaction_p2sh_sigops, transaction_sigops};
pub use crate::verify_block::BlockVerifier;
pub use crate::verify_chain::ChainVerifier;
pub use crate::verify_header::HeaderVerifier;
pub use crate::verify_transaction::TransactionVerifier;
pub use crate::work::{block_subsidy, is_valid_proof_of_work, is_valid_proof_of_work_hash};

bitflags! {
	/// Blocks verification level.
	pub struct VerificationLevel: u32 {
		/// Base level: perform full block verification.
		const FULL = 0x00000001;
		/// Base level: transaction scripts are not checked.
		const HEADER = 0x00000002;
		/// Base level: no blocks verification at all.
		const NO_VERIFICATION = 0x00000004;
	}
}
