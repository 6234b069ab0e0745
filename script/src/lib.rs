//! Interface to the script interpreter.
//!
//! Script execution and signature-operation counting are implemented by the
//! interpreter; block validation consumes them through [`ScriptEngine`].

mod error;

use chain::IndexedBlock;
use storage::TransactionDataMap;

pub use crate::error::Error;

/// Timestamp (unix seconds) at which pay-to-script-hash rules activate.
/// Blocks strictly after this instant count P2SH signature operations
/// precisely.
pub const BIP16_ACTIVATION_TIME: u32 = 1_333_238_400; // Apr  1 2012

pub trait ScriptEngine: Send + Sync {
	/// Quick, imprecise count of signature operations in a script.
	fn sig_op_count(&self, script: &[u8]) -> usize;

	/// Precise signature-operation count for an input spending a
	/// pay-to-script-hash output.
	fn precise_sig_op_count(&self, signature_script: &[u8], pubkey_script: &[u8], bip16: bool) -> usize;

	/// True if the script matches the canonical pay-to-script-hash form.
	fn is_pay_to_script_hash(&self, script: &[u8]) -> bool;

	/// Executes every input script of the block against the output script
	/// it spends.
	fn verify_block_scripts(&self, block: &IndexedBlock, store: &TransactionDataMap) -> Result<(), Error>;
}
