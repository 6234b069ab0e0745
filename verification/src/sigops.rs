use chain::Transaction;
use script::ScriptEngine;
use storage::TransactionDataMap;

use crate::error::TransactionError;

/// Counts signature operations in the transaction's own scripts.
///
/// Quick but imprecise: a pay-to-script-hash input is priced by its
/// signature script alone, without looking at the redeem script it carries.
/// Returns `None` if the counter wraps.
pub fn transaction_sigops(transaction: &Transaction, engine: &dyn ScriptEngine) -> Option<usize> {
	let mut sigops = 0usize;
	for input in &transaction.inputs {
		sigops = sigops.checked_add(engine.sig_op_count(&input.script_sig))?;
	}
	for output in &transaction.outputs {
		sigops = sigops.checked_add(engine.sig_op_count(&output.script_pubkey))?;
	}
	Some(sigops)
}

/// Counts the precise signature operations contributed by pay-to-script-hash
/// inputs, resolving every referenced output through the input store.
pub fn transaction_p2sh_sigops(
	transaction: &Transaction,
	is_coinbase: bool,
	store: &TransactionDataMap,
	engine: &dyn ScriptEngine,
) -> Result<usize, TransactionError> {
	// Coinbase transactions have no interesting inputs.
	if is_coinbase {
		return Ok(0);
	}

	let mut sigops = 0usize;
	for (input_index, input) in transaction.inputs.iter().enumerate() {
		let prevout = &input.previous_output;
		let prior = store
			.get(&prevout.hash)
			.ok_or(TransactionError::Input(input_index))?;
		let output = prior
			.transaction
			.outputs
			.get(prevout.index as usize)
			.ok_or(TransactionError::OutputIndexOutOfRange(input_index))?;

		if !engine.is_pay_to_script_hash(&output.script_pubkey) {
			continue;
		}

		let count = engine.precise_sig_op_count(&input.script_sig, &output.script_pubkey, true);
		sigops = sigops.checked_add(count).ok_or(TransactionError::MaxSigops)?;
	}

	Ok(sigops)
}

#[cfg(test)]
mod tests {
	use chain::{OutPoint, Transaction, TransactionInput, TransactionOutput};
	use primitives::bytes::Bytes;
	use primitives::hash::H256;
	use storage::{TransactionData, TransactionDataMap};
	use test_data::{p2sh_redeem_push, p2sh_script, OpcodeScriptEngine};

	use crate::error::TransactionError;
	use super::{transaction_p2sh_sigops, transaction_sigops};

	fn spend_of(hash: H256, index: u32, script_sig: Bytes) -> Transaction {
		Transaction {
			version: 1,
			inputs: vec![TransactionInput {
				previous_output: OutPoint { hash, index },
				script_sig,
				sequence: 0,
			}],
			outputs: vec![TransactionOutput::default()],
			lock_time: 0,
		}
	}

	#[test]
	fn imprecise_count_covers_both_sides() {
		let tx = Transaction {
			version: 1,
			inputs: vec![TransactionInput {
				previous_output: OutPoint { hash: H256::from(1), index: 0 },
				script_sig: Bytes::from(vec![0xac, 0xac]),
				sequence: 0,
			}],
			outputs: vec![TransactionOutput {
				value: 0,
				script_pubkey: Bytes::from(vec![0xae]),
			}],
			lock_time: 0,
		};

		assert_eq!(transaction_sigops(&tx, &OpcodeScriptEngine), Some(22));
	}

	#[test]
	fn p2sh_count_resolves_the_redeem_script() {
		let funding = Transaction {
			version: 1,
			inputs: vec![TransactionInput::default()],
			outputs: vec![TransactionOutput { value: 100, script_pubkey: p2sh_script() }],
			lock_time: 0,
		};
		let funding_hash = H256::from(7);

		let mut store = TransactionDataMap::new();
		store.insert(funding_hash, TransactionData::new(funding, 1));

		// redeem script with 3 checksig operations
		let spend = spend_of(funding_hash, 0, p2sh_redeem_push(&[0xac, 0xac, 0xac]));
		assert_eq!(
			transaction_p2sh_sigops(&spend, false, &store, &OpcodeScriptEngine),
			Ok(3)
		);

		// the signature script itself prices at zero in the imprecise count
		assert_eq!(transaction_sigops(&spend, &OpcodeScriptEngine), Some(0));
	}

	#[test]
	fn p2sh_count_is_zero_for_coinbase() {
		let spend = spend_of(H256::from(9), 0, Bytes::new());
		let store = TransactionDataMap::new();
		assert_eq!(
			transaction_p2sh_sigops(&spend, true, &store, &OpcodeScriptEngine),
			Ok(0)
		);
	}

	#[test]
	fn p2sh_count_requires_the_prior_transaction() {
		let spend = spend_of(H256::from(9), 0, Bytes::new());
		let store = TransactionDataMap::new();
		assert_eq!(
			transaction_p2sh_sigops(&spend, false, &store, &OpcodeScriptEngine),
			Err(TransactionError::Input(0))
		);
	}

	#[test]
	fn p2sh_count_rejects_out_of_range_output_index() {
		let funding = Transaction {
			version: 1,
			inputs: vec![TransactionInput::default()],
			outputs: vec![TransactionOutput { value: 100, script_pubkey: p2sh_script() }],
			lock_time: 0,
		};
		let funding_hash = H256::from(7);

		let mut store = TransactionDataMap::new();
		store.insert(funding_hash, TransactionData::new(funding, 1));

		let spend = spend_of(funding_hash, 5, Bytes::new());
		assert_eq!(
			transaction_p2sh_sigops(&spend, false, &store, &OpcodeScriptEngine),
			Err(TransactionError::OutputIndexOutOfRange(0))
		);
	}
}
