use chain::IndexedTransaction;
use storage::TransactionDataMap;

use crate::constants::MAX_MONEY;
use crate::error::TransactionError;

/// Walks the inputs of a transaction, enforcing the contextual spend rules,
/// and returns the miner fee.
///
/// Referenced outputs are marked spent as they are consumed, so a later
/// transaction of the same block cannot spend them again. The marks are
/// never cleared within a pass. Coinbase transactions have no inputs to
/// check and pay no fee.
pub fn checked_transaction_fee(
	store: &mut TransactionDataMap,
	height: u32,
	maturity: u32,
	transaction: &IndexedTransaction,
) -> Result<i64, TransactionError> {
	if transaction.raw.is_coinbase() {
		return Ok(0);
	}

	let mut incoming: i64 = 0;
	for (input_index, input) in transaction.raw.inputs.iter().enumerate() {
		let prevout = &input.previous_output;
		let prior = store
			.get_mut(&prevout.hash)
			.ok_or(TransactionError::Input(input_index))?;

		if prior.is_coinbase() && height < prior.height + maturity {
			return Err(TransactionError::Maturity { height, prior_height: prior.height });
		}

		let output_index = prevout.index as usize;
		if output_index >= prior.spent.len() {
			return Err(TransactionError::OutputIndexOutOfRange(input_index));
		}
		if prior.spent[output_index] {
			return Err(TransactionError::UsingSpentOutput(prevout.hash, prevout.index));
		}

		let value = prior.transaction.outputs[output_index].value;
		if value < 0 || value > MAX_MONEY {
			return Err(TransactionError::InputValueOutOfRange(value));
		}

		incoming = incoming
			.checked_add(value)
			.ok_or(TransactionError::InputsSumOutOfRange)?;
		if incoming > MAX_MONEY {
			return Err(TransactionError::InputsSumOutOfRange);
		}

		prior.spent.set(output_index, true);
	}

	// Output range and overflow were established by the sanity checks, so a
	// plain sum cannot wrap here.
	let spends = transaction.raw.total_spends();
	if incoming < spends {
		return Err(TransactionError::Overspend { available: incoming, spends });
	}

	// incoming >= spends >= 0, so the fee cannot be negative.
	Ok(incoming - spends)
}
