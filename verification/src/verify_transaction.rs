use std::collections::HashMap;
use std::ops;

use chain::{IndexedTransaction, OutPoint};
use log::trace;

use crate::constants::{MAX_COINBASE_SIZE, MAX_MONEY, MIN_COINBASE_SIZE};
use crate::error::TransactionError;

/// Context-free transaction sanity checks, in consensus order.
pub struct TransactionVerifier<'a> {
	pub empty: TransactionEmpty<'a>,
	pub output_values: TransactionOutputValues<'a>,
	pub duplicate_inputs: TransactionDuplicateInputs<'a>,
	pub oversized_coinbase: TransactionOversizedCoinbase<'a>,
	pub null_non_coinbase: TransactionNullNonCoinbase<'a>,
}

impl<'a> TransactionVerifier<'a> {
	pub fn new(transaction: &'a IndexedTransaction) -> Self {
		trace!(target: "verification", "Tx pre-verification {}", transaction.hash.to_reversed_str());
		TransactionVerifier {
			empty: TransactionEmpty::new(transaction),
			output_values: TransactionOutputValues::new(transaction),
			duplicate_inputs: TransactionDuplicateInputs::new(transaction),
			oversized_coinbase: TransactionOversizedCoinbase::new(
				transaction,
				MIN_COINBASE_SIZE..MAX_COINBASE_SIZE,
			),
			null_non_coinbase: TransactionNullNonCoinbase::new(transaction),
		}
	}

	pub fn check(&self) -> Result<(), TransactionError> {
		self.empty.check()?;
		self.output_values.check()?;
		self.duplicate_inputs.check()?;
		self.oversized_coinbase.check()?;
		self.null_non_coinbase.check()?;
		Ok(())
	}
}

pub struct TransactionEmpty<'a> {
	transaction: &'a IndexedTransaction,
}

impl<'a> TransactionEmpty<'a> {
	fn new(transaction: &'a IndexedTransaction) -> Self {
		TransactionEmpty { transaction }
	}

	fn check(&self) -> Result<(), TransactionError> {
		if self.transaction.raw.is_empty() {
			Err(TransactionError::Empty)
		} else {
			Ok(())
		}
	}
}

/// Each output, and the running total of all outputs, must stay within
/// `[0, MAX_MONEY]`.
pub struct TransactionOutputValues<'a> {
	transaction: &'a IndexedTransaction,
}

impl<'a> TransactionOutputValues<'a> {
	fn new(transaction: &'a IndexedTransaction) -> Self {
		TransactionOutputValues { transaction }
	}

	fn check(&self) -> Result<(), TransactionError> {
		let mut total: i64 = 0;
		for output in &self.transaction.raw.outputs {
			if output.value < 0 || output.value > MAX_MONEY {
				return Err(TransactionError::OutputValueOutOfRange(output.value));
			}

			total = total
				.checked_add(output.value)
				.ok_or(TransactionError::OutputsSumOutOfRange)?;
			if total > MAX_MONEY {
				return Err(TransactionError::OutputsSumOutOfRange);
			}
		}
		Ok(())
	}
}

pub struct TransactionDuplicateInputs<'a> {
	transaction: &'a IndexedTransaction,
}

impl<'a> TransactionDuplicateInputs<'a> {
	fn new(transaction: &'a IndexedTransaction) -> Self {
		TransactionDuplicateInputs { transaction }
	}

	fn check(&self) -> Result<(), TransactionError> {
		let mut seen: HashMap<&OutPoint, usize> = HashMap::new();
		for (index, input) in self.transaction.raw.inputs.iter().enumerate() {
			if let Some(first) = seen.insert(&input.previous_output, index) {
				return Err(TransactionError::DuplicateInput(first, index));
			}
		}
		Ok(())
	}
}

pub struct TransactionOversizedCoinbase<'a> {
	transaction: &'a IndexedTransaction,
	size_range: ops::Range<usize>,
}

impl<'a> TransactionOversizedCoinbase<'a> {
	fn new(transaction: &'a IndexedTransaction, size_range: ops::Range<usize>) -> Self {
		TransactionOversizedCoinbase { transaction, size_range }
	}

	fn check(&self) -> Result<(), TransactionError> {
		if self.transaction.raw.is_coinbase() {
			let script_len = self.transaction.raw.inputs[0].script_sig.len();
			if script_len < self.size_range.start || script_len > self.size_range.end {
				return Err(TransactionError::CoinbaseSignatureLength(script_len));
			}
		}

		Ok(())
	}
}

pub struct TransactionNullNonCoinbase<'a> {
	transaction: &'a IndexedTransaction,
}

impl<'a> TransactionNullNonCoinbase<'a> {
	fn new(transaction: &'a IndexedTransaction) -> Self {
		TransactionNullNonCoinbase { transaction }
	}

	fn check(&self) -> Result<(), TransactionError> {
		if !self.transaction.raw.is_coinbase() && self.transaction.raw.is_null() {
			Err(TransactionError::NullNonCoinbase)
		} else {
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use chain::{IndexedTransaction, OutPoint, Transaction, TransactionInput, TransactionOutput};
	use primitives::bytes::Bytes;
	use primitives::hash::H256;

	use crate::constants::MAX_MONEY;
	use crate::error::TransactionError;
	use super::TransactionVerifier;

	fn indexed(raw: Transaction) -> IndexedTransaction {
		IndexedTransaction::new(H256::from(1), raw)
	}

	fn spending_input() -> TransactionInput {
		TransactionInput {
			previous_output: OutPoint { hash: H256::from(2), index: 0 },
			script_sig: Bytes::new(),
			sequence: 0,
		}
	}

	fn output(value: i64) -> TransactionOutput {
		TransactionOutput { value, script_pubkey: Bytes::new() }
	}

	#[test]
	fn rejects_missing_inputs_or_outputs() {
		let no_inputs = indexed(Transaction {
			outputs: vec![output(1)],
			..Default::default()
		});
		assert_eq!(TransactionVerifier::new(&no_inputs).check(), Err(TransactionError::Empty));

		let no_outputs = indexed(Transaction {
			inputs: vec![spending_input()],
			..Default::default()
		});
		assert_eq!(TransactionVerifier::new(&no_outputs).check(), Err(TransactionError::Empty));
	}

	#[test]
	fn rejects_output_values_out_of_range() {
		let negative = indexed(Transaction {
			inputs: vec![spending_input()],
			outputs: vec![output(-1)],
			..Default::default()
		});
		assert_eq!(
			TransactionVerifier::new(&negative).check(),
			Err(TransactionError::OutputValueOutOfRange(-1))
		);

		let too_large = indexed(Transaction {
			inputs: vec![spending_input()],
			outputs: vec![output(MAX_MONEY + 1)],
			..Default::default()
		});
		assert_eq!(
			TransactionVerifier::new(&too_large).check(),
			Err(TransactionError::OutputValueOutOfRange(MAX_MONEY + 1))
		);

		let at_limit = indexed(Transaction {
			inputs: vec![spending_input()],
			outputs: vec![output(MAX_MONEY)],
			..Default::default()
		});
		assert_eq!(TransactionVerifier::new(&at_limit).check(), Ok(()));
	}

	#[test]
	fn rejects_output_total_above_the_limit() {
		let tx = indexed(Transaction {
			inputs: vec![spending_input()],
			outputs: vec![output(MAX_MONEY), output(MAX_MONEY)],
			..Default::default()
		});
		assert_eq!(
			TransactionVerifier::new(&tx).check(),
			Err(TransactionError::OutputsSumOutOfRange)
		);
	}

	#[test]
	fn rejects_duplicate_outpoints() {
		let tx = indexed(Transaction {
			inputs: vec![spending_input(), spending_input()],
			outputs: vec![output(1)],
			..Default::default()
		});
		assert_eq!(
			TransactionVerifier::new(&tx).check(),
			Err(TransactionError::DuplicateInput(0, 1))
		);
	}

	#[test]
	fn bounds_coinbase_script_length() {
		let coinbase_with_script = |len: usize| {
			indexed(Transaction {
				inputs: vec![TransactionInput::coinbase(Bytes::new_with_len(len))],
				outputs: vec![output(1)],
				..Default::default()
			})
		};

		assert_eq!(
			TransactionVerifier::new(&coinbase_with_script(1)).check(),
			Err(TransactionError::CoinbaseSignatureLength(1))
		);
		assert_eq!(TransactionVerifier::new(&coinbase_with_script(2)).check(), Ok(()));
		assert_eq!(TransactionVerifier::new(&coinbase_with_script(100)).check(), Ok(()));
		assert_eq!(
			TransactionVerifier::new(&coinbase_with_script(101)).check(),
			Err(TransactionError::CoinbaseSignatureLength(101))
		);
	}

	#[test]
	fn rejects_null_input_of_non_coinbase() {
		let tx = indexed(Transaction {
			inputs: vec![spending_input(), TransactionInput::coinbase(Bytes::new())],
			outputs: vec![output(1)],
			..Default::default()
		});
		assert_eq!(
			TransactionVerifier::new(&tx).check(),
			Err(TransactionError::NullNonCoinbase)
		);
	}
}
