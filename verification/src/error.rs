use std::fmt;

use primitives::hash::H256;

use crate::constants::{MAX_BLOCK_SIGOPS, MAX_COINBASE_SIZE, MAX_MONEY, MIN_COINBASE_SIZE};

/// All possible verification errors.
#[derive(Debug, PartialEq)]
pub enum Error {
	/// No transactions in block.
	Empty,
	/// Invalid proof-of-work: the target is out of range or the block hash
	/// does not satisfy it.
	Pow,
	/// Futuristic timestamp.
	FuturisticTimestamp,
	/// First transaction is not a coinbase transaction.
	Coinbase,
	/// One of the transactions is invalid (corresponding index and specific
	/// transaction error).
	Transaction(usize, TransactionError),
	/// Invalid merkle root.
	MerkleRoot,
	/// Contains duplicated transactions.
	DuplicatedTransactions,
	/// Maximum sigops operations exceeded, or the counter wrapped.
	MaximumSigops,
	/// Block transactions are not final.
	NonFinalBlock,
	/// Coinbase signature script does not encode the block height.
	CoinbaseScript { expected: u32, found: Option<u32> },
	/// Coinbase spends too much.
	CoinbaseOverspend { expected_max: i64, actual: i64 },
	/// Sum of the transaction fees in block overflows.
	TransactionFeesOverflow,
	/// Sum of the transaction fees plus the block reward overflows.
	TransactionFeeAndRewardOverflow,
	/// Database error.
	Database(storage::Error),
	/// Script verification failure.
	Script(script::Error),
}

impl From<storage::Error> for Error {
	fn from(err: storage::Error) -> Self {
		Error::Database(err)
	}
}

impl From<script::Error> for Error {
	fn from(err: script::Error) -> Self {
		Error::Script(err)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::Empty => write!(f, "block does not contain any transactions"),
			Error::Pow => write!(f, "block proof-of-work is invalid"),
			Error::FuturisticTimestamp => write!(f, "block timestamp is too far in the future"),
			Error::Coinbase => write!(f, "first transaction in block is not a coinbase"),
			Error::Transaction(index, ref err) => write!(f, "transaction {} is invalid: {}", index, err),
			Error::MerkleRoot => write!(f, "block merkle root does not match the header"),
			Error::DuplicatedTransactions => write!(f, "block contains duplicated transactions"),
			Error::MaximumSigops => {
				write!(f, "block contains too many signature operations (max {})", MAX_BLOCK_SIGOPS)
			},
			Error::NonFinalBlock => write!(f, "block contains non-final transactions"),
			Error::CoinbaseScript { expected, found: Some(found) } => {
				write!(f, "coinbase signature script encodes height {} when {} was expected", found, expected)
			},
			Error::CoinbaseScript { expected, found: None } => {
				write!(f, "coinbase signature script does not start with serialized height {}", expected)
			},
			Error::CoinbaseOverspend { expected_max, actual } => {
				write!(f, "coinbase transaction pays {} which is more than expected value of {}", actual, expected_max)
			},
			Error::TransactionFeesOverflow => write!(f, "total fees for block overflow the accumulator"),
			Error::TransactionFeeAndRewardOverflow => write!(f, "block reward plus total fees overflows"),
			Error::Database(ref err) => write!(f, "chain database error: {}", err),
			Error::Script(ref err) => write!(f, "block scripts are invalid: {}", err),
		}
	}
}

/// Possible transactions verification errors.
#[derive(Debug, PartialEq)]
pub enum TransactionError {
	/// Transaction has no inputs or no outputs.
	Empty,
	/// An output value is negative or above the monetary maximum.
	OutputValueOutOfRange(i64),
	/// Sum of all output values overflows or exceeds the monetary maximum.
	OutputsSumOutOfRange,
	/// Two inputs reference the same previous output. Input indexes are
	/// provided.
	DuplicateInput(usize, usize),
	/// Coinbase signature is not in the valid length range.
	CoinbaseSignatureLength(usize),
	/// Transaction is not a coinbase transaction but has a null input.
	NullNonCoinbase,
	/// Not found corresponding prior transaction for the input.
	Input(usize),
	/// Referenced coinbase output is not mature enough.
	Maturity { height: u32, prior_height: u32 },
	/// Input references an output index past the prior transaction's
	/// outputs.
	OutputIndexOutOfRange(usize),
	/// Referenced output value is negative or above the monetary maximum.
	InputValueOutOfRange(i64),
	/// Sum of referenced input values overflows or exceeds the monetary
	/// maximum.
	InputsSumOutOfRange,
	/// Using output that is surely spent.
	UsingSpentOutput(H256, u32),
	/// Spends more than its inputs provide.
	Overspend { available: i64, spends: i64 },
	/// Transaction has too many signature operations.
	MaxSigops,
	/// Not fully spent transaction with the same hash already exists.
	UnspentTransactionWithTheSameHash,
	/// Coinbase transaction is found at position that is not 0.
	MisplacedCoinbase,
}

impl fmt::Display for TransactionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			TransactionError::Empty => write!(f, "transaction has no inputs or no outputs"),
			TransactionError::OutputValueOutOfRange(value) => {
				write!(f, "transaction output value {} is out of range (max {})", value, MAX_MONEY)
			},
			TransactionError::OutputsSumOutOfRange => {
				write!(f, "total value of all transaction outputs overflows or exceeds the maximum of {}", MAX_MONEY)
			},
			TransactionError::DuplicateInput(first, second) => {
				write!(f, "transaction inputs {} and {} reference the same previous output", first, second)
			},
			TransactionError::CoinbaseSignatureLength(len) => {
				write!(
					f,
					"coinbase signature script length {} is out of range (min {}, max {})",
					len, MIN_COINBASE_SIZE, MAX_COINBASE_SIZE
				)
			},
			TransactionError::NullNonCoinbase => {
				write!(f, "transaction input references a null previous output")
			},
			TransactionError::Input(index) => {
				write!(f, "prior transaction for input {} is not available", index)
			},
			TransactionError::Maturity { height, prior_height } => {
				write!(
					f,
					"coinbase output from height {} spent at height {} before required maturity",
					prior_height, height
				)
			},
			TransactionError::OutputIndexOutOfRange(index) => {
				write!(f, "input {} references an out of range output index", index)
			},
			TransactionError::InputValueOutOfRange(value) => {
				write!(f, "referenced output value {} is out of range (max {})", value, MAX_MONEY)
			},
			TransactionError::InputsSumOutOfRange => {
				write!(f, "total value of all referenced outputs overflows or exceeds the maximum of {}", MAX_MONEY)
			},
			TransactionError::UsingSpentOutput(ref hash, index) => {
				write!(f, "output {} of transaction {} is already spent", index, hash.to_reversed_str())
			},
			TransactionError::Overspend { available, spends } => {
				write!(f, "transaction spends {} with only {} available", spends, available)
			},
			TransactionError::MaxSigops => write!(f, "transaction has too many signature operations"),
			TransactionError::UnspentTransactionWithTheSameHash => {
				write!(f, "transaction with the same hash is already recorded and not fully spent")
			},
			TransactionError::MisplacedCoinbase => {
				write!(f, "coinbase transaction is found at position that is not 0")
			},
		}
	}
}
