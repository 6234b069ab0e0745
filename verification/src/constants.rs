//! Consensus constants.

/// Number of satoshis in a single coin.
pub const SATOSHIS_IN_COIN: i64 = 100_000_000;

/// Maximum amount of money recognised by the network, in satoshis.
pub const MAX_MONEY: i64 = 21_000_000 * SATOSHIS_IN_COIN;

/// Subsidy of the first halving era.
pub const BASE_SUBSIDY: i64 = 50 * SATOSHIS_IN_COIN;

/// Maximum serialized size of a block.
pub const MAX_BLOCK_SIZE: usize = 1_000_000;

/// Maximum number of signature operations in one block.
pub const MAX_BLOCK_SIGOPS: usize = MAX_BLOCK_SIZE / 50;

/// How far in the future a header timestamp may lie, in seconds.
pub const BLOCK_MAX_FUTURE: u32 = 2 * 60 * 60;

/// Minimal length of the coinbase signature script.
pub const MIN_COINBASE_SIZE: usize = 2;

/// Maximal length of the coinbase signature script.
pub const MAX_COINBASE_SIZE: usize = 100;

/// Number of previous headers used to compute the median time of a chain
/// position.
pub const MEDIAN_TIME_BLOCKS: usize = 11;

/// First block version whose coinbase signature script starts with the
/// serialized block height.
pub const SERIALIZED_HEIGHT_VERSION: u32 = 2;
