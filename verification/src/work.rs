use primitives::bigint::U256;
use primitives::compact::Compact;
use primitives::hash::H256;

use crate::constants::BASE_SUBSIDY;

/// Returns true if hash is lower or equal than target represented by
/// compact bits.
pub fn is_valid_proof_of_work_hash(bits: Compact, hash: &H256) -> bool {
	let target = match bits.to_u256() {
		Ok(target) => target,
		_err => return false,
	};

	let value = U256::from(&*hash.reversed() as &[u8]);
	value <= target
}

/// Returns true if hash is lower or equal than target and target is lower
/// or equal than the current network maximum.
pub fn is_valid_proof_of_work(max_work_bits: Compact, bits: Compact, hash: &H256) -> bool {
	let maximum = match max_work_bits.to_u256() {
		Ok(max) => max,
		_err => return false,
	};

	let target = match bits.to_u256() {
		Ok(target) => target,
		_err => return false,
	};

	if target.is_zero() {
		return false;
	}

	let value = U256::from(&*hash.reversed() as &[u8]);
	target <= maximum && value <= target
}

/// Miner reward for a block at the given height, before fees.
///
/// The subsidy halves every `halving_interval` blocks. Past 63 halvings the
/// shift amount reaches the integer width, so the reward saturates to zero
/// instead.
pub fn block_subsidy(height: u32, halving_interval: u32) -> i64 {
	let halvings = height / halving_interval;
	if halvings >= 64 {
		return 0;
	}
	BASE_SUBSIDY >> halvings
}
