use primitives::hash::H256;

/// A height/hash pair the operator trusts. Script verification for blocks
/// at or below the latest checkpoint is elided.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
	pub height: u32,
	pub hash: H256,
}
