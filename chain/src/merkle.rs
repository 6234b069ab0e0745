use primitives::hash::H256;

use crate::indexed_block::IndexedBlock;

/// Merkle tree construction is owned by the chain layer; validation only
/// consumes the computed root through this interface.
pub trait MerkleRootBuilder: Send + Sync {
	/// Computes the merkle root over the block's transaction hashes.
	fn merkle_root(&self, block: &IndexedBlock) -> H256;
}
