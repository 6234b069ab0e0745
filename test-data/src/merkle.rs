use chain::{IndexedBlock, MerkleRootBuilder};
use primitives::hash::H256;

/// Order-sensitive fold over the transaction hashes, standing in for the
/// real merkle tree.
pub struct FoldingMerkle;

impl FoldingMerkle {
	pub fn fold(hashes: &[H256]) -> H256 {
		let mut out = [0u8; 32];
		for (position, hash) in hashes.iter().enumerate() {
			for (index, byte) in hash.as_ref().iter().enumerate() {
				let lane = (index + position) % 32;
				out[lane] = out[lane].wrapping_mul(31).wrapping_add(*byte) ^ (position as u8);
			}
		}
		H256::from(out)
	}
}

impl MerkleRootBuilder for FoldingMerkle {
	fn merkle_root(&self, block: &IndexedBlock) -> H256 {
		let hashes: Vec<H256> = block.transactions.iter().map(|tx| tx.hash).collect();
		Self::fold(&hashes)
	}
}
