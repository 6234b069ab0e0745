use primitives::hash::H256;

/// Position of a block within the chain, as tracked by the chain layer.
///
/// Validation never walks the chain itself; "as of parent" queries go
/// through the fetch providers, which take the node and resolve its parent
/// internally.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
	pub hash: H256,
	pub height: u32,
	pub time: u32,
}
