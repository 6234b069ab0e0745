pub mod constants;

mod block_header;
mod indexed_block;
mod indexed_header;
mod indexed_transaction;
mod merkle;
mod transaction;

pub use primitives::{bytes, compact, hash};

pub use crate::block_header::BlockHeader;
pub use crate::indexed_block::IndexedBlock;
pub use crate::indexed_header::IndexedBlockHeader;
pub use crate::indexed_transaction::IndexedTransaction;
pub use crate::merkle::MerkleRootBuilder;
pub use crate::transaction::{OutPoint, Transaction, TransactionInput, TransactionOutput};
