//! Chain-state views consumed by block validation.

mod block_node;
mod error;
mod transaction_data;
mod transaction_provider;

pub use primitives::hash;

pub use crate::block_node::BlockNode;
pub use crate::error::Error;
pub use crate::transaction_data::{TransactionData, TransactionDataMap};
pub use crate::transaction_provider::{InputTransactionProvider, RecordedTransactionProvider};
