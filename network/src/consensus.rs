use crate::Network;

/// Parameters that influence chain consensus.
#[derive(Debug, Clone)]
pub struct ConsensusParams {
	/// Network.
	pub network: Network,
	/// Number of confirmations a coinbase output needs before it may be
	/// spent.
	pub coinbase_maturity: u32,
	/// Interval (in blocks) at which the block subsidy halves.
	pub subsidy_halving_interval: u32,
}

impl ConsensusParams {
	pub fn new(network: Network) -> Self {
		ConsensusParams {
			network,
			coinbase_maturity: 100,
			subsidy_halving_interval: 210_000,
		}
	}
}
