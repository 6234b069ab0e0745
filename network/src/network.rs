use lazy_static::lazy_static;
use primitives::bigint::U256;
use primitives::hash::H256;

lazy_static! {
	static ref MAX_BITS_MAINNET: U256 = "00000000ffff0000000000000000000000000000000000000000000000000000".parse()
		.expect("hardcoded value should parse without errors");
	static ref MAX_BITS_TESTNET: U256 = "00000000ffff0000000000000000000000000000000000000000000000000000".parse()
		.expect("hardcoded value should parse without errors");
	static ref MAX_BITS_REGTEST: U256 = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse()
		.expect("hardcoded value should parse without errors");

	static ref GENESIS_MAINNET: H256 =
		H256::from_reversed_str("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f");
	static ref GENESIS_TESTNET: H256 =
		H256::from_reversed_str("000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943");
	static ref GENESIS_REGTEST: H256 =
		H256::from_reversed_str("0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206");
}

/// Chain the node validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
	Mainnet,
	Testnet,
	Regtest,
	/// Permissive proof of work; used by unit tests.
	Unitest,
}

impl Network {
	/// Loosest proof-of-work target allowed on this network.
	pub fn max_bits(&self) -> U256 {
		match *self {
			Network::Mainnet => *MAX_BITS_MAINNET,
			Network::Testnet => *MAX_BITS_TESTNET,
			Network::Regtest | Network::Unitest => *MAX_BITS_REGTEST,
		}
	}

	/// Hash of the network's genesis block.
	pub fn genesis_block_hash(&self) -> H256 {
		match *self {
			Network::Mainnet => *GENESIS_MAINNET,
			Network::Testnet => *GENESIS_TESTNET,
			Network::Regtest | Network::Unitest => *GENESIS_REGTEST,
		}
	}
}
