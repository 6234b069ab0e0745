use uint::construct_uint;

construct_uint! {
	/// 256-bit unsigned big integer.
	pub struct U256(4);
}
