use std::fmt;

/// Script execution failure, positioned within the block being verified.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
	pub transaction_index: usize,
	pub input_index: usize,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"signature script of input {} in transaction {} failed verification",
			self.input_index, self.transaction_index
		)
	}
}
