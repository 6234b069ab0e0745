/// Sequence value that opts an input out of lock-time enforcement.
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Lock times below this value are block heights; values at or above it are
/// unix timestamps.
pub const LOCKTIME_THRESHOLD: u32 = 500_000_000; // Tue Nov  5 00:53:20 1985 UTC
