/// Longest route considered by the finder, in pairs.
pub const DEFAULT_MAX_HOPS: usize = 3;

/// Swap fee charged by the pools, as a fraction string.
pub const DEFAULT_FEE: &str = "3/1000";
