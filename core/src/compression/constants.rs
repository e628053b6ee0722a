/// Default deflate level (balanced).
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;
/// Highest level flate2 accepts.
pub const MAX_LEVEL_DEFLATE: u32 = 9;

/// Number of distinct byte symbols a frequency table can hold.
pub const SYMBOL_COUNT: usize = 256;
