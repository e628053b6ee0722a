/// Chunk size used by the splitter (1 MiB). The last chunk may be shorter.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Upper bound for a caller-supplied chunk size.
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Filename stored when the caller supplies none.
pub const DEFAULT_FILENAME: &str = "compressed-file";

/// Suffix appended to a source name to name its container.
pub const COMPRESSED_SUFFIX: &str = ".compressed";
