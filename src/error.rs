// error types for the fallible edges of the crate. the core engine
// itself never returns an error: its preconditions are caller
// guaranteed. these exist for the boundary code around it
// (configuration taken from outside the process, patch-file ingestion).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sample_size must be at least 1")]
    ZeroSampleSize,
    #[error("min_chunk_size must be at least 1")]
    ZeroMinChunkSize,
    #[error("max_chunk_size ({max}) must be >= min_chunk_size ({min})")]
    MaxBelowMin { min: usize, max: usize },
    #[error("window_size ({window_size}) does not fit inside the smallest chunk ({min_chunk_bytes} bytes)")]
    WindowTooLarge {
        window_size: usize,
        min_chunk_bytes: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("hunk {index} view_a.start ({start}) is before the previous hunk's view_a.end ({prev_end})")]
    OutOfOrder {
        index: usize,
        start: usize,
        prev_end: usize,
    },
}
