// tunables threaded explicitly through every call in this crate, rather
// than kept as process-global constants

use crate::error::ConfigError;

// default irreducible-over-GF(2) polynomial used by the rolling hash,
// represented by its low 32 bits (the leading x^32 term is implicit)
pub const DEFAULT_POLYNOMIAL: u32 = 0x04C1_1DB7;

pub const DEFAULT_MIN_CHUNK_SIZE: usize = 10;
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_BOUNDARY_MASK: u32 = 0xFF;
pub const DEFAULT_BUF_SIZE: usize = 8192;

// engine-wide configuration, constructed once per diff and passed by
// reference into every component
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub sample_size: usize,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
    pub window_size: usize,
    pub boundary_mask: u32,
    pub buf_size: usize,
    pub polynomial: u32,
}

impl Config {
    // core-facing constructor: invalid arguments here are a programmer
    // error, not a recoverable condition
    pub fn new(sample_size: usize) -> Self {
        let cfg = Config {
            sample_size,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            window_size: DEFAULT_MIN_CHUNK_SIZE * sample_size.max(1),
            boundary_mask: DEFAULT_BOUNDARY_MASK,
            buf_size: DEFAULT_BUF_SIZE,
            polynomial: DEFAULT_POLYNOMIAL,
        };
        cfg.assert_valid();
        cfg
    }

    pub fn with_chunk_bounds(mut self, min_chunk_size: usize, max_chunk_size: usize) -> Self {
        self.min_chunk_size = min_chunk_size;
        self.max_chunk_size = max_chunk_size;
        self.assert_valid();
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self.assert_valid();
        self
    }

    pub fn with_boundary_mask(mut self, boundary_mask: u32) -> Self {
        self.boundary_mask = boundary_mask;
        self
    }

    fn assert_valid(&self) {
        assert!(self.sample_size >= 1, "sample_size must be >= 1");
        assert!(self.min_chunk_size >= 1, "min_chunk_size must be >= 1");
        assert!(
            self.max_chunk_size >= self.min_chunk_size,
            "max_chunk_size must be >= min_chunk_size"
        );
        assert!(
            self.window_size <= self.min_chunk_size * self.sample_size,
            "window_size must fit inside the smallest chunk"
        );
    }

    /// Fallible counterpart of [`Config::new`], for callers who take these
    /// bounds from outside the process (a config file, CLI flags) and want
    /// a `Result` at that boundary instead of a panic.
    pub fn try_new(
        sample_size: usize,
        min_chunk_size: usize,
        max_chunk_size: usize,
        window_size: usize,
    ) -> Result<Self, ConfigError> {
        if sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        if min_chunk_size == 0 {
            return Err(ConfigError::ZeroMinChunkSize);
        }
        if max_chunk_size < min_chunk_size {
            return Err(ConfigError::MaxBelowMin {
                min: min_chunk_size,
                max: max_chunk_size,
            });
        }
        if window_size > min_chunk_size * sample_size {
            return Err(ConfigError::WindowTooLarge {
                window_size,
                min_chunk_bytes: min_chunk_size * sample_size,
            });
        }
        Ok(Config {
            sample_size,
            min_chunk_size,
            max_chunk_size,
            window_size,
            boundary_mask: DEFAULT_BOUNDARY_MASK,
            buf_size: DEFAULT_BUF_SIZE,
            polynomial: DEFAULT_POLYNOMIAL,
        })
    }

    /// Number of whole samples that fit in one I/O buffer.
    pub(crate) fn samples_per_buf(&self) -> usize {
        (self.buf_size / self.sample_size).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::new(2);
        assert_eq!(cfg.sample_size, 2);
        assert!(cfg.max_chunk_size >= cfg.min_chunk_size);
    }

    #[test]
    #[should_panic(expected = "max_chunk_size must be >= min_chunk_size")]
    fn rejects_max_below_min() {
        let _ = Config::new(1).with_chunk_bounds(100, 10);
    }

    #[test]
    fn try_new_reports_bad_bounds() {
        assert!(matches!(
            Config::try_new(1, 10, 5, 4),
            Err(ConfigError::MaxBelowMin { min: 10, max: 5 })
        ));
        assert!(matches!(
            Config::try_new(0, 10, 20, 4),
            Err(ConfigError::ZeroSampleSize)
        ));
        assert!(Config::try_new(2, 10, 20, 16).is_ok());
    }
}
