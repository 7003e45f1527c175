/*
    Binary diff/patch engine for streams of fixed-size samples.

    Diffs two streams of uniform-width records, too large to load
    wholesale and opaque at the byte level (a multi-byte audio sample,
    say), tolerating insertions and deletions anywhere in either stream.
    Three stages do the work: a content-defined chunker driven by a
    windowed rolling hash, a hunk builder that aligns the two chunk
    lists into rough hunks by hash, and a narrower that shrinks each
    rough hunk to the exact differing span. engine wires the three
    together behind bdiff_rough/bdiff_narrow/bdiff.
*/

pub mod apply;
pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod hash_multiset;
pub mod hunk_builder;
pub mod narrower;
pub mod patchfile;
pub mod rolling_hash;
pub mod stream_io;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use engine::{bdiff, bdiff_narrow, bdiff_rough, DiffEngine};
pub use error::{ApplyError, ConfigError};
pub use stream_io::{Fetch, Seek, StreamIo};
pub use types::{Chunk, Hunk, View};
