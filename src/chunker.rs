/*
    Content-defined chunking. Splits a sample stream into Chunks whose
    boundaries are determined by a windowed rolling hash rather than
    fixed offsets, so that an insertion or deletion only disturbs chunk
    boundaries near it.
*/

use crate::config::Config;
use crate::rolling_hash::{PlainHash, WindowedHash};
use crate::stream_io::Fetch;
use crate::types::Chunk;

// returns a strict partition of [0, total_samples): contiguous,
// non-overlapping, increasing start order, every chunk but possibly the
// last satisfying min_chunk_size <= len <= max_chunk_size
pub fn split(stream: &mut impl Fetch, config: &Config) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut plain = PlainHash::new(config.polynomial);
    let mut windowed = WindowedHash::new(config.window_size, config.polynomial);

    let samples_per_buf = config.samples_per_buf();
    let mut buf = vec![0u8; samples_per_buf * config.sample_size];

    let mut chunk_start: usize = 0;
    let mut pos: usize = 0;

    loop {
        let n_read = stream.fetch(&mut buf, samples_per_buf);
        if n_read == 0 {
            break;
        }
        for sample_idx in 0..n_read {
            let sample_start = sample_idx * config.sample_size;
            let sample = &buf[sample_start..sample_start + config.sample_size];
            for &byte in sample {
                plain.update(byte);
                windowed.update(byte);
            }

            let len = pos + 1 - chunk_start;
            let hash_triggers = (windowed.hash() & config.boundary_mask) == 0;
            let min_satisfied = len >= config.min_chunk_size;
            let forced = len == config.max_chunk_size;

            if (min_satisfied && hash_triggers) || forced {
                log::trace!(
                    "chunk boundary at {} (len {}, forced {})",
                    pos + 1,
                    len,
                    forced
                );
                chunks.push(Chunk {
                    start: chunk_start,
                    end: pos + 1,
                    hash: plain.hash(),
                });
                chunk_start = pos + 1;
                plain.reset();
                windowed.reset();
            }

            pos += 1;
        }
    }

    if pos > chunk_start {
        log::trace!("final chunk at {}..{}", chunk_start, pos);
        chunks.push(Chunk {
            start: chunk_start,
            end: pos,
            hash: plain.hash(),
        });
    }

    chunks
}
