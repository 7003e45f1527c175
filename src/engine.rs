/*
    DiffEngine composes the chunker, hunk builder and narrower behind
    three frozen entry points: bdiff_rough, bdiff_narrow, bdiff. Owns
    nothing beyond its Config.
*/

use crate::chunker;
use crate::config::Config;
use crate::hunk_builder;
use crate::narrower;
use crate::stream_io::{Fetch, StreamIo};
use crate::types::Hunk;

// splits both streams into content-defined chunks and aligns them by
// hash; only needs sequential Fetch access, streams may be unseekable
pub fn bdiff_rough(config: &Config, a: &mut impl Fetch, b: &mut impl Fetch) -> Vec<Hunk> {
    let a_chunks = chunker::split(a, config);
    let b_chunks = chunker::split(b, config);
    log::debug!(
        "rough diff: {} chunks in a, {} chunks in b",
        a_chunks.len(),
        b_chunks.len()
    );
    hunk_builder::diff_chunks(&a_chunks, &b_chunks)
}

// byte-exact narrowing of already-computed rough hunks; requires
// seekable streams
pub fn bdiff_narrow(
    rough_hunks: &[Hunk],
    config: &Config,
    a: &mut dyn StreamIo,
    b: &mut dyn StreamIo,
) -> Vec<Hunk> {
    narrower::narrow(rough_hunks, config, a, b)
}

// rough diff followed by narrowing, the full pipeline; requires
// seekable streams (the rough pass only needs Fetch, but narrowing
// needs to re-seek to the start of each stream afterwards)
pub fn bdiff(config: &Config, a: &mut dyn StreamIo, b: &mut dyn StreamIo) -> Vec<Hunk> {
    let rough = bdiff_rough(config, a, b);
    log::debug!("rough diff produced {} hunks", rough.len());
    let precise = bdiff_narrow(&rough, config, a, b);
    log::debug!("narrowing produced {} hunks", precise.len());
    precise
}

// thin wrapper around the free functions above, for callers who'd
// rather hold a value than thread a &Config through every call site
pub struct DiffEngine {
    config: Config,
}

impl DiffEngine {
    pub fn new(config: Config) -> Self {
        DiffEngine { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bdiff_rough(&self, a: &mut impl Fetch, b: &mut impl Fetch) -> Vec<Hunk> {
        bdiff_rough(&self.config, a, b)
    }

    pub fn bdiff_narrow(
        &self,
        rough_hunks: &[Hunk],
        a: &mut dyn StreamIo,
        b: &mut dyn StreamIo,
    ) -> Vec<Hunk> {
        bdiff_narrow(rough_hunks, &self.config, a, b)
    }

    pub fn bdiff(&self, a: &mut dyn StreamIo, b: &mut dyn StreamIo) -> Vec<Hunk> {
        bdiff(&self.config, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PiecewiseStream, VecStream};
    use rand::{RngCore, SeedableRng};
    use rand::rngs::StdRng;

    #[test]
    fn identity_diff_is_empty() {
        let config = Config::new(1)
            .with_chunk_bounds(8, 512)
            .with_window_size(8)
            .with_boundary_mask(0x1F);
        let mut a = PiecewiseStream::new(&[(3000, 7u8)]);
        let mut b = PiecewiseStream::new(&[(3000, 7u8)]);
        let hunks = bdiff(&config, &mut a, &mut b);
        assert!(hunks.is_empty(), "diffing a stream against itself must yield no hunks");
    }

    #[test]
    fn combined_change_narrows_to_a_single_hunk() {
        // Mirrors bdiff_combined_change from the original's test suite:
        // a run differs in the middle of an otherwise identical stream.
        let config = Config::new(1).with_chunk_bounds(10, 10_000);
        let mut a = PiecewiseStream::new(&[(150, 0u8), (650, 1u8), (700, 0u8)]);
        let mut b = PiecewiseStream::new(&[(150, 0u8), (650, 2u8), (700, 0u8)]);
        let hunks = bdiff(&config, &mut a, &mut b);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].view_a, hunks[0].view_b);
    }

    #[test]
    fn engine_wrapper_matches_free_functions() {
        let config = Config::new(1)
            .with_chunk_bounds(8, 512)
            .with_window_size(8)
            .with_boundary_mask(0x1F);
        let engine = DiffEngine::new(config);
        let mut a1 = PiecewiseStream::new(&[(2000, 3u8), (2100, 9u8)]);
        let mut b1 = PiecewiseStream::new(&[(2000, 3u8), (2100, 9u8)]);
        let via_engine = engine.bdiff(&mut a1, &mut b1);

        let mut a2 = PiecewiseStream::new(&[(2000, 3u8), (2100, 9u8)]);
        let mut b2 = PiecewiseStream::new(&[(2000, 3u8), (2100, 9u8)]);
        let via_free_fn = bdiff(engine.config(), &mut a2, &mut b2);

        assert_eq!(via_engine, via_free_fn);
    }

    // two PRNG-seeded streams sharing an identical, differently-seeded
    // tail should resynchronize into exactly two hunks: one covering
    // the differing prefixes, one trailing hunk at the end
    #[test]
    fn rough_diff_of_offset_prng_streams_resyncs_on_shared_tail() {
        fn random_u32_stream(seed: u64, n: usize) -> Vec<u8> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut out = vec![0u8; n * 4];
            rng.fill_bytes(&mut out);
            out
        }

        // Both tails are drawn from the same seed, so they agree sample
        // for sample up to B's shorter length; A's tail simply continues
        // the same sequence 1,000 samples further.
        let shared_tail = random_u32_stream(2391, 10_000);

        let mut a_bytes = random_u32_stream(212, 600);
        a_bytes.extend_from_slice(&shared_tail);
        let mut b_bytes = random_u32_stream(121, 400);
        b_bytes.extend_from_slice(&shared_tail[..9_000 * 4]);

        let config = Config::new(4);
        let mut a = VecStream::new(a_bytes, 4);
        let mut b = VecStream::new(b_bytes, 4);
        let hunks = bdiff_rough(&config, &mut a, &mut b);

        assert_eq!(hunks.len(), 2, "expected one divergent-prefix hunk and one trailing hunk");
        assert_eq!(hunks[0].view_a.start, 0);
        assert_eq!(hunks[0].view_b.start, 0);
        assert!(hunks[0].view_a.end >= 600);
        assert!(hunks[0].view_b.end >= 400);
        assert_eq!(hunks[1].view_a.end, 10_600);
        assert_eq!(hunks[1].view_b.end, 9_400);
    }

    // applying the hunks bdiff(A, B) produces, against A, reconstructs
    // B exactly
    #[test]
    fn patch_round_trip_reconstructs_b_from_a() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut common: Vec<u8> = vec![0u8; 20_000];
        rng.fill_bytes(&mut common);

        let mut a_bytes = common[..5_000].to_vec();
        a_bytes.extend_from_slice(&[0xAAu8; 3_000]);
        a_bytes.extend_from_slice(&common[5_000..]);

        let mut b_bytes = common[..5_000].to_vec();
        b_bytes.extend_from_slice(&[0xBBu8; 1_500]);
        b_bytes.extend_from_slice(&common[5_000..]);

        let config = Config::new(1).with_chunk_bounds(10, 10_000);
        let mut a = VecStream::new(a_bytes.clone(), 1);
        let mut b = VecStream::new(b_bytes.clone(), 1);
        let hunks = bdiff(&config, &mut a, &mut b);

        let mut a_for_apply = VecStream::new(a_bytes.clone(), 1);
        let mut b_for_apply = VecStream::new(b_bytes.clone(), 1);
        let mut out = Vec::new();
        crate::apply::apply_patch(
            &hunks,
            1,
            config.buf_size,
            &mut a_for_apply,
            &mut b_for_apply,
            a_bytes.len(),
            &mut out,
        )
        .unwrap();

        assert_eq!(out, b_bytes);
    }
}
