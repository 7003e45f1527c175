/*
    Byte-exact narrowing. Shrinks each chunk-granularity rough hunk down
    to the tightest interval that actually differs, resolving the
    alignment drift that insertions/deletions straddling a chunk
    boundary cause.
*/

use crate::config::Config;
use crate::stream_io::StreamIo;
use crate::types::{Hunk, View};

fn min3(a: usize, b: usize, c: usize) -> usize {
    a.min(b).min(c)
}

// scans forward from a_start/b_start in lockstep, returns the sample
// offset of the first disagreement, capped at max_length. a short read
// on one side counts as the disagreement point.
fn find_start_delta(
    a: &mut dyn StreamIo,
    b: &mut dyn StreamIo,
    a_start: usize,
    b_start: usize,
    max_length: usize,
    config: &Config,
) -> usize {
    a.seek(a_start);
    b.seek(b_start);

    let samples_per_buf = config.samples_per_buf();
    let mut buf_a = vec![0u8; samples_per_buf * config.sample_size];
    let mut buf_b = vec![0u8; samples_per_buf * config.sample_size];

    let mut delta_offset = 0usize;
    while delta_offset < max_length {
        let want = samples_per_buf.min(max_length - delta_offset);
        let n_read_a = a.fetch(&mut buf_a, want);
        let n_read_b = b.fetch(&mut buf_b, want);
        let min_read = n_read_a.min(n_read_b);
        for i in 0..min_read {
            let off = i * config.sample_size;
            if buf_a[off..off + config.sample_size] != buf_b[off..off + config.sample_size] {
                return delta_offset + i;
            }
        }
        if n_read_a != n_read_b {
            return delta_offset + min_read;
        }
        if min_read == 0 {
            break;
        }
        delta_offset += min_read;
    }
    delta_offset
}

// scans backward over the last end_delta samples before a_end/b_end,
// returns how many trailing samples agree (how far the true end
// retracts). a short read here means the stream ended sooner than the
// hunk's own bounds promised; treated as EOF, not a panic.
fn find_end_delta(
    a: &mut dyn StreamIo,
    b: &mut dyn StreamIo,
    end_delta: usize,
    a_end: usize,
    b_end: usize,
    config: &Config,
) -> usize {
    a.seek(a_end - end_delta);
    b.seek(b_end - end_delta);

    let samples_per_buf = config.samples_per_buf();
    let mut buf_a = vec![0u8; samples_per_buf * config.sample_size];
    let mut buf_b = vec![0u8; samples_per_buf * config.sample_size];

    let mut loop_start_delta = end_delta;
    let mut result = end_delta;
    while loop_start_delta > 0 {
        let want = samples_per_buf.min(loop_start_delta);
        let n_read_a = a.fetch(&mut buf_a, want);
        if n_read_a == 0 {
            break;
        }
        let n_read_b = b.fetch(&mut buf_b, n_read_a);
        let n_read = n_read_a.min(n_read_b);
        for i in 0..n_read {
            let off = i * config.sample_size;
            if buf_a[off..off + config.sample_size] != buf_b[off..off + config.sample_size] {
                result = loop_start_delta - i - 1;
            }
        }
        if n_read < n_read_a {
            break;
        }
        loop_start_delta -= n_read;
    }
    result
}

// looks for a retroactive alignment of sliding's tail against fixed,
// trying slide_distance from max_slide down to 1. returns the first
// slide_distance whose single sample at sliding_end - slide_distance
// matches fixed_start and whose remaining span realigns completely; 0
// if none does, meaning no retroactive adjustment is needed.
fn slidey_aligner(
    fixed: &mut dyn StreamIo,
    sliding: &mut dyn StreamIo,
    fixed_start: usize,
    sliding_end: usize,
    max_slide: usize,
    config: &Config,
) -> usize {
    let mut buf_a = vec![0u8; config.sample_size];
    let mut buf_b = vec![0u8; config.sample_size];

    let mut slide_distance = max_slide;
    while slide_distance > 0 {
        sliding.seek(sliding_end - slide_distance);
        fixed.seek(fixed_start);
        let n_a = fixed.fetch(&mut buf_a, 1);
        let n_b = sliding.fetch(&mut buf_b, 1);
        debug_assert_eq!(n_a, 1);
        debug_assert_eq!(n_b, 1);

        if buf_a == buf_b {
            let start_delta = find_start_delta(
                fixed,
                sliding,
                fixed_start + 1,
                sliding_end - slide_distance + 1,
                slide_distance,
                config,
            );
            if start_delta == slide_distance {
                break;
            }
        }
        slide_distance -= 1;
    }
    slide_distance
}

// narrows a list of chunk-granularity rough hunks to byte-exact
// boundaries; both streams must support Seek. order is preserved, a
// hunk that narrows to empty on both sides is dropped, never reordered.
pub fn narrow(
    rough_hunks: &[Hunk],
    config: &Config,
    a: &mut dyn StreamIo,
    b: &mut dyn StreamIo,
) -> Vec<Hunk> {
    let mut precise: Vec<Hunk> = Vec::new();
    let mut end_shove_a = 0usize;
    let mut end_shove_b = 0usize;

    for rough in rough_hunks {
        if end_shove_a != 0 {
            let tail = precise.last().expect("end_shove_a implies a prior hunk");
            let max_slide = min3(tail.view_b.len(), rough.view_a.len(), config.max_chunk_size);
            let slide = slidey_aligner(a, b, rough.view_a.start, tail.view_b.end, max_slide, config);
            end_shove_a = slide;
            precise.last_mut().unwrap().view_b.end -= slide;
        } else if end_shove_b != 0 {
            let tail = precise.last().expect("end_shove_b implies a prior hunk");
            let max_slide = min3(tail.view_a.len(), rough.view_b.len(), config.max_chunk_size);
            let slide = slidey_aligner(b, a, rough.view_b.start, tail.view_a.end, max_slide, config);
            end_shove_b = slide;
            precise.last_mut().unwrap().view_a.end -= slide;
        }

        let start_delta = find_start_delta(
            a,
            b,
            rough.view_a.start + end_shove_a,
            rough.view_b.start + end_shove_b,
            config.max_chunk_size + 1,
            config,
        );
        debug_assert!(
            start_delta != config.max_chunk_size + 1,
            "start-narrow scan exceeded max_chunk_size without terminating"
        );
        end_shove_a += start_delta;
        end_shove_b += start_delta;

        let a_start = rough.view_a.start + end_shove_a;
        let b_start = rough.view_b.start + end_shove_b;
        if a_start == rough.view_a.end && b_start == rough.view_b.end {
            log::trace!("narrowed hunk collapsed to empty, dropping");
            end_shove_a = 0;
            end_shove_b = 0;
            continue;
        }

        // start-narrowing can overshoot the rough hunk's own end on one
        // side, when the inserted/deleted content happens to match what
        // follows it (repetitive data). Settle that overshoot into an
        // extended end before building any View, so start <= end always
        // holds by construction.
        let a_overshoot = a_start.saturating_sub(rough.view_a.end);
        let b_overshoot = b_start.saturating_sub(rough.view_b.end);
        debug_assert!(
            !(a_overshoot != 0 && b_overshoot != 0),
            "start-narrow cannot overshoot both sides at once"
        );
        let shove = a_overshoot.max(b_overshoot);

        let mut hunk = Hunk::new(
            View::new(a_start, rough.view_a.end + shove),
            View::new(b_start, rough.view_b.end + shove),
        );
        end_shove_a = a_overshoot;
        end_shove_b = b_overshoot;

        let mut end_delta = min3(hunk.view_a.len(), hunk.view_b.len(), config.max_chunk_size);
        if end_delta != 0 {
            end_delta = find_end_delta(a, b, end_delta, hunk.view_a.end, hunk.view_b.end, config);
        }
        hunk.view_a.end -= end_delta;
        hunk.view_b.end -= end_delta;

        log::trace!(
            "narrowed hunk a:[{},{}) b:[{},{})",
            hunk.view_a.start,
            hunk.view_a.end,
            hunk.view_b.start,
            hunk.view_b.end
        );
        precise.push(hunk);
    }

    precise
}
