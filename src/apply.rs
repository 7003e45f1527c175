/*
    Patch application. Given the hunks bdiff(A, B) produced,
    reconstructs B from A by copying the unchanged spans of A and the
    changed spans of B.
*/

use std::io::{self, Write};

use crate::error::ApplyError;
use crate::stream_io::{Fetch, Seek};
use crate::types::Hunk;

// copies [start, end) samples from stream into out, sample_size bytes
// at a time, in buf_size-byte batches
fn copy_span(
    stream: &mut (impl Fetch + Seek),
    out: &mut impl Write,
    start: usize,
    end: usize,
    sample_size: usize,
    buf_size: usize,
) -> io::Result<()> {
    if start >= end {
        return Ok(());
    }
    stream.seek(start);
    let samples_per_buf = (buf_size / sample_size).max(1);
    let mut buf = vec![0u8; samples_per_buf * sample_size];
    let mut remaining = end - start;
    while remaining > 0 {
        let want = samples_per_buf.min(remaining);
        let n_read = stream.fetch(&mut buf, want);
        if n_read == 0 {
            break;
        }
        out.write_all(&buf[..n_read * sample_size])?;
        remaining -= n_read;
    }
    Ok(())
}

// applies hunks (ordered by view_a.start, as bdiff produces) to
// reconstruct stream B from A, writing the result to out: for each
// hunk in order, the span of A since the previous hunk's end, then the
// hunk's span of B; after the last hunk, the remaining tail of A.
// errors if the hunks aren't ordered by view_a.start.
pub fn apply_patch(
    hunks: &[Hunk],
    sample_size: usize,
    buf_size: usize,
    a: &mut (impl Fetch + Seek),
    b: &mut (impl Fetch + Seek),
    a_total_samples: usize,
    out: &mut impl Write,
) -> Result<(), ApplyError> {
    let mut prev_end_a = 0usize;
    for (index, hunk) in hunks.iter().enumerate() {
        if hunk.view_a.start < prev_end_a {
            return Err(ApplyError::OutOfOrder {
                index,
                start: hunk.view_a.start,
                prev_end: prev_end_a,
            });
        }
        copy_span(a, out, prev_end_a, hunk.view_a.start, sample_size, buf_size)
            .expect("writing to the patch output failed");
        copy_span(
            b,
            out,
            hunk.view_b.start,
            hunk.view_b.end,
            sample_size,
            buf_size,
        )
        .expect("reading stream b during patch application failed");
        prev_end_a = hunk.view_a.end;
    }
    copy_span(a, out, prev_end_a, a_total_samples, sample_size, buf_size)
        .expect("writing the trailing span of a failed");
    Ok(())
}
