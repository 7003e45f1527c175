/*
    Rough chunk alignment. Turns two chunk lists into an ordered list of
    Hunks at chunk granularity, before narrower tightens them to
    byte-exact boundaries. Builds a HashMultiset from b's hashes, walks
    a with one cursor, and advances a second cursor into b to catch up
    to each matched anchor.
*/

use crate::hash_multiset::HashMultiset;
use crate::types::{Chunk, Hunk, View};

// aligns chunk lists a and b by hash, returning hunks whose endpoints
// lie on chunk boundaries in both streams. hash collisions are treated
// as true matches here (narrower catches any that turn out wrong).
// when the same hash repeats on both sides, the first available match
// on the b side wins; this builder does not attempt optimal alignment.
pub fn diff_chunks(a: &[Chunk], b: &[Chunk]) -> Vec<Hunk> {
    let mut multiset = HashMultiset::from_hashes(b.iter().map(|c| c.hash));

    let mut hunks = Vec::new();
    let mut hunk_start_a = 0usize;
    let mut hunk_start_b = 0usize;
    let mut b_idx = 0usize;

    for ca in a {
        if multiset.get(ca.hash) == 0 {
            // No remaining counterpart in b; fold ca into the pending
            // hunk and keep looking.
            continue;
        }

        // Advance b forward to the matching chunk, treating everything
        // skipped over as unique to b.
        while b[b_idx].hash != ca.hash {
            multiset.dec(b[b_idx].hash);
            b_idx += 1;
        }
        let matched_b = b[b_idx];

        push_hunk_if_nonempty(
            &mut hunks,
            hunk_start_a,
            ca.start,
            hunk_start_b,
            matched_b.start,
        );

        hunk_start_a = ca.end;
        hunk_start_b = matched_b.end;
        multiset.dec(matched_b.hash);
        b_idx += 1;
    }

    let total_a = a.last().map_or(0, |c| c.end);
    let total_b = b.last().map_or(0, |c| c.end);
    push_hunk_if_nonempty(&mut hunks, hunk_start_a, total_a, hunk_start_b, total_b);

    hunks
}

fn push_hunk_if_nonempty(
    hunks: &mut Vec<Hunk>,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
) {
    if a_start == a_end && b_start == b_end {
        return;
    }
    log::trace!(
        "rough hunk a:[{},{}) b:[{},{})",
        a_start,
        a_end,
        b_start,
        b_end
    );
    hunks.push(Hunk::new(View::new(a_start, a_end), View::new(b_start, b_end)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(start: usize, end: usize, hash: u32) -> Chunk {
        Chunk { start, end, hash }
    }

    #[test]
    fn identical_lists_produce_no_hunks() {
        let a = vec![chunk(0, 1, 10), chunk(1, 2, 20), chunk(2, 3, 30)];
        let hunks = diff_chunks(&a, &a);
        assert!(hunks.is_empty());
    }

    #[test]
    fn change_in_middle_chunk_is_a_single_hunk() {
        let a = vec![chunk(0, 1, 1), chunk(1, 2, 2), chunk(2, 3, 3)];
        let b = vec![chunk(0, 1, 1), chunk(1, 2, 4), chunk(2, 3, 3)];
        let hunks = diff_chunks(&a, &b);
        assert_eq!(hunks, vec![Hunk::new(View::new(1, 2), View::new(1, 2))]);
    }

    #[test]
    fn insertion_at_start_of_a_is_a_b_only_hunk() {
        let a = vec![chunk(0, 1, 1), chunk(1, 2, 2), chunk(2, 3, 3)];
        let b = vec![chunk(0, 1, 2), chunk(1, 2, 3)];
        let hunks = diff_chunks(&a, &b);
        assert_eq!(hunks, vec![Hunk::new(View::new(0, 1), View::new(0, 0))]);
    }

    #[test]
    fn hunks_are_ordered_and_non_overlapping() {
        let a = vec![
            chunk(0, 1, 1),
            chunk(1, 2, 99),
            chunk(2, 3, 2),
            chunk(3, 4, 98),
            chunk(4, 5, 3),
        ];
        let b = vec![chunk(0, 1, 1), chunk(1, 2, 2), chunk(2, 3, 3)];
        let hunks = diff_chunks(&a, &b);
        for w in hunks.windows(2) {
            assert!(w[0].view_a.end <= w[1].view_a.start);
            assert!(w[0].view_b.end <= w[1].view_b.start);
        }
        assert!(!hunks.is_empty());
    }

    #[test]
    fn trailing_insertion_in_b_only() {
        let a = vec![chunk(0, 1, 1)];
        let b = vec![chunk(0, 1, 1), chunk(1, 2, 2)];
        let hunks = diff_chunks(&a, &b);
        assert_eq!(hunks, vec![Hunk::new(View::new(1, 1), View::new(1, 2))]);
    }

    #[test]
    fn empty_inputs_produce_no_hunks() {
        let empty: Vec<Chunk> = Vec::new();
        assert!(diff_chunks(&empty, &empty).is_empty());
    }
}
