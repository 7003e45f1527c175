/*
    Pluggable sample-stream access: the Fetch/Seek contract the core
    engine consumes instead of opening files or containers itself.
*/

// reads up to n_samples samples starting at the current position and
// advances the position by the number actually read. writes exactly
// n_actual * sample_size bytes into buf and returns n_actual; 0 means
// end of stream. not required to be idempotent at the same position
// (e.g. over a pipe).
pub trait Fetch {
    fn fetch(&mut self, buf: &mut [u8], n_samples: usize) -> usize;
}

pub trait Seek {
    fn seek(&mut self, pos_in_samples: usize);
}

// bdiff_narrow/bdiff require both; bdiff_rough only needs Fetch
pub trait StreamIo: Fetch + Seek {}

impl<T: Fetch + Seek> StreamIo for T {}
