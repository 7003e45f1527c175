/*
    Minimal end-to-end demo binary over a generic fixed-width-record
    file. This is not an audio-container adapter (no
    sample-rate/channel/format negotiation); it just treats both files
    as raw streams of sample_size-byte records.
*/

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek as IoSeek, SeekFrom};

use sampdiff::{apply, patchfile, Config, DiffEngine, Fetch, Seek};

struct FileStream {
    file: File,
    sample_size: usize,
}

impl FileStream {
    fn open(path: &str, sample_size: usize) -> Self {
        let file = File::open(path).unwrap_or_else(|e| panic!("could not open {path}: {e}"));
        FileStream { file, sample_size }
    }

    fn total_samples(&self) -> usize {
        let len = self.file.metadata().expect("could not stat file").len() as usize;
        len / self.sample_size
    }
}

impl Fetch for FileStream {
    fn fetch(&mut self, buf: &mut [u8], n_samples: usize) -> usize {
        let want_bytes = n_samples * self.sample_size;
        let mut total = 0;
        while total < want_bytes {
            match self.file.read(&mut buf[total..want_bytes]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) => {
                    log::error!("read failed: {e}");
                    break;
                }
            }
        }
        total / self.sample_size
    }
}

impl Seek for FileStream {
    fn seek(&mut self, pos_in_samples: usize) {
        self.file
            .seek(SeekFrom::Start((pos_in_samples * self.sample_size) as u64))
            .expect("seek failed");
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("diff") if args.len() == 5 => {
            let sample_size: usize = args[2].parse().expect("sample_size must be a positive integer");
            diff(&args[3], &args[4], sample_size);
        }
        Some("patch") if args.len() == 6 => {
            let sample_size: usize = args[3].parse().expect("sample_size must be a positive integer");
            patch(&args[2], &args[4], &args[5], sample_size);
        }
        _ => help(),
    }
}

fn diff(path_a: &str, path_b: &str, sample_size: usize) {
    let config = Config::new(sample_size);
    let engine = DiffEngine::new(config);
    let mut a = FileStream::open(path_a, sample_size);
    let mut b = FileStream::open(path_b, sample_size);
    let hunks = engine.bdiff(&mut a, &mut b);
    print!("{}", patchfile::format(&hunks));
}

fn patch(diff_path: &str, a_path: &str, b_path: &str, sample_size: usize) {
    let text = std::fs::read_to_string(diff_path).expect("could not read diff file");
    let hunks = patchfile::parse(&text);

    let mut a = FileStream::open(a_path, sample_size);
    let mut b = FileStream::open(b_path, sample_size);
    let a_total = a.total_samples();

    let out_path = format!("{b_path}.patched");
    let out_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&out_path)
        .expect("could not open patch output");
    let mut out = BufWriter::new(out_file);

    apply::apply_patch(&hunks, sample_size, config_buf_size(), &mut a, &mut b, a_total, &mut out)
        .expect("hunks in diff file are not ordered by view_a.start");
    println!("wrote {out_path}");
}

fn config_buf_size() -> usize {
    Config::new(1).buf_size
}

fn help() {
    println!(
        "usage:
  sampdiff diff SAMPLE_SIZE FILE_A FILE_B > diff.txt
      Computes a byte-exact diff between two fixed-width-record files.
  sampdiff patch diff.txt SAMPLE_SIZE FILE_A FILE_B
      Applies a diff to reconstruct FILE_B from FILE_A, writing FILE_B.patched."
    );
}
