#![allow(dead_code)]
use std::path::PathBuf;

use rand::Rng;

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

pub fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("reading fixture")
}

/// Frame sizes, in order, of the frames in `mixed_stream.dat`.
pub const MIXED_STREAM_FRAMES: [(u16, usize); 6] = [
    (0x0201, 36),
    (0x0101, 40),
    (0x0106, 14),
    (0x0202, 76),
    (0x0105, 69),
    (0x0103, 33),
];

/// Split `dat` into randomly sized chunks of 1 to `max_chunk` bytes.
pub fn random_chunks<R: Rng>(rng: &mut R, dat: &[u8], max_chunk: usize) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut rest = dat;
    while !rest.is_empty() {
        let num = rng.gen_range(1..=max_chunk.min(rest.len()));
        let (head, tail) = rest.split_at(num);
        chunks.push(head.to_vec());
        rest = tail;
    }
    chunks
}
