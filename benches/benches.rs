use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::Rng;

use gnssaux::{
    crc, decode_auxiliary, encode_auxiliary, encode_security, AuxiliaryMessage, Ephemeris,
    Framer, InterferenceDetection, Jammer, RaimFault, SecurityMessage, SpoofedSignal,
};

fn bench_crc24q(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut buf = [0u8; 4096];
    rng.fill(&mut buf[..]);

    let mut group = c.benchmark_group("crc");
    group.throughput(Throughput::Bytes(buf.len() as u64));
    group.bench_function("crc24q", |b| {
        b.iter(|| crc::crc24q(&buf));
    });
    group.finish();
}

fn bench_ephemeris(c: &mut Criterion) {
    let msg = AuxiliaryMessage::Ephemeris(Ephemeris::max());
    let dat = encode_auxiliary(&msg);

    let mut group = c.benchmark_group("ephemeris");
    group.bench_function("encode", |b| {
        b.iter(|| encode_auxiliary(&msg));
    });
    group.bench_function("decode", |b| {
        b.iter(|| decode_auxiliary(&dat).unwrap());
    });
    group.finish();
}

fn bench_framer(c: &mut Criterion) {
    let detection = SecurityMessage::InterferenceDetection(InterferenceDetection {
        raim_faults: vec![RaimFault::default(); 8],
        jammers: vec![Jammer::default(); 4],
        spoofed_signals: vec![SpoofedSignal::default(); 8],
        ..Default::default()
    });
    let mut stream = Vec::new();
    for _ in 0..100 {
        stream.extend(encode_auxiliary(&Ephemeris::max().into()));
        stream.extend(encode_security(&detection).unwrap());
    }

    let mut group = c.benchmark_group("framer");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("feed_1024", |b| {
        b.iter(|| {
            let mut framer = Framer::default();
            let mut num = 0;
            for chunk in stream.chunks(1024) {
                num += framer.feed(chunk).unwrap().len();
            }
            assert_eq!(num, 200);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_crc24q, bench_ephemeris, bench_framer);
criterion_main!(benches);
