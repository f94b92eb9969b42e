use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use hcasl::scan::{ScanStats, scan};
use hcasl::unit::Unit;
use hcasl::window::WindowBuffer;
use rand::Rng;
use std::io::Cursor;

const INPUT_LEN: usize = 1 << 20; // 1 MiB

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random()).collect()
}

fn random_ascii(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(b' '..=b'~')).collect()
}

fn bench_byte_scan(c: &mut Criterion) {
    let data = random_bytes(INPUT_LEN);
    let mut group = c.benchmark_group("byte_scan");
    group.throughput(Throughput::Bytes(INPUT_LEN as u64));
    for width in [8usize, 64, 512] {
        group.bench_function(format!("width_{width}"), |b| {
            b.iter(|| {
                let mut window = WindowBuffer::with_capacity(width);
                let mut reader = u8::reader(Cursor::new(&data[..]));
                let mut out = Vec::new();
                let mut stats = ScanStats::default();
                scan(&mut reader, &mut out, width, &mut window, &mut stats).unwrap();
                black_box(out.len())
            })
        });
    }
    group.finish();
}

fn bench_char_scan(c: &mut Criterion) {
    let data = random_ascii(INPUT_LEN);
    let mut group = c.benchmark_group("char_scan");
    group.throughput(Throughput::Bytes(INPUT_LEN as u64));
    for width in [8usize, 64] {
        group.bench_function(format!("width_{width}"), |b| {
            b.iter(|| {
                let mut window = WindowBuffer::with_capacity(width);
                let mut reader = char::reader(Cursor::new(&data[..]));
                let mut out = Vec::new();
                let mut stats = ScanStats::default();
                scan(&mut reader, &mut out, width, &mut window, &mut stats).unwrap();
                black_box(out.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_byte_scan, bench_char_scan);
criterion_main!(benches);
