use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use multiaddr::{DecodeExt, Multiaddr};
use std::hint::black_box;

const ADDRESSES: &[(&str, &str)] = &[
    ("tcp", "/ip4/127.0.0.1/tcp/9090"),
    ("quic", "/ip6/2001:db8::ff00:42:8329/udp/4001/quic-v1"),
    (
        "relay",
        "/dns4/example.com/tcp/443/wss/p2p/QmcgpsyWgH8Y8ajJz1Cu72KnS5uo2Aa2LpzU7kinSupNKC/p2p-circuit",
    ),
    ("unix", "/unix/var/run/daemon.sock"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &(name, s) in ADDRESSES {
        group.bench_with_input(BenchmarkId::from_parameter(name), s, |b, s| {
            b.iter(|| black_box(s).parse::<Multiaddr>().unwrap());
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for &(name, s) in ADDRESSES {
        let address: Multiaddr = s.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &address, |b, address| {
            b.iter(|| black_box(address).to_bytes().unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &(name, s) in ADDRESSES {
        let bytes = s.parse::<Multiaddr>().unwrap().to_bytes().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &bytes, |b, bytes| {
            b.iter(|| Multiaddr::decode(black_box(bytes.clone())).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_encode, bench_decode);
criterion_main!(benches);
