use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maskio_npy::{decode_npy, encode_npy, ArrayData, ArrayRecord, NpzArchive};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("NpyDecoder");

    // two VGA-sized masks, the shape the segmentation exporter produces
    let record = ArrayRecord::new(vec![2, 480, 640], ArrayData::U8(vec![1; 2 * 480 * 640]));
    let npy_bytes = encode_npy(&record).unwrap();
    let npz_bytes = maskio_npy::write_npz_bytes(&[("masks", &record)]).unwrap();

    group.bench_function("decode_npy", |b| {
        b.iter(|| black_box(decode_npy(&npy_bytes)).unwrap())
    });

    group.bench_function("open_npz", |b| {
        b.iter(|| black_box(NpzArchive::from_bytes(&npz_bytes)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
