use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pixkit_image::{
    pixel::{Bgra32, L8},
    CpuAllocator, ImageSize, PixelBuffer,
};
use pixkit_io::tiff::{black_is_zero, PhotometricDecoder};
use rand::Rng;
use std::hint::black_box;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::rng().fill(&mut data[..]);
    data
}

fn bench_photometric(c: &mut Criterion) {
    let mut group = c.benchmark_group("Photometric");

    for (width, height) in [(256, 224), (512, 448), (1023, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let region = size.into();

        let gray = PixelBuffer::from_size_val(size, L8::default(), CpuAllocator).unwrap();
        let bgra = PixelBuffer::from_size_val(size, Bgra32::default(), CpuAllocator).unwrap();

        let nibbles = random_bytes(PhotometricDecoder::BlackIsZero4.required_len(region));
        let generic = PhotometricDecoder::BlackIsZero { bits: 4 };

        group.bench_with_input(
            BenchmarkId::new("black_is_zero4_l8", &parameter_string),
            &(&nibbles, &gray),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.try_clone().unwrap());
                b.iter(|| black_is_zero::decode_4bit(black_box(src), &mut dst, region))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("black_is_zero_generic4_l8", &parameter_string),
            &(&nibbles, &gray),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.try_clone().unwrap());
                b.iter(|| generic.decode(black_box(src), &mut dst, region))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("black_is_zero4_bgra32", &parameter_string),
            &(&nibbles, &bgra),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.try_clone().unwrap());
                b.iter(|| black_is_zero::decode_4bit(black_box(src), &mut dst, region))
            },
        );

        let rgb = random_bytes(PhotometricDecoder::Rgb888.required_len(region));
        group.bench_with_input(
            BenchmarkId::new("rgb888_bgra32", &parameter_string),
            &(&rgb, &bgra),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.try_clone().unwrap());
                b.iter(|| PhotometricDecoder::Rgb888.decode(black_box(src), &mut dst, region))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_photometric);
criterion_main!(benches);
