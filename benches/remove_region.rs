#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use image::{GrayImage, ImageBuffer, Luma};
use seamerase::{compute_energy, find_vertical_seam, remove_region, Region};

fn bench_image(width: u32, height: u32) -> GrayImage {
    ImageBuffer::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]))
}

fn single_seam(c: &mut Criterion) {
    let image = bench_image(120, 80);
    c.bench_function("energy and seam 120x80", move |b| {
        b.iter(|| {
            let energy = compute_energy(&image).unwrap();
            black_box(find_vertical_seam(&energy).unwrap())
        })
    });
}

fn whole_region(c: &mut Criterion) {
    let image = bench_image(120, 80);
    c.bench_function("remove 10x30 region from 120x80", move |b| {
        b.iter(|| black_box(remove_region(&image, Region::new(40, 20, 10, 30), None).unwrap()))
    });
}

criterion_group!(benches, single_seam, whole_region);
criterion_main!(benches);
