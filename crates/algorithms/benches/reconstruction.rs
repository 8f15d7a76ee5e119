//! Benchmarks for geodesic reconstruction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morphrec_algorithms::labeling::label_components;
use morphrec_algorithms::reconstruction::{reconstruct_by_dilation, reconstruct_by_erosion};
use morphrec_core::{Connectivity, Grid};

fn create_test_mask(shape: &[usize]) -> Grid<u8> {
    // Varied surface with some structure
    Grid::from_fn(shape, |c| {
        let v = c.iter().enumerate().map(|(i, &x)| x * (7 + 6 * i)).sum::<usize>();
        (v % 256) as u8
    })
    .unwrap()
}

fn corner_marker(mask: &Grid<u8>) -> Grid<u8> {
    let mut marker = mask.like(0u8);
    marker.as_mut_slice()[0] = 255;
    marker
}

fn bench_dilation_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction/dilation_2d");
    for size in [256, 512, 1024] {
        let mask = create_test_mask(&[size, size]);
        let marker = corner_marker(&mask);
        for connectivity in [Connectivity::c4(), Connectivity::c8()] {
            let id = BenchmarkId::new(format!("c{}", connectivity.adjacency()), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    reconstruct_by_dilation(black_box(&marker), &mask, &connectivity).unwrap()
                })
            });
        }
    }
    group.finish();
}

fn bench_erosion_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction/erosion_3d");
    for size in [32, 64, 128] {
        let mask = create_test_mask(&[size, size, size]);
        let marker = mask.map(|v| if v == 0 { 0 } else { 255 });
        for connectivity in [Connectivity::c6(), Connectivity::c26()] {
            let id = BenchmarkId::new(format!("c{}", connectivity.adjacency()), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    reconstruct_by_erosion(black_box(&marker), &mask, &connectivity).unwrap()
                })
            });
        }
    }
    group.finish();
}

fn bench_labeling(c: &mut Criterion) {
    let mut group = c.benchmark_group("labeling/components");
    for size in [256, 512, 1024] {
        let grid = create_test_mask(&[size, size]).map(|v| u8::from(v > 127));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| label_components(black_box(&grid), &Connectivity::c8()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dilation_2d, bench_erosion_3d, bench_labeling);
criterion_main!(benches);
