//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use safesus_geo::{
    extract_coordinates, haversine_distance, rank_by_distance, Coordinate, RankOptions,
};
use serde_json::{json, Value};

fn create_test_items(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            // Generate points in a grid around Bangkok, mixing record shapes
            let lat = 13.0 + (i as f64 * 0.01) % 2.0;
            let lng = 100.0 + (i as f64 * 0.01) % 2.0;
            match i % 3 {
                0 => json!({"id": i, "location": {"type": "Point", "coordinates": [lng, lat]}}),
                1 => json!({"id": i, "lat": lat, "lng": lng}),
                _ => json!({"id": i, "geom": format!("POINT({lng} {lat})")}),
            }
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let bangkok = Coordinate::new(13.7563, 100.5018);
    let phuket = Coordinate::new(7.8804, 98.3923);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&bangkok), black_box(&phuket)))
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_by_distance");
    let origin = Coordinate::new(13.7465, 100.5348);

    for size in [10, 100, 1000, 10000].iter() {
        let items = create_test_items(*size);

        group.bench_with_input(BenchmarkId::new("missing_last", size), size, |b, _| {
            b.iter(|| {
                rank_by_distance(
                    black_box(origin),
                    black_box(items.clone()),
                    &RankOptions::missing_last(),
                )
            })
        });
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let geojson = json!({"location": {"type": "Point", "coordinates": [100.5018, 13.7563]}});
    let flat = json!({"latitude": 13.7563, "longitude": 100.5018});
    let wkt = json!({"geom": "POINT(100.5018 13.7563)"});

    let mut group = c.benchmark_group("extract_coordinates");

    group.bench_function("geojson", |b| b.iter(|| extract_coordinates(black_box(&geojson))));
    group.bench_function("flat", |b| b.iter(|| extract_coordinates(black_box(&flat))));
    group.bench_function("wkt", |b| b.iter(|| extract_coordinates(black_box(&wkt))));

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_rank, bench_extraction);
criterion_main!(benches);
