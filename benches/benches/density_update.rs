// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use travelmap_density::{
    DensitySampler, HeadlessRenderer, ImmediateTransitions, LatLng, MercatorViewport, Photo,
    SamplerConfig,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Photos clustered around a handful of trip stops in western Europe.
fn gen_trip_photos(n: usize) -> Vec<Photo> {
    let stops = [
        (38.7223, -9.1393),
        (41.1579, -8.6291),
        (40.4168, -3.7038),
        (41.3874, 2.1686),
        (48.8566, 2.3522),
    ];
    let mut rng = Rng::new(0x7EA7_E1A5_0BAD_F00D);
    (0..n)
        .map(|i| {
            let (lat, lng) = stops[i % stops.len()];
            let lat = lat + (rng.next_f64() - 0.5) * 0.4;
            let lng = lng + (rng.next_f64() - 0.5) * 0.4;
            let photo = Photo::new(format!("photos/IMG_{i:05}.jpg"), lat, lng);
            if i % 11 == 0 {
                photo.with_caption("stop")
            } else {
                photo
            }
        })
        .collect()
}

fn europe_view() -> MercatorViewport {
    let mut view = MercatorViewport::new(Size::new(1280.0, 800.0));
    view.set_center(LatLng::new(42.0, -3.0));
    view.set_zoom(6.0);
    view
}

fn bench_update_steady(c: &mut Criterion) {
    let mut group = c.benchmark_group("density/update_steady");

    // Steady state: nothing moves, so every winner is retained.
    for n in [1_000usize, 5_000, 20_000] {
        let photos = gen_trip_photos(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &photos, |b, photos| {
            let mut sampler = DensitySampler::new(HeadlessRenderer::new(), ImmediateTransitions);
            sampler
                .init(europe_view(), photos.clone(), SamplerConfig::new())
                .unwrap();
            b.iter(|| black_box(sampler.update()));
        });
    }

    group.finish();
}

fn bench_update_zooming(c: &mut Criterion) {
    let mut group = c.benchmark_group("density/update_zooming");

    // Alternate between two zoom levels around Lisbon so most markers churn.
    for n in [1_000usize, 5_000, 20_000] {
        let photos = gen_trip_photos(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &photos, |b, photos| {
            let mut sampler = DensitySampler::new(HeadlessRenderer::new(), ImmediateTransitions);
            sampler
                .init(europe_view(), photos.clone(), SamplerConfig::new())
                .unwrap();
            let anchor = Point::new(200.0, 500.0);
            let mut zoom_in = true;
            b.iter(|| {
                let factor = if zoom_in { 4.0 } else { 0.25 };
                zoom_in = !zoom_in;
                if let Some(view) = sampler.viewport_mut() {
                    view.zoom_about_view_point(anchor, factor);
                }
                black_box(sampler.update())
            });
        });
    }

    group.finish();
}

fn bench_update_panning(c: &mut Criterion) {
    let mut group = c.benchmark_group("density/update_panning");

    let n = 5_000;
    let photos = gen_trip_photos(n);
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("pan_40px", |b| {
        let mut sampler = DensitySampler::new(HeadlessRenderer::new(), ImmediateTransitions);
        sampler
            .init(europe_view(), photos.clone(), SamplerConfig::new())
            .unwrap();
        let mut dir = 1.0;
        b.iter(|| {
            dir = -dir;
            if let Some(view) = sampler.viewport_mut() {
                view.pan_by_view(Vec2::new(40.0 * dir, 0.0));
            }
            black_box(sampler.update())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_update_steady,
    bench_update_zooming,
    bench_update_panning
);
criterion_main!(benches);
