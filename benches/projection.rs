use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, black_box};

use treeshade::cloud::CanopyPoint;
use treeshade::core::FEET_PER_METER;
use treeshade::layers::{LayerManager, LayerStyle, TreeSelection};
use treeshade::shadow::ShadowProjector;
use treeshade::solar::SolarTable;
use treeshade::stats::compute_metrics;

/// Roughly spherical crown of `n` points, 30ft across, centered 25ft up.
fn synthetic_crown(n: usize) -> Vec<CanopyPoint> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.618_034;
            let phi = t * std::f32::consts::TAU;
            let r = 15.0 * ((i % 97) as f32 / 97.0).sqrt();
            let z = 25.0 + 10.0 * (t * 3.1).sin();
            let band = (i % 10) as f32 / 10.0;
            CanopyPoint::new(r * phi.cos(), r * phi.sin(), z, 0.7, band * 0.5, band)
        })
        .collect()
}

fn bench_project_cloud(c: &mut Criterion) {
    let points = synthetic_crown(20_000);
    let table = SolarTable::new_york();
    let projector = ShadowProjector::default();
    let sun = &table.profile(0).unwrap().samples()[7];

    c.bench_function("project_cloud_20k", |b| {
        b.iter(|| projector.project_cloud(black_box(&points), black_box(sun)));
    });
}

fn bench_full_day_rebuild(c: &mut Criterion) {
    let cloud: Arc<[CanopyPoint]> = synthetic_crown(20_000).into();
    let selection = TreeSelection {
        tree_id: "bench".to_string(),
        latitude: 40.707,
        longitude: -73.993,
        zone: "10003".to_string(),
        species: "honeylocust".to_string(),
        trunk_diameter_in: 18.0,
    };

    c.bench_function("full_day_rebuild_20k", |b| {
        b.iter(|| {
            let mut manager = LayerManager::new(
                Arc::new(SolarTable::new_york()),
                0,
                ShadowProjector::default(),
                LayerStyle::default(),
            )
            .unwrap();
            let (ticket, _) = manager.select(selection.clone());
            black_box(manager.complete_load(ticket, Some(Arc::clone(&cloud))))
        });
    });
}

fn bench_metrics(c: &mut Criterion) {
    let points = synthetic_crown(20_000);

    c.bench_function("canopy_metrics_20k", |b| {
        b.iter(|| compute_metrics(black_box(&points), black_box(40.0), FEET_PER_METER));
    });
}

criterion_group!(
    benches,
    bench_project_cloud,
    bench_full_day_rebuild,
    bench_metrics,
);
criterion_main!(benches);
