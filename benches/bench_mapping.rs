use std::{sync::Arc, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rdfbind::{
    CollectionPropertyMapper, FnIriGenerator, LiteralPropertyMapper, MapperRegistry, MemoryGraph,
    ObjectMapper, ResourcePropertyMapper, TraversalContext,
};

const NS: &str = "http://www.example.com/bench#";
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Leaf {
    id: usize,
    label: String,
}

#[derive(Debug)]
struct Hub {
    id: usize,
    leaves: Vec<Arc<Leaf>>,
}

fn bench_scales() -> &'static [usize] {
    &[100, 1_000, 10_000]
}

fn registry() -> Arc<MapperRegistry> {
    let leaf = ObjectMapper::<Leaf>::new()
        .with_type(format!("{NS}Leaf"))
        .with_iri_generator(FnIriGenerator::new(|l: &Leaf| {
            Some(format!("{NS}leaf/{}", l.id))
        }))
        .property(
            "label",
            |l| Some(l.label.as_str()),
            LiteralPropertyMapper::new(format!("{NS}label")),
        );
    let hub = ObjectMapper::<Hub>::new()
        .with_iri_generator(FnIriGenerator::new(|h: &Hub| Some(format!("{NS}hub/{}", h.id))))
        .property(
            "leaves",
            |h| Some(&h.leaves),
            CollectionPropertyMapper::new(ResourcePropertyMapper::<Leaf>::new(format!(
                "{NS}has"
            ))),
        );
    Arc::new(MapperRegistry::new().with(leaf).with(hub))
}

/// `hubs` roots that all point at the same `leaves` leaves.
fn dataset(leaves: usize, hubs: usize) -> Vec<Hub> {
    let shared: Vec<Arc<Leaf>> = (0..leaves)
        .map(|id| {
            Arc::new(Leaf {
                id,
                label: format!("leaf {id}"),
            })
        })
        .collect();
    (0..hubs)
        .map(|id| Hub {
            id,
            leaves: shared.clone(),
        })
        .collect()
}

fn bench_map_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_fan_out");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let registry = registry();
    for &size in bench_scales() {
        let hubs = dataset(size, 1);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                let context = TraversalContext::new(registry.clone())
                    .with_graph(Arc::new(MemoryGraph::new()));
                context.map(&hubs[0]).expect("map");
            });
        });
    }
    group.finish();
}

fn bench_map_shared_leaves(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_shared_leaves");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let registry = registry();
    for &size in bench_scales() {
        let hubs = dataset(size / 10, 10);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                let context = TraversalContext::new(registry.clone())
                    .with_graph(Arc::new(MemoryGraph::new()));
                for hub in &hubs {
                    context.map(hub).expect("map");
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = mapping_benches;
    config = Criterion::default();
    targets = bench_map_fan_out, bench_map_shared_leaves
);
criterion_main!(mapping_benches);
