use cnc_resolver::{
    normalize, Descriptor, FallbackProvider, FnProvider, ModelResolver, NormalizedId, NullSink,
    ProviderChain, ResolverConfig,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;

struct Generic;

impl FallbackProvider for Generic {
    fn name(&self) -> &str {
        "generic"
    }

    fn generate(&self, id: &NormalizedId) -> Descriptor {
        Descriptor::new(json!({"id": id.as_str(), "type": "3axis"}))
    }
}

fn make_resolver() -> ModelResolver {
    let chain = ProviderChain::builder()
        .oem_record(FnProvider::new("oem", |id: &NormalizedId| {
            Ok(id
                .as_str()
                .starts_with("hurco")
                .then(|| Descriptor::new(json!({"id": id.as_str()})).with_geometry(true)))
        }))
        .fallback(Generic)
        .event_sink(Arc::new(NullSink))
        .build()
        .expect("valid chain");
    ModelResolver::new(chain, ResolverConfig::default())
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("Hurco VM-50 i  (5-Axis)")));
    });
}

fn bench_cache_hit(c: &mut Criterion) {
    let resolver = make_resolver();
    resolver.get_best_descriptor("Hurco VM-50 i");

    c.bench_function("get_best_descriptor/cache_hit", |b| {
        b.iter(|| resolver.get_best_descriptor(black_box("Hurco VM-50 i")));
    });
}

fn bench_cold_resolve(c: &mut Criterion) {
    let resolver = make_resolver();

    c.bench_function("get_best_descriptor/cold", |b| {
        b.iter(|| {
            resolver.clear_cache();
            resolver.get_best_descriptor(black_box("unknown machine 5ax"))
        });
    });
}

criterion_group!(benches, bench_normalize, bench_cache_hit, bench_cold_resolve);
criterion_main!(benches);
