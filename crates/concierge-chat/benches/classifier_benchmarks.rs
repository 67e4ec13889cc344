//! Benchmarks for message classification and reply selection.
//!
//! Classification runs on every inbound message while the session lock is
//! held, so it should stay well under a millisecond per message.

use std::time::Duration;

use concierge_chat::{MessageClassifier, ResponseSelector};
use concierge_core::catalog::Catalog;
use concierge_core::SessionContext;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Guest messages covering every category, a few time hints, and misses.
fn sample_messages() -> Vec<String> {
    let templates = [
        "I would like to book a spa treatment",
        "Can we get a dinner table tomorrow at 8pm?",
        "What are some must-see attractions near the hotel?",
        "Please arrange an airport shuttle for Saturday",
        "Can you send the room service menu up tonight?",
        "Are there any concerts this weekend?",
        "Where is the gym?",
        "hello",
    ];
    (0..1000)
        .map(|i| format!("{} (guest {})", templates[i % templates.len()], i))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let catalog = Catalog::default();
    let classifier = MessageClassifier::from_catalog(&catalog).unwrap();
    let messages = sample_messages();

    let mut group = c.benchmark_group("classifier");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("classify_single", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let result = classifier.classify(&messages[idx % messages.len()]);
            idx += 1;
            result
        });
    });

    group.bench_function("classify_batch_100", |b| {
        b.iter(|| {
            messages[..100]
                .iter()
                .map(|m| classifier.classify(m))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let catalog = Catalog::default();
    let classifier = MessageClassifier::from_catalog(&catalog).unwrap();
    let selector = ResponseSelector::from_catalog(&catalog).unwrap();
    let contexts: Vec<SessionContext> = sample_messages()
        .iter()
        .map(|m| {
            let mut ctx = SessionContext::default();
            ctx.merge(&classifier.classify(m));
            ctx
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(7);

    let mut group = c.benchmark_group("selector");
    group.bench_function("select_single", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let ctx = &contexts[idx % contexts.len()];
            idx += 1;
            selector.select(ctx.effective_category(), ctx, &mut rng)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_classify, bench_select);
criterion_main!(benches);
