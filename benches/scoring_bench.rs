use cipherforge::config::{EngineParams, InitStrategy};
use cipherforge::engine::Decryptor;
use cipherforge::model::LanguageModel;
use cipherforge::text::{default_pool, encrypt};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

const PLAIN: &str = "it was the best of times it was the worst of times it was the age of \
                     wisdom it was the age of foolishness it was the epoch of belief it was \
                     the epoch of incredulity it was the season of light it was the season of \
                     darkness it was the spring of hope it was the winter of despair";

fn setup_model() -> Arc<LanguageModel> {
    let alphabet: Vec<char> = " etaoinshrdlcumwfgypbvkjxqz".chars().collect();
    let n = alphabet.len();
    // Smooth pseudo-scores; only the cost of a lookup matters here.
    let model = LanguageModel::new(
        "bench",
        alphabet,
        (0..n * n).map(|i| -((i % 17) as f64) * 0.25 - 1.0).collect(),
    )
    .expect("Failed to build model");
    Arc::new(model)
}

fn setup_decryptor() -> Decryptor {
    let mut rng = fastrand::Rng::with_seed(1);
    let cipher = encrypt(PLAIN, &default_pool(), &mut rng).expect("Failed to encrypt");
    let mut decryptor = Decryptor::new(setup_model(), EngineParams::default(), Some(7));
    decryptor
        .start_from(&cipher, InitStrategy::Frequency)
        .expect("Failed to initialize");
    decryptor
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut decryptor = setup_decryptor();
    let mapping = decryptor.current_mapping().unwrap().clone();

    c.bench_function("compute_score (compressed transitions)", |b| {
        b.iter(|| decryptor.compute_score(black_box(&mapping)))
    });

    c.bench_function("metropolis_step", |b| {
        b.iter(|| decryptor.metropolis_step())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
