use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wordscope::history::History;
use wordscope::wordplay::{rhymes_for, scramble};

fn bench_scramble(c: &mut Criterion) {
    const WORDS: &[&str] = &["dog", "luminous", "serendipity", "antidisestablishmentarianism"];
    let mut rng = SmallRng::seed_from_u64(42);
    for &word in WORDS {
        c.bench_with_input(BenchmarkId::new("scramble", word), &word, |b, &word| {
            b.iter(|| black_box(scramble(word, &mut rng)));
        });
    }
}

fn bench_rhymes(c: &mut Criterion) {
    const WORDS: &[&str] = &["action", "sound", "flow", "xyz"];
    for &word in WORDS {
        c.bench_with_input(BenchmarkId::new("rhymes_for", word), &word, |b, &word| {
            b.iter(|| black_box(rhymes_for(word)));
        });
    }
}

fn bench_history(c: &mut Criterion) {
    let words: Vec<String> = (0..64).map(|i| format!("word{i}")).collect();
    c.bench_function("history::record_full", |b| {
        b.iter(|| {
            let mut history = History::default();
            for word in &words {
                history.record(word);
            }
            black_box(history.len());
        });
    });
}

criterion_group!(benches, bench_scramble, bench_rhymes, bench_history);
criterion_main!(benches);
