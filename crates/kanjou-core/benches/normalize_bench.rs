use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kanjou_core::Normalizer;

fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::new().unwrap();

    let inputs = vec![
        "@user OMG #ILoveYou soooo much!!! https://t.co/abc123 :) <3",
        "I am SO ANGRY right now... #ALLCAPS #NeverAgain",
        "check www.example.com/page?id=42 for 1,234.56 reasons :p",
        "either/or d-: what??! 10:30 tomorrow",
        "plain tweet with nothing special in it at all",
    ];

    c.bench_function("normalize_single", |b| {
        b.iter(|| normalizer.normalize(black_box(inputs[0])));
    });

    c.bench_function("normalize_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = normalizer.normalize(black_box(input));
            }
        });
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
