use criterion::{criterion_group, criterion_main, Criterion};
use recipe_core::normalize::Normalizer;

const SAMPLE: &str = "Chicken tagine with preserved lemons and olives. \
Ingredients: 1 whole chicken, 2 preserved lemons, 150g green olives, \
3 onions, 4 cloves of garlic, a pinch of saffron, 2 tsp ground ginger, \
fresh cilantro and parsley. Brown the chicken pieces in olive oil, add the \
sliced onions and garlic and cook until softened, then add the spices and \
simmer covered for forty-five minutes before adding the olives and lemon.";

fn bench_tokenize(c: &mut Criterion) {
    let normalizer = Normalizer::for_indexing();
    c.bench_function("tokenize_recipe", |b| b.iter(|| normalizer.tokenize(SAMPLE)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
