use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricerule::{
    apply_discount_stack, filter_eligible_discounts, resolve_membership_delta,
    CollectionDefinition, CustomerFacts, DiscountDefinition, Field, Operator, ProductFacts,
    RuleSet,
};

/// Build an ALL rule set with `n` conditions that all hold for `sample_product`.
fn build_rule_set(n: usize) -> RuleSet {
    let cycle = [
        (Field::Title, Operator::Contains, "shirt"),
        (Field::Price, Operator::GreaterThan, "10"),
        (Field::Tag, Operator::Equals, "summer"),
        (Field::Sku, Operator::StartsWith, "ls-"),
        (Field::Status, Operator::Equals, "active"),
    ];
    (0..n).fold(RuleSet::all(), |rules, i| {
        let (field, op, value) = cycle[i % cycle.len()];
        rules.condition(field, op, value)
    })
}

fn sample_product(id: usize, variants: usize) -> ProductFacts {
    let mut builder = ProductFacts::builder(format!("p-{id}"), "Linen Shirt")
        .price(40.0)
        .sku("LS-001")
        .tags(["summer", "linen", "sale"]);
    for v in 0..variants {
        builder = builder.variant(format!("v-{v}"), 35.0 + v as f64);
    }
    builder.build().unwrap()
}

fn build_catalog(n: usize) -> Vec<DiscountDefinition> {
    (0..n)
        .map(|i| {
            DiscountDefinition::percentage(format!("d-{i}"), format!("Promo {i}"), 5.0)
                .with_priority((i % 7) as u32)
        })
        .collect()
}

fn bench_rule_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_matching");

    for &n in &[5, 20, 50] {
        let rules = build_rule_set(n);
        let product = sample_product(0, 0);
        group.bench_function(&format!("{n}_conditions"), |b| {
            b.iter(|| rules.matches(black_box(&product)));
        });

        let with_variants = sample_product(0, 10);
        group.bench_function(&format!("{n}_conditions_10_variants"), |b| {
            b.iter(|| rules.matches(black_box(&with_variants)));
        });
    }

    group.finish();
}

fn bench_stacking(c: &mut Criterion) {
    let mut group = c.benchmark_group("stacking");
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let product = sample_product(0, 0);
    let customer = CustomerFacts::registered("c-1");

    for &n in &[5, 20, 100] {
        let catalog = build_catalog(n);
        group.bench_function(&format!("{n}_discounts"), |b| {
            b.iter(|| {
                let eligible = filter_eligible_discounts(
                    black_box(&catalog),
                    &product,
                    &customer,
                    now,
                    false,
                );
                apply_discount_stack(eligible, black_box(100.0))
            });
        });
    }

    group.finish();
}

fn bench_reindex(c: &mut Criterion) {
    let mut group = c.benchmark_group("reindex");
    let collection = CollectionDefinition::automatic("summer", "shop-1", build_rule_set(5));

    for &n in &[100, 1_000] {
        let products: Vec<ProductFacts> = (0..n).map(|i| sample_product(i, 2)).collect();
        group.bench_function(&format!("{n}_products"), |b| {
            b.iter(|| resolve_membership_delta(&collection, black_box(&products), &[]));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rule_matching, bench_stacking, bench_reindex);
criterion_main!(benches);
