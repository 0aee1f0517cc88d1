use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use pricerule::{
    quote_price, CustomerFacts, DiscountDefinition, DiscountTarget, Field, Operator,
    ProductFacts, RuleSet,
};

#[test]
fn quote_across_threads() {
    let catalog = Arc::new(vec![
        DiscountDefinition::percentage("site", "Sitewide 10%", 10.0).with_priority(1),
        DiscountDefinition::fixed("members", "Members 5 off", 5.0)
            .with_priority(5)
            .for_registered_customers(),
        DiscountDefinition::percentage("shoes", "Shoes 50%", 50.0)
            .with_priority(10)
            .exclusive()
            .targeting(DiscountTarget::SpecificCategories, ["shoes"]),
    ]);
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap();

    let cases = vec![
        // guest, plain product -> sitewide only
        (("p-1", 100.0, None), CustomerFacts::guest(), 90.0),
        // member -> 5 off then 10%
        (("p-1", 100.0, None), CustomerFacts::registered("c-1"), 85.5),
        // shoes -> exclusive half off wins and stops the chain
        (("p-2", 100.0, Some("shoes")), CustomerFacts::registered("c-2"), 50.0),
        // free product -> nothing applies
        (("p-3", 0.0, None), CustomerFacts::guest(), 0.0),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|((id, price, category), customer, expected)| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let mut builder = ProductFacts::builder(id, "Item").price(price);
                if let Some(category) = category {
                    builder = builder.category(category);
                }
                let product = builder.build().unwrap();
                let quote = quote_price(&catalog, &product, &customer, None, now, false);
                (quote.final_price, expected)
            })
        })
        .collect();

    for handle in handles {
        let (actual, expected) = handle.join().unwrap();
        assert_eq!(actual, expected);
    }
}

#[test]
fn rule_sets_shared_across_threads() {
    let rules = Arc::new(
        RuleSet::all()
            .condition(Field::Tag, Operator::Equals, "sale")
            .condition(Field::Price, Operator::LessThan, "50"),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let product = ProductFacts::builder(format!("p-{i}"), "Item")
                    .price(f64::from(i) * 10.0)
                    .tag("sale")
                    .build()
                    .unwrap();
                rules.matches(&product)
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [true, true, true, true, true, false, false, false]);
}
