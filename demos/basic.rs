use pricerule::{
    resolve_collection_membership, resolve_membership_delta, CollectionDefinition, Field,
    MembershipEntry, Operator, ProductFacts, RuleSet,
};

fn main() {
    // Two smart collections driven by product rules
    let collections = vec![
        CollectionDefinition::automatic(
            "summer-sale",
            "shop-1",
            RuleSet::all()
                .condition(Field::Tag, Operator::Equals, "summer")
                .condition(Field::Price, Operator::LessThan, "100"),
        ),
        CollectionDefinition::automatic(
            "premium",
            "shop-1",
            RuleSet::any()
                .condition(Field::Price, Operator::GreaterThan, "250")
                .condition(Field::Title, Operator::Contains, "leather"),
        ),
    ];

    for collection in &collections {
        if let Some(rules) = &collection.rules {
            println!("{}: {rules}", collection.id);
        }
    }

    let products = vec![
        ProductFacts::builder("p-1", "Linen Shirt")
            .price(45.0)
            .tags(["summer", "linen"])
            .build()
            .expect("valid product"),
        ProductFacts::builder("p-2", "Leather Belt")
            .price(60.0)
            .build()
            .expect("valid product"),
        ProductFacts::builder("p-3", "Canvas Sneaker")
            .price(0.0)
            .tag("summer")
            .variant("v-39", 80.0)
            .variant("v-44", 300.0)
            .build()
            .expect("valid product"),
    ];

    // Single-product preview, as a product editor would show it
    for product in &products {
        let ids = resolve_collection_membership(&collections, product);
        println!("{} -> {ids:?}", product.name());
    }

    // Full reindex of one collection against its current members
    let current = [MembershipEntry::new("p-2", 0), MembershipEntry::new("p-9", 1)];
    let delta = resolve_membership_delta(&collections[0], &products, &current);
    println!(
        "summer-sale reindex: +{} -{} {:?}",
        delta.added(),
        delta.removed(),
        delta
    );

    // Why did the sneaker land in premium?
    let report = collections[1]
        .rules
        .as_ref()
        .map(|rules| rules.evaluate_detailed(&products[2]));
    if let Some(report) = report {
        println!("{report}");
    }
}
