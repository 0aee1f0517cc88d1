use chrono::{Duration, Utc};
use pricerule::{
    apply_discount_stack, filter_eligible_discounts, quote_price, CustomerFacts,
    DiscountDefinition, DiscountTarget, EngineConfig, ProductFacts,
};

const CONFIG: &str = r#"
[tiers.gold]
early_access = true

[tiers.silver]
early_access = false
"#;

fn main() {
    let config = EngineConfig::from_toml(CONFIG).expect("failed to parse config");
    let now = Utc::now();

    let catalog = vec![
        DiscountDefinition::percentage("summer", "Summer 20%", 20.0).with_priority(10),
        DiscountDefinition::percentage("loyalty", "Loyalty 10%", 10.0)
            .with_priority(5)
            .for_registered_customers(),
        DiscountDefinition::fixed("shoes", "5 off shoes", 5.0)
            .targeting(DiscountTarget::SpecificCategories, ["shoes"]),
        DiscountDefinition::percentage("clearance", "Clearance 60%", 60.0)
            .with_priority(20)
            .with_max_discount(30.0)
            .exclusive()
            .with_window(Some(now + Duration::days(2)), None),
    ];

    let sneaker = ProductFacts::builder("p-1", "Canvas Sneaker")
        .price(100.0)
        .category("shoes")
        .variant("v-44", 120.0)
        .build()
        .expect("valid product");

    let guest = CustomerFacts::guest();
    let gold = CustomerFacts::registered("c-1").with_tier("gold");

    // Step by step: eligibility then stacking
    let eligible = filter_eligible_discounts(&catalog, &sneaker, &guest, now, false);
    let stack = apply_discount_stack(eligible, sneaker.price());
    println!("guest:  {stack}");

    // Gold members see the upcoming clearance early; it is exclusive
    let quote = quote_price(
        &catalog,
        &sneaker,
        &gold,
        Some("v-44"),
        now,
        config.early_access_for(&gold),
    );
    println!(
        "gold:   {} -> {} (saved {})",
        quote.base_price,
        quote.final_price,
        quote.total_savings()
    );
    for step in &quote.applied {
        println!("  {} {} -> {}", step.title, step.original_price, step.discounted_price);
    }
}
