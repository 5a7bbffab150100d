//! Property-based checks of the analytics stages.

use proptest::prelude::*;
use stocklens::analytics::{
    distribution, extract, filter, Bucket, FilterSelection, MarginBucket, SellTimeBucket,
};
use stocklens::{Division, ProductRecord};

fn arb_record() -> impl Strategy<Value = ProductRecord> {
    (
        0usize..40,
        prop::bool::ANY,
        prop::sample::select(vec!["FILTROS", "FRENOS", "MOTOR"]),
        prop::sample::select(vec!["ACEITE", "AIRE", "DISCO"]),
        prop::sample::select(vec!["BOSCH", "MANN", "NGK"]),
        0.0f64..500.0,
        -50.0f64..80.0,
        -200.0f64..300.0,
        0u64..6,
    )
        .prop_map(
            |(id, warehouse, category, subcategory, brand, days, margin, profit, stock)| {
                ProductRecord {
                    code: format!("P{id}"),
                    name: format!("Producto {id}"),
                    division: if warehouse {
                        Division::Warehouse
                    } else {
                        Division::Workshop
                    },
                    category: category.to_string(),
                    subcategory: subcategory.to_string(),
                    brand: brand.to_string(),
                    avg_days_to_sell: days,
                    gross_margin_pct: margin,
                    avg_net_profit_per_unit: profit,
                    stock_on_hand: stock,
                    total_units_sold: 1,
                    stored_sell_time_label: None,
                    stored_margin_label: None,
                }
            },
        )
}

fn arb_records() -> impl Strategy<Value = Vec<ProductRecord>> {
    prop::collection::vec(arb_record(), 0..60)
}

proptest! {
    #[test]
    fn prop_classifiers_are_total_and_monotone(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(SellTimeBucket::classify(lo)? <= SellTimeBucket::classify(hi)?);
        prop_assert!(MarginBucket::classify(lo)? <= MarginBucket::classify(hi)?);
    }

    #[test]
    fn prop_filter_keeps_exactly_the_matching_records(
        records in arb_records(),
        brand in prop::sample::select(vec!["BOSCH", "MANN", "Todas"]),
        category in prop::sample::select(vec!["FILTROS", "MOTOR", "Todas"]),
    ) {
        let selection = FilterSelection::new().with_brand(brand).with_category(category);
        let subset = filter::apply(&records, Division::Warehouse, &selection);

        let expected = records
            .iter()
            .filter(|r| r.division == Division::Warehouse)
            .filter(|r| brand == "Todas" || r.brand == brand)
            .filter(|r| category == "Todas" || r.category == category)
            .count();
        prop_assert_eq!(subset.len(), expected);
    }

    #[test]
    fn prop_distribution_counts_cover_the_subset(records in arb_records()) {
        let subset: Vec<&ProductRecord> = records.iter().collect();
        let dist = distribution::build::<MarginBucket>(&subset)?;
        prop_assert_eq!(dist.rows.iter().map(|r| r.count).sum::<usize>(), subset.len());
        prop_assert_eq!(dist.rows.len(), MarginBucket::ALL.len());
    }

    #[test]
    fn prop_extracts_are_sorted_and_idempotent(records in arb_records()) {
        let subset: Vec<&ProductRecord> = records.iter().collect();

        let urgent = extract::urgent_with_stock(&subset)?;
        prop_assert!(urgent.windows(2).all(|w| w[0].avg_days_to_sell >= w[1].avg_days_to_sell));
        prop_assert!(urgent.iter().all(|r| r.stock_on_hand > 0 && r.avg_days_to_sell > 180.0));
        prop_assert_eq!(&urgent, &extract::urgent_with_stock(&subset)?);

        let losses = extract::loss_makers_with_stock(&subset)?;
        prop_assert!(losses
            .windows(2)
            .all(|w| w[0].avg_net_profit_per_unit <= w[1].avg_net_profit_per_unit));
        prop_assert!(losses.iter().all(|r| r.avg_net_profit_per_unit < 0.0));

        let stars = extract::near_stockout_stars(&subset)?;
        prop_assert!(stars.iter().all(|r| r.stock_on_hand < 2 && r.avg_days_to_sell <= 60.0));

        let slow = extract::top_slow_movers(&subset, 5);
        prop_assert!(slow.len() <= 5);
        prop_assert!(slow.iter().all(|r| r.stock_on_hand > 0));
    }
}
