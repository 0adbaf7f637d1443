use axum_ecommerce_dashboard::services::ranking::{top_categories, value_counts};
use polars::prelude::*;

fn categorized(categories: &[Option<&str>]) -> DataFrame {
    df!("product_category_name" => categories.to_vec()).unwrap()
}

#[test]
fn returns_at_most_n_most_frequent() {
    let items = categorized(&[
        Some("a"),
        Some("b"),
        Some("b"),
        Some("c"),
        Some("c"),
        Some("c"),
        Some("d"),
        Some("e"),
        Some("f"),
        Some("f"),
    ]);

    let top = top_categories(&items, 5).unwrap();

    assert_eq!(top.len(), 5);
    assert_eq!(&top[..3], ["c", "b", "f"]);
    // a, d, e tie on one; first seen wins
    assert_eq!(&top[3..], ["a", "d"]);
}

#[test]
fn every_returned_category_outranks_the_rest() {
    let items = categorized(&[
        Some("x"),
        Some("y"),
        Some("y"),
        Some("z"),
        Some("z"),
        Some("z"),
        Some("w"),
    ]);

    let top = top_categories(&items, 2).unwrap();
    let counts = value_counts(items.clone().lazy(), "product_category_name").unwrap();
    let count_of = |name: &str| counts.iter().find(|(c, _)| c == name).map(|(_, n)| *n).unwrap();

    let weakest_kept = top.iter().map(|c| count_of(c.as_str())).min().unwrap();
    let strongest_dropped = counts
        .iter()
        .filter(|(c, _)| !top.contains(c))
        .map(|(_, n)| *n)
        .max()
        .unwrap();
    assert!(weakest_kept >= strongest_dropped);
}

#[test]
fn ignores_missing_categories_and_returns_all_when_fewer_than_n() {
    let items = categorized(&[None, Some("toys"), None, None, Some("books"), Some("toys")]);

    assert_eq!(top_categories(&items, 5).unwrap(), ["toys", "books"]);
    assert!(top_categories(&categorized(&[None, None]), 5).unwrap().is_empty());
}

#[test]
fn value_counts_orders_ties_by_first_appearance() {
    let payments = df!(
        "payment_type" => ["boleto", "voucher", "credit_card", "voucher", "boleto", "debit_card"]
    )
    .unwrap();

    let counts = value_counts(payments.lazy(), "payment_type").unwrap();

    assert_eq!(
        counts,
        vec![
            ("boleto".to_string(), 2),
            ("voucher".to_string(), 2),
            ("credit_card".to_string(), 1),
            ("debit_card".to_string(), 1),
        ]
    );
}

#[test]
fn value_counts_tie_order_survives_many_groups() {
    // enough distinct labels that an unstable group-by would shuffle them
    let labels: Vec<String> = (0..200).rev().map(|i| format!("city_{i:03}")).collect();
    let cities = df!("customer_city" => labels.clone()).unwrap();

    let counts = value_counts(cities.lazy(), "customer_city").unwrap();

    let seen: Vec<String> = counts.into_iter().map(|(label, _)| label).collect();
    assert_eq!(seen, labels);
}
