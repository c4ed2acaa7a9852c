#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn reads_all_three_fields() {
    let prefill =
        Prefill::from_query_pairs([("name", "Camiseta Básica"), ("price", "19.95"), ("image", "/img/tee.png")]);
    assert_eq!(prefill.name, "Camiseta Básica");
    assert_eq!(prefill.price, Some(19.95));
    assert_eq!(prefill.image, "/img/tee.png");
}

#[test]
fn missing_fields_default_to_empty() {
    let prefill = Prefill::from_query_pairs(Vec::<(String, String)>::new());
    assert_eq!(prefill, Prefill::default());
}

#[test]
fn unparseable_or_empty_price_is_none() {
    assert_eq!(Prefill::from_query_pairs([("price", "gratis")]).price, None);
    assert_eq!(Prefill::from_query_pairs([("price", "")]).price, None);
    assert_eq!(Prefill::from_query_pairs([("price", "NaN")]).price, None);
}

#[test]
fn first_occurrence_wins() {
    let prefill = Prefill::from_query_pairs([("name", "first"), ("name", "second")]);
    assert_eq!(prefill.name, "first");
}

#[test]
fn unrelated_keys_are_ignored() {
    let prefill = Prefill::from_query_pairs([("utm_source", "mail"), ("name", "Gorra")]);
    assert_eq!(prefill.name, "Gorra");
    assert_eq!(prefill.price, None);
}

#[test]
fn serializes_without_absent_price() {
    let prefill = Prefill { name: "Gorra".to_owned(), price: None, image: String::new() };
    assert_eq!(
        serde_json::to_value(&prefill).unwrap(),
        serde_json::json!({"name": "Gorra", "image": ""})
    );
}
