//! Product pre-fill from the page's query string.
//!
//! Product pages link to the customizer as `?name=...&price=...&image=...`.
//! The browser binding hands the decoded `URLSearchParams` pairs to
//! [`Prefill::from_query_pairs`]; nothing here touches the DOM.

#[cfg(test)]
#[path = "prefill_test.rs"]
mod prefill_test;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub image: String,
}

impl Prefill {
    /// Read `name`, `price` and `image` from decoded query pairs.
    ///
    /// The first occurrence of each key wins. `price` is `None` when absent,
    /// empty, or not a finite number.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut name = None;
        let mut price = None;
        let mut image = None;
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "name" if name.is_none() => name = Some(value.to_owned()),
                "price" if price.is_none() => price = Some(value.to_owned()),
                "image" if image.is_none() => image = Some(value.to_owned()),
                _ => {}
            }
        }
        Self {
            name: name.unwrap_or_default(),
            price: price.as_deref().and_then(parse_price),
            image: image.unwrap_or_default(),
        }
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Some(price),
        _ => None,
    }
}
