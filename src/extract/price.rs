use tracing::debug;

use super::{element_text, first_match, Page, PageStrategy};
use crate::record::Field;

// Older single-element markup, consulted only when the current price container is absent.
const FALLBACK: &[PageStrategy] = &[("selling_price", selling_price)];

/// Outcome of looking up the current price markup.
#[derive(Debug, PartialEq, Eq)]
pub enum SplitPrice {
    Absent,
    Incomplete,
    Found(String),
}

pub fn extract(page: &Page<'_>) -> Field {
    match split_currency(page) {
        SplitPrice::Found(price) => {
            debug!(field = "price", strategy = "split_currency", "matched");
            Field::Found(price)
        }
        SplitPrice::Incomplete => {
            debug!(field = "price", "price container without integer/fraction parts");
            Field::NotFound
        }
        SplitPrice::Absent => first_match("price", FALLBACK, page),
    }
}

/// Price container holding separate integer and fraction elements,
/// rendered as `R$ 1.299,90`.
pub fn split_currency(page: &Page<'_>) -> SplitPrice {
    let s = page.selectors;
    let Some(container) = page.doc.select(&s.price_container).next() else {
        return SplitPrice::Absent;
    };
    let integer = container.select(&s.price_integer).next().map(element_text);
    let fraction = container.select(&s.price_fraction).next().map(element_text);
    match (integer, fraction) {
        (Some(i), Some(f)) if !i.is_empty() && !f.is_empty() => {
            SplitPrice::Found(format!("{} {},{}", s.currency_prefix, i, f))
        }
        _ => SplitPrice::Incomplete,
    }
}

/// Single element with the already formatted price.
pub fn selling_price(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(&page.selectors.selling_price)
        .next()
        .map(element_text)
}
