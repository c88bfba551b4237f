pub mod barcode;
pub mod name;
pub mod price;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::record::{Field, Record};
use crate::settings::SelectorSettings;

/// A named extraction attempt. Strategies for a field run in order; the first
/// non-empty value wins.
pub type Strategy<I> = (&'static str, fn(&I) -> Option<String>);

/// Strategy over a parsed page, for any page lifetime.
pub type PageStrategy = (&'static str, fn(&Page<'_>) -> Option<String>);

#[derive(Debug, Error)]
#[error("invalid {field} selector {selector:?}: {message}")]
pub struct SelectorError {
    pub field: &'static str,
    pub selector: String,
    pub message: String,
}

/// Selectors compiled once from configuration.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub product_name: Selector,
    pub price_container: Selector,
    pub price_integer: Selector,
    pub price_fraction: Selector,
    pub selling_price: Selector,
    pub currency_prefix: String,
}

impl Selectors {
    pub fn compile(s: &SelectorSettings) -> Result<Self, SelectorError> {
        Ok(Selectors {
            product_name: compile_one("product_name", &s.product_name)?,
            price_container: compile_one("price_container", &s.price_container)?,
            price_integer: compile_one("price_integer", &s.price_integer)?,
            price_fraction: compile_one("price_fraction", &s.price_fraction)?,
            selling_price: compile_one("selling_price", &s.selling_price)?,
            currency_prefix: s.currency_prefix.clone(),
        })
    }
}

fn compile_one(field: &'static str, selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A parsed page together with the selectors to query it with.
pub struct Page<'a> {
    pub doc: &'a Html,
    pub selectors: &'a Selectors,
}

pub fn first_match<I, F>(field: &str, strategies: &[(&'static str, F)], input: &I) -> Field
where
    I: ?Sized,
    F: Fn(&I) -> Option<String>,
{
    for (name, strategy) in strategies {
        if let Some(value) = strategy(input).filter(|v| !v.trim().is_empty()) {
            debug!(field, strategy = name, "matched");
            return Field::Found(value);
        }
    }
    debug!(field, "no strategy matched");
    Field::NotFound
}

/// Trimmed concatenation of every text node under `el`.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub struct Extractor {
    selectors: Selectors,
}

impl Extractor {
    pub fn new(selectors: Selectors) -> Self {
        Extractor { selectors }
    }

    /// Parses `html` once and runs all three field extractors over it.
    pub fn extract(&self, url: &str, html: &str) -> Record {
        let doc = Html::parse_document(html);
        let page = Page {
            doc: &doc,
            selectors: &self.selectors,
        };

        Record {
            url: url.to_string(),
            product_name: name::extract(&page),
            price: price::extract(&page),
            barcode: barcode::extract(html),
        }
    }
}

#[cfg(test)]
pub(crate) fn default_selectors() -> Selectors {
    Selectors::compile(&SelectorSettings::default()).unwrap()
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &str) -> Option<String> {
        Some("first".to_string())
    }

    fn never(_: &str) -> Option<String> {
        None
    }

    fn blank(_: &str) -> Option<String> {
        Some("   ".to_string())
    }

    #[test]
    fn first_non_empty_strategy_wins() {
        let strategies: &[Strategy<str>] = &[("never", never), ("blank", blank), ("always", always)];
        assert_eq!(first_match("t", strategies, "x"), Field::Found("first".into()));
    }

    #[test]
    fn no_strategy_means_not_found() {
        let strategies: &[Strategy<str>] = &[("never", never), ("blank", blank)];
        assert_eq!(first_match("t", strategies, "x"), Field::NotFound);
    }

    #[test]
    fn default_selectors_compile() {
        default_selectors();
    }

    #[test]
    fn bad_selector_is_reported_with_its_field() {
        let settings = SelectorSettings {
            selling_price: "div[".to_string(),
            ..SelectorSettings::default()
        };
        let err = Selectors::compile(&settings).unwrap_err();
        assert_eq!(err.field, "selling_price");
        assert_eq!(err.selector, "div[");
    }

    #[test]
    fn current_markup_page() {
        let ex = Extractor::new(default_selectors());
        let r = ex.extract("https://shop.example/nb1100", &fixture("current_markup"));
        assert_eq!(r.url, "https://shop.example/nb1100");
        assert_eq!(
            r.product_name,
            Field::Found("Inalador Nebulizador Pague Menos Portátil Ultrassônico Mesh NB1100".into())
        );
        assert_eq!(r.price, Field::Found("R$ 189,90".into()));
        assert_eq!(r.barcode, Field::Found("7898962350421".into()));
    }

    #[test]
    fn legacy_markup_page() {
        let ex = Extractor::new(default_selectors());
        let r = ex.extract("https://shop.example/legacy", &fixture("legacy_markup"));
        assert_eq!(r.product_name, Field::NotFound);
        assert_eq!(r.price, Field::Found("R$ 24,99".into()));
        assert_eq!(r.barcode, Field::Found("789123456789".into()));
    }

    #[test]
    fn page_without_markers_yields_not_found() {
        let ex = Extractor::new(default_selectors());
        let r = ex.extract("u", "<html><body><p>nothing here</p></body></html>");
        assert_eq!(r.product_name, Field::NotFound);
        assert_eq!(r.price, Field::NotFound);
        assert_eq!(r.barcode, Field::NotFound);
    }
}
