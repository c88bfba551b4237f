use super::{element_text, first_match, Page, PageStrategy};
use crate::record::Field;

const STRATEGIES: &[PageStrategy] = &[("title_heading", title_heading)];

pub fn extract(page: &Page<'_>) -> Field {
    first_match("product_name", STRATEGIES, page)
}

pub fn title_heading(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(&page.selectors.product_name)
        .next()
        .map(element_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{default_selectors, fixture};
    use scraper::Html;

    fn run(html: &str) -> Field {
        let doc = Html::parse_document(html);
        let selectors = default_selectors();
        extract(&Page {
            doc: &doc,
            selectors: &selectors,
        })
    }

    #[test]
    fn heading_text_is_trimmed() {
        let html = r#"<h1 class="vtex-store-components-3-x-productNameContainer mv0">
            <span class="brand">  Dipirona 500mg 10 comprimidos </span>
        </h1>"#;
        assert_eq!(run(html), Field::Found("Dipirona 500mg 10 comprimidos".into()));
    }

    #[test]
    fn other_headings_are_ignored() {
        let html = r#"<h1 class="page-title">Ofertas</h1><h2 class="vtex-store-components-3-x-productNameContainer">x</h2>"#;
        assert_eq!(run(html), Field::NotFound);
    }

    #[test]
    fn empty_heading_is_not_found() {
        let html = r#"<h1 class="vtex-store-components-3-x-productNameContainer">   </h1>"#;
        assert_eq!(run(html), Field::NotFound);
    }

    #[test]
    fn legacy_page_has_no_title_marker() {
        assert_eq!(run(&fixture("legacy_markup")), Field::NotFound);
    }
}
