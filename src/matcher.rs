use scraper::{ElementRef, Selector};
use crate::error::{Result, ScrapeError};

/// One structural pattern (tag + attribute/class constraints) compiled to a
/// CSS selector. Matchers only look at descendants of the scope they are given.
#[derive(Debug, Clone)]
pub struct Matcher {
    css: &'static str,
    selector: Selector,
}

impl Matcher {
    pub fn new(css: &'static str) -> Result<Self> {
        let selector = Selector::parse(css)
            .map_err(|e| ScrapeError::parse(format!("invalid selector '{}': {:?}", css, e)))?;
        Ok(Matcher { css, selector })
    }

    pub fn css(&self) -> &'static str {
        self.css
    }

    /// First matching element in document order.
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).next()
    }

    pub fn find_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        scope.select(&self.selector).collect()
    }

    /// Text of the first matching element, if it has any.
    pub fn text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.find(scope).and_then(element_text)
    }
}

/// Compile a list of selectors into an ordered chain.
pub fn chain(css: &[&'static str]) -> Result<Vec<Matcher>> {
    css.iter().map(|c| Matcher::new(c)).collect()
}

/// First-match-wins over an ordered chain. Returns the text together with the
/// selector that produced it.
pub fn first_text(chain: &[Matcher], scope: ElementRef<'_>) -> Option<(String, &'static str)> {
    chain
        .iter()
        .find_map(|m| m.text(scope).map(|text| (text, m.css())))
}

/// Visible text of an element: text nodes trimmed, empty pieces dropped,
/// joined by single spaces. `None` when nothing is left.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn rejects_bad_selector() {
        assert!(matches!(Matcher::new("div[["), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn text_is_whitespace_normalised() {
        let html = Html::parse_fragment("<div><span class='x'>\n  Acme <b>Corp</b>  \n</span></div>");
        let m = Matcher::new("span.x").unwrap();
        assert_eq!(m.text(html.root_element()).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn first_text_skips_empty_and_missing() {
        let html = Html::parse_fragment(
            "<div><span class='empty'>   </span><span class='second'>Found</span><span class='third'>Later</span></div>",
        );
        let chain = chain(&["span.missing", "span.empty", "span.second", "span.third"]).unwrap();
        let (text, css) = first_text(&chain, html.root_element()).unwrap();
        assert_eq!(text, "Found");
        assert_eq!(css, "span.second");
    }

    #[test]
    fn class_matching_is_token_based() {
        let html = Html::parse_fragment("<div><div class='summary extra'>Hello</div></div>");
        let m = Matcher::new("div.summary").unwrap();
        assert_eq!(m.text(html.root_element()).as_deref(), Some("Hello"));
    }
}
