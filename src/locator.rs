use log::{debug, info, warn};
use scraper::{ElementRef, Html, Node, Selector};
use crate::error::{Result, ScrapeError};
use crate::matcher::Matcher;

const CLASS_SAMPLE_SIZE: usize = 10;

enum Strategy {
    Selector(Matcher),
    /// `div`s whose sole string mentions the keyword.
    SoleString { divs: Selector, keyword: String },
}

struct CardStrategy {
    name: &'static str,
    strategy: Strategy,
}

/// Cards found on a page and the strategy that found them.
#[derive(Debug)]
pub struct LocatedCards<'a> {
    pub strategy: Option<&'static str>,
    pub cards: Vec<ElementRef<'a>>,
}

impl<'a> LocatedCards<'a> {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

/// Finds the repeating job card structure on a results page.
pub struct CardLocator {
    strategies: Vec<CardStrategy>,
    classed_divs: Selector,
}

impl CardLocator {
    pub fn new(fallback_keyword: &str) -> Result<Self> {
        let divs = parse("div")?;
        let strategies = vec![
            CardStrategy {
                name: "slider_item",
                strategy: Strategy::Selector(Matcher::new(r#"div[data-testid="slider_item"]"#)?),
            },
            CardStrategy {
                name: "job_seen_beacon",
                strategy: Strategy::Selector(Matcher::new("div.job_seen_beacon")?),
            },
            CardStrategy {
                name: "resultContent",
                strategy: Strategy::Selector(Matcher::new("td.resultContent")?),
            },
            CardStrategy {
                name: "data-jk",
                strategy: Strategy::Selector(Matcher::new("div[data-jk]")?),
            },
            CardStrategy {
                name: "keyword",
                strategy: Strategy::SoleString {
                    divs,
                    keyword: fallback_keyword.to_lowercase(),
                },
            },
        ];

        Ok(CardLocator {
            strategies,
            classed_divs: parse("div[class]")?,
        })
    }

    /// Try each strategy in priority order; the first non-empty result wins.
    pub fn locate<'a>(&self, document: &'a Html) -> LocatedCards<'a> {
        let root = document.root_element();

        for (i, s) in self.strategies.iter().enumerate() {
            let cards = match &s.strategy {
                Strategy::Selector(m) => m.find_all(root),
                Strategy::SoleString { divs, keyword } => root
                    .select(divs)
                    .filter(|div| sole_string_contains(*div, keyword))
                    .collect(),
            };
            debug!("Method {} ({}): Found {} job cards", i + 1, s.name, cards.len());

            if !cards.is_empty() {
                info!("Found {} job cards using '{}'", cards.len(), s.name);
                return LocatedCards {
                    strategy: Some(s.name),
                    cards,
                };
            }
        }

        warn!("No job cards found with any method");
        let sample = self.class_sample(document);
        if sample.is_empty() {
            warn!("No classed div elements on page");
        } else {
            warn!("Available div classes on page: {}", sample.join(" | "));
        }

        LocatedCards {
            strategy: None,
            cards: Vec::new(),
        }
    }

    /// Class attributes of the first few classed `div`s. Diagnostic only.
    pub fn class_sample(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.classed_divs)
            .filter_map(|div| div.value().attr("class"))
            .map(|c| c.to_string())
            .take(CLASS_SAMPLE_SIZE)
            .collect()
    }
}

fn parse(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::parse(format!("invalid selector '{}': {:?}", css, e)))
}

fn sole_string_contains(element: ElementRef<'_>, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    sole_string(element).map_or(false, |text| text.to_lowercase().contains(keyword))
}

/// Text reached by following single-child links down from `element`.
/// `None` as soon as a node has zero or several children.
fn sole_string<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let mut node = *element;
    loop {
        let mut children = node.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match only.value() {
            Node::Text(text) => return Some(&**text),
            Node::Element(_) => node = only,
            _ => return None,
        }
    }
}
