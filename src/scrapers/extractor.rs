use tracing::debug;

use crate::browser::ItemHandle;
use crate::config::Selectors;
use crate::models::{MovieRow, UNKNOWN_RATING, UNKNOWN_YEAR};
use crate::parsers::{find_year, parse_heading, parse_rating, RankedTitle};

/// One place a release year may be found on a chart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSource {
    /// Text of every element matching each selector, selectors in priority order.
    Containers(Vec<String>),
    /// Attributes of the first element matching `selector`, in order.
    LinkAttributes { selector: String, attributes: Vec<String> },
    /// The entry's whole visible text.
    ItemText,
}

impl YearSource {
    /// Lookup failures count as "no year here".
    pub async fn find<H: ItemHandle>(&self, item: &H) -> Option<u16> {
        match self {
            YearSource::Containers(selectors) => {
                for selector in selectors {
                    match item.children_text(selector).await {
                        Ok(texts) => {
                            if let Some(year) = texts.iter().find_map(|text| find_year(text)) {
                                return Some(year);
                            }
                        }
                        Err(e) => debug!("Year container `{}` lookup failed: {}", selector, e),
                    }
                }
                None
            }
            YearSource::LinkAttributes { selector, attributes } => {
                for attribute in attributes {
                    match item.child_attribute(selector, attribute).await {
                        Ok(Some(value)) => {
                            if let Some(year) = find_year(&value) {
                                return Some(year);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => debug!("Title link `{}` lookup failed: {}", attribute, e),
                    }
                }
                None
            }
            YearSource::ItemText => match item.text().await {
                Ok(text) => find_year(&text),
                Err(e) => {
                    debug!("Item text lookup failed: {}", e);
                    None
                }
            },
        }
    }
}

/// Ordered year sources; the first one that yields a year wins.
#[derive(Debug, Clone)]
pub struct YearChain {
    sources: Vec<YearSource>,
}

impl YearChain {
    pub fn new(sources: Vec<YearSource>) -> Self {
        Self { sources }
    }

    pub fn from_selectors(selectors: &Selectors) -> Self {
        Self::new(vec![
            YearSource::Containers(selectors.year_containers.clone()),
            YearSource::LinkAttributes {
                selector: selectors.title_link.clone(),
                attributes: selectors.title_link_attributes.clone(),
            },
            YearSource::ItemText,
        ])
    }

    pub async fn resolve<H: ItemHandle>(&self, item: &H) -> u16 {
        for source in &self.sources {
            if let Some(year) = source.find(item).await {
                return year;
            }
        }
        UNKNOWN_YEAR
    }
}

/// Turns item handles into rows. Never fails: missing fields become sentinels.
pub struct Extractor<'a> {
    selectors: &'a Selectors,
    years: YearChain,
}

impl<'a> Extractor<'a> {
    pub fn new(selectors: &'a Selectors) -> Self {
        Self {
            selectors,
            years: YearChain::from_selectors(selectors),
        }
    }

    /// `position` is the 1-based index of `item` in the loaded list.
    pub async fn extract_row<H: ItemHandle>(&self, item: &H, position: u32) -> MovieRow {
        let heading = match item.child_text(&self.selectors.heading).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("Item {} has no heading", position);
                String::new()
            }
            Err(e) => {
                debug!("Item {} heading lookup failed: {}", position, e);
                String::new()
            }
        };
        let RankedTitle { rank, title } = parse_heading(&heading, position);

        let year = self.years.resolve(item).await;
        if year == UNKNOWN_YEAR {
            debug!("No year found for {:?}", title);
        }

        let rating = self.rating(item).await;

        MovieRow::new(rank, title, year, rating)
    }

    pub async fn extract_all<H: ItemHandle>(&self, items: &[H]) -> Vec<MovieRow> {
        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            rows.push(self.extract_row(item, position).await);
        }
        rows
    }

    async fn rating<H: ItemHandle>(&self, item: &H) -> f64 {
        match item.child_text(&self.selectors.rating).await {
            Ok(Some(text)) => parse_rating(&text),
            Ok(None) => UNKNOWN_RATING,
            Err(e) => {
                debug!("Rating lookup failed: {}", e);
                UNKNOWN_RATING
            }
        }
    }
}
