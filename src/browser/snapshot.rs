use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

use crate::browser::{ItemHandle, PageSession};
use crate::error::{ScrapeError, ScrapeResult};
use crate::parsers::collapse_whitespace;

/// A saved copy of the chart page, parsed with `scraper`.
///
/// Scrolling is a no-op, so the loader sees the same count twice and stops,
/// and a snapshot without items fails immediately instead of waiting.
pub struct SnapshotPage {
    html: String,
}

impl SnapshotPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file(path: &Path) -> ScrapeResult<Self> {
        let html = std::fs::read_to_string(path).map_err(|source| ScrapeError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(html))
    }
}

#[async_trait(?Send)]
impl PageSession for SnapshotPage {
    type Item = SnapshotItem;

    async fn scroll_to_bottom(&self) -> ScrapeResult<()> {
        Ok(())
    }

    fn is_static(&self) -> bool {
        true
    }

    async fn find_items(&self, selector: &str) -> ScrapeResult<Vec<SnapshotItem>> {
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        Ok(document
            .select(&selector)
            .map(|element| SnapshotItem::new(element.html()))
            .collect())
    }
}

/// One list entry cut out of a snapshot as an HTML fragment.
#[derive(Debug, Clone)]
pub struct SnapshotItem {
    html: String,
}

impl SnapshotItem {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

#[async_trait(?Send)]
impl ItemHandle for SnapshotItem {
    async fn child_text(&self, selector: &str) -> ScrapeResult<Option<String>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let text = fragment.select(&selector).next().map(element_text);
        Ok(text)
    }

    async fn children_text(&self, selector: &str) -> ScrapeResult<Vec<String>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let texts = fragment.select(&selector).map(element_text).collect();
        Ok(texts)
    }

    async fn child_attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.html);
        let value = fragment
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(name))
            .map(str::to_string);
        Ok(value)
    }

    async fn text(&self) -> ScrapeResult<String> {
        let fragment = Html::parse_fragment(&self.html);
        let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
        Ok(collapse_whitespace(&text))
    }
}

fn parse_selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
        <ul class="ipc-metadata-list">
          <li class="ipc-metadata-list-summary-item"><h3>1. The Shawshank Redemption</h3></li>
          <li class="ipc-metadata-list-summary-item"><h3>2. The Godfather</h3></li>
        </ul>
        <li class="ipc-metadata-list-summary-item"><h3>outside the list</h3></li>
        </body></html>
    "#;

    #[tokio::test]
    async fn finds_items_in_document_order() {
        let page = SnapshotPage::new(PAGE);
        let items = page
            .find_items("ul.ipc-metadata-list li.ipc-metadata-list-summary-item")
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1].child_text("h3").await.unwrap(),
            Some("2. The Godfather".to_string())
        );
    }

    #[tokio::test]
    async fn missing_child_is_none_not_error() {
        let item = SnapshotItem::new(r#"<li><h3>Heat</h3></li>"#);
        assert_eq!(item.child_text("span.rating").await.unwrap(), None);
        assert_eq!(item.child_attribute("a", "title").await.unwrap(), None);
        assert!(item.children_text("span").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_attributes_and_whole_text() {
        let item = SnapshotItem::new(
            r#"<li><a class="ipc-title-link-wrapper" aria-label="Heat (1995)"><h3>Heat</h3></a><span>2h 50m</span></li>"#,
        );
        assert_eq!(
            item.child_attribute("a.ipc-title-link-wrapper", "aria-label").await.unwrap(),
            Some("Heat (1995)".to_string())
        );
        assert_eq!(item.text().await.unwrap(), "Heat 2h 50m");
    }

    #[tokio::test]
    async fn invalid_selector_is_an_error() {
        let page = SnapshotPage::new(PAGE);
        assert!(matches!(page.find_items("li[").await, Err(ScrapeError::Selector(_))));
    }

    #[tokio::test]
    async fn escaped_entities_are_decoded_once() {
        let item = SnapshotItem::new(r#"<li><h3>1. Tom &amp;amp; Jerry</h3><p>Tom &amp; Jerry</p></li>"#);
        assert_eq!(
            item.child_text("h3").await.unwrap(),
            Some("1. Tom &amp; Jerry".to_string())
        );
        assert_eq!(item.text().await.unwrap(), "1. Tom &amp; Jerry Tom & Jerry");
    }

    #[test]
    fn missing_snapshot_file_reports_path() {
        let err = SnapshotPage::from_file(Path::new("/nonexistent/chart.html"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/chart.html"));
    }
}
