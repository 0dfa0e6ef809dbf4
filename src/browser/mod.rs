use async_trait::async_trait;

use crate::error::ScrapeResult;

mod chrome;
mod snapshot;

pub use chrome::ChromeSession;
pub use snapshot::SnapshotPage;
#[cfg(test)]
pub use snapshot::SnapshotItem;

/// A running browser that can open pages and must be closed exactly once.
#[async_trait(?Send)]
pub trait BrowserSession: Sized {
    type Page: PageSession;

    /// Open a page and navigate it to `url`.
    async fn open(&self, url: &str) -> ScrapeResult<Self::Page>;

    /// Shut the browser down. Failures are logged, not returned.
    async fn close(self);
}

/// A loaded page the scraper can scroll and query.
///
/// Everything runs on one task, so the futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait PageSession {
    type Item: ItemHandle;

    /// Scroll so that lazily rendered entries start loading.
    async fn scroll_to_bottom(&self) -> ScrapeResult<()>;

    /// All elements currently matching `selector`, in document order.
    async fn find_items(&self, selector: &str) -> ScrapeResult<Vec<Self::Item>>;

    async fn count_items(&self, selector: &str) -> ScrapeResult<usize> {
        Ok(self.find_items(selector).await?.len())
    }

    /// True when the content can never change, so waiting for items is pointless.
    fn is_static(&self) -> bool {
        false
    }
}

/// One rendered list entry. Valid only while its page session is open.
#[async_trait(?Send)]
pub trait ItemHandle {
    /// Visible text of the first descendant matching `selector`.
    async fn child_text(&self, selector: &str) -> ScrapeResult<Option<String>>;

    /// Visible text of every descendant matching `selector`, in document order.
    async fn children_text(&self, selector: &str) -> ScrapeResult<Vec<String>>;

    /// Attribute `name` of the first descendant matching `selector`.
    async fn child_attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>>;

    /// Visible text of the whole entry.
    async fn text(&self) -> ScrapeResult<String>;
}
