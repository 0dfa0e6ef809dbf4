use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::browser::{BrowserSession, ItemHandle, PageSession};
use crate::config::BrowserSettings;
use crate::error::{ScrapeError, ScrapeResult};

const SCROLL_SCRIPT: &str = "window.scrollBy(0, document.body.scrollHeight);";
const MAX_HANDLER_ERRORS: usize = 10;

/// The one browser process a run owns.
///
/// Call [`BrowserSession::close`] on every exit path; dropping the session only
/// kills the child process without a graceful shutdown.
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    pub async fn launch(settings: &BrowserSettings) -> ScrapeResult<Self> {
        let config = build_browser_config(settings)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        // chromiumoxide needs its CDP event stream polled for any page call to make progress.
        let handler_task = tokio::spawn(async move {
            let mut error_count = 0;
            while let Some(event) = handler.next().await {
                match event {
                    Ok(()) => error_count = 0,
                    Err(e) => {
                        error_count += 1;
                        debug!("Browser handler error ({}/{}): {:?}", error_count, MAX_HANDLER_ERRORS, e);
                        if error_count >= MAX_HANDLER_ERRORS {
                            error!("Browser handler saw {} consecutive errors, stopping", error_count);
                            break;
                        }
                    }
                }
            }
        });

        info!("Browser launched");
        Ok(Self { browser, handler_task })
    }
}

#[async_trait(?Send)]
impl BrowserSession for ChromeSession {
    type Page = ChromePage;

    /// Open a fresh tab and navigate it to `url`, waiting for the load event.
    async fn open(&self, url: &str) -> ScrapeResult<ChromePage> {
        let page = self.browser.new_page("about:blank").await?;
        info!("Navigating to {}", url);
        page.goto(url).await?;
        Ok(ChromePage { page })
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser process: {}", e);
        }
        self.handler_task.abort();
        info!("Browser closed");
    }
}

fn build_browser_config(settings: &BrowserSettings) -> ScrapeResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .request_timeout(Duration::from_secs(settings.request_timeout_secs));

    if let Some(path) = &settings.chrome_executable {
        builder = builder.chrome_executable(path);
    }
    if settings.no_sandbox {
        builder = builder.arg("--no-sandbox");
    }
    if settings.disable_gpu {
        builder = builder.arg("--disable-gpu");
    }

    builder.build().map_err(ScrapeError::BrowserConfig)
}

pub struct ChromePage {
    page: Page,
}

#[async_trait(?Send)]
impl PageSession for ChromePage {
    type Item = ChromeItem;

    async fn scroll_to_bottom(&self) -> ScrapeResult<()> {
        self.page.evaluate(SCROLL_SCRIPT).await?;
        Ok(())
    }

    async fn find_items(&self, selector: &str) -> ScrapeResult<Vec<ChromeItem>> {
        let elements = self.page.find_elements(selector).await?;
        Ok(elements.into_iter().map(|element| ChromeItem { element }).collect())
    }
}

pub struct ChromeItem {
    element: Element,
}

#[async_trait(?Send)]
impl ItemHandle for ChromeItem {
    async fn child_text(&self, selector: &str) -> ScrapeResult<Option<String>> {
        match self.element.find_elements(selector).await?.first() {
            Some(child) => Ok(child.inner_text().await?.map(|text| text.trim().to_string())),
            None => Ok(None),
        }
    }

    async fn children_text(&self, selector: &str) -> ScrapeResult<Vec<String>> {
        let mut texts = Vec::new();
        for child in self.element.find_elements(selector).await? {
            if let Some(text) = child.inner_text().await? {
                texts.push(text);
            }
        }
        Ok(texts)
    }

    async fn child_attribute(&self, selector: &str, name: &str) -> ScrapeResult<Option<String>> {
        match self.element.find_elements(selector).await?.first() {
            Some(child) => Ok(child.attribute(name).await?),
            None => Ok(None),
        }
    }

    async fn text(&self) -> ScrapeResult<String> {
        Ok(self.element.inner_text().await?.unwrap_or_default())
    }
}
