use tracing::info;

use crate::browser::{BrowserSession, PageSession};
use crate::config::Config;
use crate::error::ScrapeResult;
use crate::models::MovieRow;

mod extractor;
mod loader;

use extractor::Extractor;
use loader::load_items;

/// Load every chart entry on `page` and turn each into a row, in page order.
pub async fn scrape_chart<P: PageSession>(page: &P, config: &Config) -> ScrapeResult<Vec<MovieRow>> {
    info!("Scraping chart at {}", config.url);

    let items = load_items(page, &config.selectors.item, &config.loader).await?;
    let extractor = Extractor::new(&config.selectors);
    Ok(extractor.extract_all(&items).await)
}

/// Open the chart in `session`, scrape it, then close the session whether or
/// not scraping succeeded.
pub async fn scrape_in_session<S: BrowserSession>(session: S, config: &Config) -> ScrapeResult<Vec<MovieRow>> {
    let result = async {
        let page = session.open(&config.url).await?;
        scrape_chart(&page, config).await
    }
    .await;

    session.close().await;
    result
}
