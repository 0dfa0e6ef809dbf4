use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::browser::PageSession;
use crate::config::LoaderSettings;
use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::poll::{StabilizingPoll, StopReason};

/// Block until at least one `selector` match is present.
///
/// Returns the first non-zero count, or [`ScrapeError::LoadTimeout`] once the
/// configured wait runs out. A static page with no matches fails at once.
pub async fn wait_for_items<P: PageSession>(
    page: &P,
    selector: &str,
    settings: &LoaderSettings,
) -> ScrapeResult<usize> {
    let limit = settings.wait_timeout();
    let timed_out = || ScrapeError::LoadTimeout {
        selector: selector.to_string(),
        timeout: limit,
    };
    let wait = async {
        loop {
            let count = page.count_items(selector).await?;
            if count > 0 {
                return Ok::<usize, ScrapeError>(count);
            }
            if page.is_static() {
                warn!("Static page has no `{}` items, not waiting", selector);
                return Err(timed_out());
            }
            sleep(settings.wait_poll()).await;
        }
    };

    match timeout(limit, wait).await {
        Ok(result) => result,
        Err(_) => Err(timed_out()),
    }
}

/// Wait for the first batch, then scroll until no new items render.
pub async fn load_items<P: PageSession>(
    page: &P,
    selector: &str,
    settings: &LoaderSettings,
) -> ScrapeResult<Vec<P::Item>> {
    let initial = wait_for_items(page, selector, settings).await?;
    info!("First batch rendered with {} items", initial);

    let poll = StabilizingPoll {
        interval: settings.scroll_delay(),
        cap: settings.item_cap,
        max_iterations: settings.max_scroll_iterations,
    };
    let outcome = poll
        .run(|| page.scroll_to_bottom(), || page.count_items(selector))
        .await?;

    match outcome.stop {
        StopReason::IterationLimit => warn!(
            "Item count still growing after {} scrolls, continuing with {} items",
            outcome.iterations, outcome.value
        ),
        StopReason::CapReached => info!("Reached the {} item cap", settings.item_cap),
        StopReason::Stable => {}
    }

    let items = page.find_items(selector).await?;
    info!("Found {} items after scrolling", items.len());
    Ok(items)
}
