use anyhow::{bail, Context, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// File stem searched in the working directory (`imdb_scraper.toml`, `.yaml`, `.json`).
const CONFIG_FILE: &str = "imdb_scraper";
/// Environment prefix, e.g. `IMDB_SCRAPER__LOADER__SCROLL_DELAY_MS=2000`.
const ENV_PREFIX: &str = "IMDB_SCRAPER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub url: String,
    pub output_path: PathBuf,
    /// Extract from a saved copy of the chart page instead of driving a browser.
    pub html_snapshot: Option<PathBuf>,
    pub browser: BrowserSettings,
    pub loader: LoaderSettings,
    pub selectors: Selectors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub no_sandbox: bool,
    pub disable_gpu: bool,
    pub chrome_executable: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    pub wait_timeout_secs: u64,
    pub wait_poll_ms: u64,
    pub scroll_delay_ms: u64,
    pub item_cap: usize,
    pub max_scroll_iterations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub item: String,
    pub heading: String,
    /// Tried in order; the first element whose text holds a year wins.
    pub year_containers: Vec<String>,
    pub title_link: String,
    pub title_link_attributes: Vec<String>,
    pub rating: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "https://www.imdb.com/chart/top/".to_string(),
            output_path: PathBuf::from("imdb_top250.csv"),
            html_snapshot: None,
            browser: BrowserSettings::default(),
            loader: LoaderSettings::default(),
            selectors: Selectors::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            no_sandbox: true,
            disable_gpu: true,
            chrome_executable: None,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            wait_timeout_secs: 30,
            wait_poll_ms: 250,
            scroll_delay_ms: 1500,
            item_cap: 250,
            max_scroll_iterations: 50,
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            item: "ul.ipc-metadata-list li.ipc-metadata-list-summary-item".to_string(),
            heading: "h3".to_string(),
            year_containers: vec![
                "span.cli-title-metadata-item".to_string(),
                "li.cli-title-metadata-item".to_string(),
                "span.ipc-metadata-list-summary-item__li".to_string(),
                "span.ipc-inline-list__item".to_string(),
            ],
            title_link: "a.ipc-title-link-wrapper".to_string(),
            title_link_attributes: vec!["aria-label".to_string(), "title".to_string()],
            rating: "span.ipc-rating-star--rating".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then an optional `imdb_scraper.*` file, then `IMDB_SCRAPER__*` variables.
    pub fn load() -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url).with_context(|| format!("Invalid target URL: {}", self.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Target URL must be http(s), got {}", url.scheme());
        }

        if self.loader.item_cap == 0 {
            bail!("loader.item_cap must be greater than zero");
        }
        if self.loader.max_scroll_iterations == 0 {
            bail!("loader.max_scroll_iterations must be greater than zero");
        }
        if self.loader.wait_poll_ms == 0 {
            bail!("loader.wait_poll_ms must be greater than zero");
        }

        self.selectors.validate()
    }
}

impl LoaderSettings {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn wait_poll(&self) -> Duration {
        Duration::from_millis(self.wait_poll_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Selectors {
    fn validate(&self) -> Result<()> {
        let singles = [
            ("item", &self.item),
            ("heading", &self.heading),
            ("title_link", &self.title_link),
            ("rating", &self.rating),
        ];
        for (name, css) in singles {
            check_selector(name, css)?;
        }
        for css in &self.year_containers {
            check_selector("year_containers", css)?;
        }
        Ok(())
    }
}

fn check_selector(name: &str, css: &str) -> Result<()> {
    if css.trim().is_empty() {
        bail!("selectors.{} must not be empty", name);
    }
    Selector::parse(css).map_err(|_| anyhow::anyhow!("selectors.{} is not valid CSS: {}", name, css))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_path, PathBuf::from("imdb_top250.csv"));
        assert_eq!(config.loader.item_cap, 250);
        assert_eq!(config.loader.scroll_delay(), Duration::from_millis(1500));
        assert_eq!(config.selectors.year_containers.len(), 4);
    }

    #[test]
    fn rejects_non_http_url() {
        let config = Config {
            url: "file:///tmp/chart.html".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_iteration_guard() {
        let mut config = Config::default();
        config.loader.max_scroll_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_selector() {
        let mut config = Config::default();
        config.selectors.rating = "span[".to_string();
        assert!(config.validate().is_err());

        config.selectors.rating = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
