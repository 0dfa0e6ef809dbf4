use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Structural failures that abort a run.
///
/// Field-level problems (missing year, unparsable rating) never surface here;
/// the extractor degrades them to sentinel values instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no element matching `{selector}` appeared within {timeout:?}")]
    LoadTimeout { selector: String, timeout: Duration },

    #[error("browser error: {0}")]
    Browser(#[from] CdpError),

    #[error("invalid browser configuration: {0}")]
    BrowserConfig(String),

    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("failed to read HTML snapshot {}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV output: {0}")]
    Output(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
