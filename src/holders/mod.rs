mod model;
mod parse;

#[cfg(any(debug_assertions, feature = "debug-dumps"))]
mod debug;

pub use model::{RowError, ShareholderRecord};
pub use parse::{normalize_holdings, normalize_percent, parse_shareholder_table};

use tracing::{error, info, warn};

use crate::core::net::get_text;
use crate::core::{Config, Error, RegistryClient};

/// Fetches the ranked shareholder table with an authenticated session.
#[derive(Debug, Clone)]
pub struct ShareholderScraper {
    client: RegistryClient,
    max_shareholders: usize,
}

impl ShareholderScraper {
    pub fn new(client: &RegistryClient, config: &Config) -> Self {
        Self {
            client: client.clone(),
            max_shareholders: config.max_shareholders(),
        }
    }

    /// Scrape the top shareholders. Failures are logged and yield an empty list.
    pub async fn scrape(&self) -> Vec<ShareholderRecord> {
        match self.try_scrape().await {
            Ok(records) => records,
            Err(e) => {
                error!("Scraping error: {e}");
                Vec::new()
            }
        }
    }

    /// Scrape the top shareholders, surfacing transport and parse errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the target page cannot be fetched or returns a non-2xx status.
    pub async fn try_scrape(&self) -> Result<Vec<ShareholderRecord>, Error> {
        let url = self.client.target_url().clone();
        let body = get_text(self.client.http().get(url)).await?;

        #[cfg(any(debug_assertions, feature = "debug-dumps"))]
        {
            if debug::enabled() {
                if let Err(e) = debug::debug_dump_html(&body) {
                    warn!("SHAREHOLDER_DEBUG: could not write target page: {e}");
                }
            }
        }

        let records = parse_shareholder_table(&body, self.max_shareholders)?;
        info!("Successfully scraped {} shareholders", records.len());
        Ok(records)
    }
}
