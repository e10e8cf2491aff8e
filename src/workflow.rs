//! End-to-end run: login, scrape, then mirror into the collection.

use thiserror::Error;
use tracing::info;

use crate::auth::Authenticator;
use crate::core::{Config, Error, RegistryClient};
use crate::holders::{ShareholderRecord, ShareholderScraper};
use crate::webflow::{CollectionClient, SyncReport};

/// Why a run stopped. Every variant maps to exit code 1.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration or client construction failed before any request was made.
    #[error(transparent)]
    Setup(#[from] Error),

    #[error("Authentication failed")]
    Authentication,

    #[error("No shareholder data extracted")]
    NoRecords,

    /// The existing items could not be listed, so nothing was created.
    #[error("Webflow update aborted: {0}")]
    SyncAborted(Error),

    /// Some creates failed; the collection is partially populated.
    #[error("Webflow update failed: created {created} of {attempted} items")]
    SyncIncomplete { created: usize, attempted: usize },

    #[error("Site publish failed: {0}")]
    Publish(Error),
}

/// Log in and scrape the shareholder table.
///
/// # Errors
///
/// [`RunError::Authentication`] when login is not verified, [`RunError::NoRecords`]
/// when extraction yields nothing.
pub async fn scrape_shareholders(config: &Config) -> Result<Vec<ShareholderRecord>, RunError> {
    let client = RegistryClient::from_config(config)?;

    if !Authenticator::new(&client, config).login().await {
        return Err(RunError::Authentication);
    }

    let records = ShareholderScraper::new(&client, config).scrape().await;
    if records.is_empty() {
        return Err(RunError::NoRecords);
    }
    Ok(records)
}

/// Replace the collection contents with `records`, optionally publishing the site.
///
/// # Errors
///
/// Fails when the clear phase aborts, when any create fails, or when publishing fails.
pub async fn push_shareholders(
    config: &Config,
    records: &[ShareholderRecord],
    publish: bool,
) -> Result<SyncReport, RunError> {
    let collection = CollectionClient::new(config)?;
    info!("Starting Webflow update process");

    let report = collection
        .sync_report(records)
        .await
        .map_err(RunError::SyncAborted)?;
    if !report.is_complete() {
        return Err(RunError::SyncIncomplete {
            created: report.created,
            attempted: report.attempted,
        });
    }

    if publish {
        collection.publish_site().await.map_err(RunError::Publish)?;
    }
    Ok(report)
}

/// Unattended run: scrape then push.
///
/// # Errors
///
/// See [`scrape_shareholders`] and [`push_shareholders`].
pub async fn run(config: &Config, publish: bool) -> Result<SyncReport, RunError> {
    let records = scrape_shareholders(config).await?;
    info!("Successfully scraped {} shareholders", records.len());

    let report = push_shareholders(config, &records, publish).await?;
    info!("Webflow update completed successfully");
    Ok(report)
}
