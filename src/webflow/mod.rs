//! Clear-then-recreate mirroring of shareholder records into a Webflow collection.

mod wire;

pub use wire::{ItemFields, ItemRef};

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::{error, info, warn};
use url::Url;

use crate::core::client::constants::API_VERSION;
use crate::core::net::{get_text, send_checked};
use crate::core::{Config, Error};
use crate::holders::ShareholderRecord;
use wire::{CreateItem, CreatedItem, ItemList, PublishSite};

/// Outcome of a full synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Existing items removed in the clear phase.
    pub deleted: usize,
    /// Existing items whose delete call failed.
    pub delete_failures: usize,
    /// Records submitted for creation.
    pub attempted: usize,
    /// Records the API confirmed with an item id.
    pub created: usize,
}

impl SyncReport {
    /// Every submitted record was created.
    pub fn is_complete(&self) -> bool {
        self.created == self.attempted
    }
}

/// Client for one Webflow CMS collection.
#[derive(Debug, Clone)]
pub struct CollectionClient {
    http: Client,
    api_base: Url,
    collection_id: String,
    site_id: Option<String>,
}

impl CollectionClient {
    /// Build a client with the bearer token from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token()))
            .map_err(|_| Error::Data("API token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("accept-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let mut httpb = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .default_headers(headers);
        if let Some(t) = config.timeout() {
            httpb = httpb.timeout(t);
        }

        Ok(Self {
            http: httpb.build()?,
            api_base: config.api_base().clone(),
            collection_id: config.collection_id().to_string(),
            site_id: config.site_id().map(str::to_string),
        })
    }

    fn endpoint<'a, I>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Data(format!("API base cannot be a base: {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn items_url(&self) -> Result<Url, Error> {
        self.endpoint(["collections", self.collection_id.as_str(), "items"])
    }

    /// List the items currently in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an unreadable body.
    pub async fn list_items(&self) -> Result<Vec<ItemRef>, Error> {
        let body = get_text(self.http.get(self.items_url()?)).await?;
        let list: ItemList = serde_json::from_str(&body)?;
        Ok(list.items)
    }

    /// Delete one item by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete_item(&self, id: &str) -> Result<(), Error> {
        let url = self.endpoint(["collections", self.collection_id.as_str(), "items", id])?;
        send_checked(self.http.delete(url)).await?;
        Ok(())
    }

    /// Create one item from a record and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a response without `_id`.
    pub async fn create_item(&self, record: &ShareholderRecord) -> Result<String, Error> {
        let fields = ItemFields::from(record);
        let req = self
            .http
            .post(self.items_url()?)
            .json(&CreateItem { fields: &fields });
        let body = get_text(req).await?;
        let created: CreatedItem = serde_json::from_str(&body)?;
        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Data("create response has no _id".into()))?;
        info!("Created item for {}: {id}", fields.name);
        Ok(id)
    }

    /// Delete every existing item. Individual delete failures are logged and counted.
    ///
    /// Returns `(deleted, failed)`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the listing call fails.
    pub async fn clear(&self) -> Result<(usize, usize), Error> {
        let items = self.list_items().await?;
        info!("Found {} existing items to clear", items.len());

        let (mut deleted, mut failed) = (0, 0);
        for item in &items {
            match self.delete_item(&item.id).await {
                Ok(()) => {
                    deleted += 1;
                    info!("Deleted item: {}", item.name.as_deref().unwrap_or(&item.id));
                }
                Err(e) => {
                    failed += 1;
                    warn!("Failed to delete item {}: {e}", item.id);
                }
            }
        }
        Ok((deleted, failed))
    }

    /// Replace the collection contents with `records`, reporting counts.
    ///
    /// Already created items are not rolled back when a later create fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear phase cannot list the existing items.
    pub async fn sync_report(&self, records: &[ShareholderRecord]) -> Result<SyncReport, Error> {
        let (deleted, delete_failures) = self.clear().await?;

        let mut created = 0;
        for record in records {
            match self.create_item(record).await {
                Ok(_) => created += 1,
                Err(e) => error!("Error creating item for rank {}: {e}", record.rank),
            }
        }

        info!("Created {created} out of {} shareholder items", records.len());
        Ok(SyncReport {
            deleted,
            delete_failures,
            attempted: records.len(),
            created,
        })
    }

    /// Replace the collection contents with `records`.
    ///
    /// Returns `true` only if every record was created.
    pub async fn sync(&self, records: &[ShareholderRecord]) -> bool {
        match self.sync_report(records).await {
            Ok(report) => report.is_complete(),
            Err(e) => {
                error!("Error clearing existing items: {e}");
                false
            }
        }
    }

    /// Publish the configured site so collection changes go live.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] without a site id, or a transport/status error.
    pub async fn publish_site(&self) -> Result<(), Error> {
        let site_id = self
            .site_id
            .as_deref()
            .ok_or_else(|| Error::MissingConfig(vec![crate::core::config::ENV_SITE_ID.into()]))?;
        let url = self.endpoint(["sites", site_id, "publish"])?;
        send_checked(self.http.post(url).json(&PublishSite { domains: Vec::new() })).await?;
        info!("Site publish initiated");
        Ok(())
    }
}
