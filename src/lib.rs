//! shareholder-sync: mirror a company's top shareholders from the Norwegian
//! shareholder registry into a Webflow CMS collection.
//!
//! The run is three sequential steps sharing one [`Config`]:
//! [`Authenticator`] logs in (with an optional second factor),
//! [`ShareholderScraper`] reads the ranked table, and
//! [`CollectionClient`] clears and recreates the collection items.

pub mod auth;
pub mod core;
pub mod holders;
pub mod logging;
pub mod webflow;
pub mod workflow;

pub use auth::Authenticator;
pub use crate::core::{Config, ConfigBuilder, Error, RegistryClient, RegistryClientBuilder};
pub use holders::{RowError, ShareholderRecord, ShareholderScraper};
pub use webflow::{CollectionClient, SyncReport};
pub use workflow::RunError;
