//! Registry HTTP client + builder.
//! The client owns the session cookie jar shared by login and extraction.

pub(crate) mod constants;

use crate::core::{Config, Error};
use constants::{DEFAULT_LOGIN_URL, DEFAULT_TARGET_URL, USER_AGENT};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// Cookie-holding client for the shareholder registry.
///
/// Cloning is cheap and clones share the same cookie jar, so a session
/// established through one clone is visible to all of them.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    login_url: Url,
    target_url: Url,
    site_root: Url,
}

impl RegistryClient {
    /// Create a new builder.
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::default()
    }

    /// Build a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut b = Self::builder()
            .user_agent(config.user_agent())
            .login_url(config.login_url().clone())
            .target_url(config.target_url().clone());
        if let Some(t) = config.timeout() {
            b = b.timeout(t);
        }
        b.build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn login_url(&self) -> &Url {
        &self.login_url
    }
    pub(crate) fn target_url(&self) -> &Url {
        &self.target_url
    }
    /// Origin of the login page; relative form actions resolve against it.
    pub(crate) fn site_root(&self) -> &Url {
        &self.site_root
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct RegistryClientBuilder {
    user_agent: Option<String>,
    login_url: Option<Url>,
    target_url: Option<Url>,
    timeout: Option<Duration>,
}

impl RegistryClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the login page URL. The site root is derived from it.
    pub fn login_url(mut self, url: Url) -> Self {
        self.login_url = Some(url);
        self
    }

    /// Override the shareholder list URL.
    pub fn target_url(mut self, url: Url) -> Self {
        self.target_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<RegistryClient, Error> {
        let login_url = match self.login_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_LOGIN_URL)?,
        };
        let target_url = match self.target_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_TARGET_URL)?,
        };
        let site_root = login_url.join("/")?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers)
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }

        let http = httpb.build()?;

        Ok(RegistryClient {
            http,
            login_url,
            target_url,
            site_root,
        })
    }
}
