//! Run configuration, built once at startup and handed to each component by reference.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::client::constants::{
    DEFAULT_API_BASE, DEFAULT_CHALLENGE_WAIT, DEFAULT_CODE_FIELD, DEFAULT_LOGIN_FORM_ID,
    DEFAULT_LOGIN_URL, DEFAULT_MAX_SHAREHOLDERS, DEFAULT_TARGET_URL, USER_AGENT,
};
use super::error::Error;

pub(crate) const ENV_USERNAME: &str = "REGISTRY_USERNAME";
pub(crate) const ENV_PASSWORD: &str = "REGISTRY_PASSWORD";
pub(crate) const ENV_API_TOKEN: &str = "WEBFLOW_API_TOKEN";
pub(crate) const ENV_COLLECTION_ID: &str = "WEBFLOW_COLLECTION_ID";
pub(crate) const ENV_TWOFA_CODE: &str = "TWOFA_CODE";
pub(crate) const ENV_SITE_ID: &str = "WEBFLOW_SITE_ID";

/// Validated settings for one scrape-and-sync run.
#[derive(Clone)]
pub struct Config {
    username: String,
    password: String,
    api_token: String,
    collection_id: String,
    twofa_code: Option<String>,
    site_id: Option<String>,

    login_url: Url,
    target_url: Url,
    api_base: Url,
    login_form_id: String,
    code_field: String,
    user_agent: String,
    max_shareholders: usize,
    challenge_wait: Duration,
    timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field("collection_id", &self.collection_id)
            .field("twofa_code", &self.twofa_code.as_ref().map(|_| "<redacted>"))
            .field("site_id", &self.site_id)
            .field("login_url", &self.login_url.as_str())
            .field("target_url", &self.target_url.as_str())
            .field("api_base", &self.api_base.as_str())
            .field("max_shareholders", &self.max_shareholders)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Create a new builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load `.env` (if present) and read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] naming every required variable that is unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] naming every required variable that is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(v) = get(ENV_USERNAME) {
            builder = builder.username(v);
        }
        if let Some(v) = get(ENV_PASSWORD) {
            builder = builder.password(v);
        }
        if let Some(v) = get(ENV_API_TOKEN) {
            builder = builder.api_token(v);
        }
        if let Some(v) = get(ENV_COLLECTION_ID) {
            builder = builder.collection_id(v);
        }
        if let Some(v) = get(ENV_TWOFA_CODE) {
            builder = builder.twofa_code(v.trim());
        }
        if let Some(v) = get(ENV_SITE_ID) {
            builder = builder.site_id(v);
        }
        builder.build()
    }

    /// Returns a copy with the second-factor code replaced (manual mode).
    #[must_use]
    pub fn with_twofa_code(mut self, code: Option<String>) -> Self {
        self.twofa_code = code.filter(|c| !c.is_empty());
        self
    }

    pub fn target_url(&self) -> &Url {
        &self.target_url
    }
    pub fn max_shareholders(&self) -> usize {
        self.max_shareholders
    }
    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }
    pub fn has_twofa_code(&self) -> bool {
        self.twofa_code.is_some()
    }
    pub fn challenge_wait(&self) -> Duration {
        self.challenge_wait
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
    pub(crate) fn api_token(&self) -> &str {
        &self.api_token
    }
    pub(crate) fn collection_id(&self) -> &str {
        &self.collection_id
    }
    pub(crate) fn twofa_code(&self) -> Option<&str> {
        self.twofa_code.as_deref()
    }
    pub(crate) fn login_url(&self) -> &Url {
        &self.login_url
    }
    pub(crate) fn api_base(&self) -> &Url {
        &self.api_base
    }
    pub(crate) fn login_form_id(&self) -> &str {
        &self.login_form_id
    }
    pub(crate) fn code_field(&self) -> &str {
        &self.code_field
    }
    pub(crate) fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct ConfigBuilder {
    username: Option<String>,
    password: Option<String>,
    api_token: Option<String>,
    collection_id: Option<String>,
    twofa_code: Option<String>,
    site_id: Option<String>,

    login_url: Option<Url>,
    target_url: Option<Url>,
    api_base: Option<Url>,
    login_form_id: Option<String>,
    code_field: Option<String>,
    user_agent: Option<String>,
    max_shareholders: Option<usize>,
    challenge_wait: Option<Duration>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn username(mut self, v: impl Into<String>) -> Self {
        self.username = Some(v.into());
        self
    }

    pub fn password(mut self, v: impl Into<String>) -> Self {
        self.password = Some(v.into());
        self
    }

    pub fn api_token(mut self, v: impl Into<String>) -> Self {
        self.api_token = Some(v.into());
        self
    }

    pub fn collection_id(mut self, v: impl Into<String>) -> Self {
        self.collection_id = Some(v.into());
        self
    }

    /// Second-factor code submitted when the registry asks for one.
    pub fn twofa_code(mut self, v: impl Into<String>) -> Self {
        self.twofa_code = Some(v.into());
        self
    }

    /// Webflow site to publish after a successful sync.
    pub fn site_id(mut self, v: impl Into<String>) -> Self {
        self.site_id = Some(v.into());
        self
    }

    /// Override the login page (e.g., a mock server in tests).
    pub fn login_url(mut self, url: Url) -> Self {
        self.login_url = Some(url);
        self
    }

    /// Override the shareholder list page.
    pub fn target_url(mut self, url: Url) -> Self {
        self.target_url = Some(url);
        self
    }

    /// Override the Webflow API base (e.g., `https://api.webflow.com`).
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    pub fn login_form_id(mut self, id: impl Into<String>) -> Self {
        self.login_form_id = Some(id.into());
        self
    }

    pub fn code_field(mut self, name: impl Into<String>) -> Self {
        self.code_field = Some(name.into());
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Cap on extracted rows. Default: 20.
    pub fn max_shareholders(mut self, n: usize) -> Self {
        self.max_shareholders = Some(n);
        self
    }

    /// Delay granted to an out-of-band second-factor login. Default: 30s.
    pub fn challenge_wait(mut self, dur: Duration) -> Self {
        self.challenge_wait = Some(dur);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] listing every missing required value,
    /// or [`Error::Url`] if a default endpoint fails to parse.
    pub fn build(self) -> Result<Config, Error> {
        let missing: Vec<String> = [
            (ENV_USERNAME, &self.username),
            (ENV_PASSWORD, &self.password),
            (ENV_API_TOKEN, &self.api_token),
            (ENV_COLLECTION_ID, &self.collection_id),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name.to_string())
        .collect();

        if !missing.is_empty() {
            return Err(Error::MissingConfig(missing));
        }

        let login_url = match self.login_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_LOGIN_URL)?,
        };
        let target_url = match self.target_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_TARGET_URL)?,
        };
        let api_base = match self.api_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_API_BASE)?,
        };

        Ok(Config {
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            api_token: self.api_token.unwrap_or_default(),
            collection_id: self.collection_id.unwrap_or_default(),
            twofa_code: self.twofa_code.filter(|c| !c.is_empty()),
            site_id: self.site_id.filter(|s| !s.is_empty()),
            login_url,
            target_url,
            api_base,
            login_form_id: self
                .login_form_id
                .unwrap_or_else(|| DEFAULT_LOGIN_FORM_ID.to_string()),
            code_field: self
                .code_field
                .unwrap_or_else(|| DEFAULT_CODE_FIELD.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            max_shareholders: self.max_shareholders.unwrap_or(DEFAULT_MAX_SHAREHOLDERS),
            challenge_wait: self.challenge_wait.unwrap_or(DEFAULT_CHALLENGE_WAIT),
            timeout: self.timeout,
        })
    }
}
