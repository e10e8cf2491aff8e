//! Session login against the registry, including the second-factor step.

mod form;

pub use form::FormFields;

use std::time::Duration;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::client::constants::{CHALLENGE_MARKERS, LOGGED_IN_MARKERS};
use crate::core::net::{contains_any, get_text, send_checked};
use crate::core::{Config, Error, RegistryClient};
use form::{find_form, merge_fields, resolve_action};

/// Establishes an authenticated session on a [`RegistryClient`].
///
/// The session lives in the client's cookie jar, so a [`crate::ShareholderScraper`]
/// built from a clone of the same client sees it.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: RegistryClient,
    username: String,
    password: String,
    twofa_code: Option<String>,
    login_form_id: String,
    code_field: String,
    challenge_wait: Duration,
}

impl Authenticator {
    pub fn new(client: &RegistryClient, config: &Config) -> Self {
        Self {
            client: client.clone(),
            username: config.username().to_string(),
            password: config.password().to_string(),
            twofa_code: config.twofa_code().map(str::to_string),
            login_form_id: config.login_form_id().to_string(),
            code_field: config.code_field().to_string(),
            challenge_wait: config.challenge_wait(),
        }
    }

    /// Log in and report whether the session ended up authenticated.
    ///
    /// Never fails: transport and parsing errors are logged and reported as `false`.
    pub async fn login(&self) -> bool {
        match self.try_login().await {
            Ok(()) => {
                info!("Login successful");
                true
            }
            Err(e) => {
                error!("Login failed: {e}");
                false
            }
        }
    }

    /// Log in, surfacing the reason for failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when no login form is found or the session could not be
    /// verified, and transport errors from any of the registry calls.
    pub async fn try_login(&self) -> Result<(), Error> {
        let login_url = self.client.login_url();
        let page = get_text(self.client.http().get(login_url.clone())).await?;

        let form = find_form(&page, Some(self.login_form_id.as_str()))?
            .ok_or_else(|| Error::Auth("Could not find login form".into()))?;
        let action = resolve_action(form.action.as_deref(), self.client.site_root(), login_url)?;
        debug!(%action, hidden = form.hidden.len(), "submitting credentials");

        let body = merge_fields(
            [
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ],
            &form.hidden,
        );
        let resp = send_checked(self.client.http().post(action).form(&body)).await?;
        let landed_on = resp.url().clone();
        let landing = resp.text().await?;

        if contains_any(&landing, &CHALLENGE_MARKERS) {
            self.answer_challenge(&landing, &landed_on).await?;
        }

        if self.verify().await {
            Ok(())
        } else {
            Err(Error::Auth("session is not authenticated".into()))
        }
    }

    async fn answer_challenge(&self, page: &str, page_url: &Url) -> Result<(), Error> {
        let Some(code) = self.twofa_code.as_deref() else {
            warn!(
                "Second factor required and no code configured; waiting {}s for it to be completed in a browser",
                self.challenge_wait.as_secs()
            );
            tokio::time::sleep(self.challenge_wait).await;
            return Ok(());
        };

        info!("Second factor required; submitting configured code");
        let form = find_form(page, None)?
            .ok_or_else(|| Error::Auth("Second-factor page has no form".into()))?;
        let action = resolve_action(form.action.as_deref(), self.client.site_root(), page_url)?;
        let body = merge_fields([(self.code_field.as_str(), code)], &form.hidden);
        send_checked(self.client.http().post(action).form(&body)).await?;
        Ok(())
    }

    /// Check the site root for a logged-in marker. Errors count as "not verified".
    pub async fn verify(&self) -> bool {
        match get_text(self.client.http().get(self.client.site_root().clone())).await {
            Ok(body) => contains_any(&body, &LOGGED_IN_MARKERS),
            Err(e) => {
                warn!("Login verification failed: {e}");
                false
            }
        }
    }
}
