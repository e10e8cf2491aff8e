//! Centralized constants for default endpoints, UA and page markers.

use std::time::Duration;

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/91.0.4472.124 Safari/537.36"
);

/// Registry login page.
pub(crate) const DEFAULT_LOGIN_URL: &str = "https://www.aksjeeierregisteret.no/login";

/// Shareholder list for the tracked company.
pub(crate) const DEFAULT_TARGET_URL: &str = "https://www.aksjeeierregisteret.no/content/security/?orgnr=985279721&companies-search=protect";

/// Webflow CMS API base.
pub(crate) const DEFAULT_API_BASE: &str = "https://api.webflow.com";

/// Webflow API version pinned through the `Accept-Version` header.
pub(crate) const API_VERSION: &str = "1.0.0";

/// `id` of the login form; the first form on the page is used when absent.
pub(crate) const DEFAULT_LOGIN_FORM_ID: &str = "login-form";

/// Form field carrying the second-factor code.
pub(crate) const DEFAULT_CODE_FIELD: &str = "code";

/// Upper bound on extracted rows.
pub(crate) const DEFAULT_MAX_SHAREHOLDERS: usize = 20;

/// How long an unattended run waits for someone to clear the challenge in a browser.
pub(crate) const DEFAULT_CHALLENGE_WAIT: Duration = Duration::from_secs(30);

/// Lowercase phrases that mark a second-factor challenge page.
pub(crate) const CHALLENGE_MARKERS: [&str; 2] = ["verification code", "two-factor"];

/// Lowercase phrases only present once the session is authenticated.
pub(crate) const LOGGED_IN_MARKERS: [&str; 2] = ["logout", "logg ut"];

/// `id` prefix of the shareholder table rows.
pub(crate) const INVESTOR_ROW_PREFIX: &str = "investor-";
