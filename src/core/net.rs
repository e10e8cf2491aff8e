use reqwest::{RequestBuilder, Response};
use tracing::debug;

use super::Error;

/// Send a request and fail on non-2xx, keeping the URL for the error.
pub(crate) async fn send_checked(req: RequestBuilder) -> Result<Response, Error> {
    let resp = req.send().await?;
    let status = resp.status();
    debug!(url = %resp.url(), status = status.as_u16(), "response");
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Send a request and read the body as text.
pub(crate) async fn get_text(req: RequestBuilder) -> Result<String, Error> {
    let resp = send_checked(req).await?;
    Ok(resp.text().await?)
}

/// Case-insensitive check for any of the given lowercase phrases.
pub(crate) fn contains_any(body: &str, lowercase_needles: &[&str]) -> bool {
    let hay = body.to_lowercase();
    lowercase_needles.iter().any(|n| hay.contains(n))
}
