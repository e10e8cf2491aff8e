#![allow(dead_code)]

use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use shareholder_sync::{Config, ConfigBuilder};
use std::{fs, path::Path, time::Duration};
use url::Url;

pub const CREDENTIAL_BODY: &str = "username=alice&password=s3cret&csrf_token=tok123";

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&server.url(path)).unwrap()
}

/// Registry and collection API both served by `server`.
pub fn config_builder(server: &MockServer) -> ConfigBuilder {
    Config::builder()
        .username("alice")
        .password("s3cret")
        .api_token("wf-token")
        .collection_id("coll-1")
        .login_url(url(server, "/login"))
        .target_url(url(server, "/content/security/?orgnr=985279721"))
        .api_base(Url::parse(&server.base_url()).unwrap())
        .challenge_wait(Duration::from_millis(200))
        .timeout(Duration::from_secs(5))
}

pub fn config(server: &MockServer) -> Config {
    config_builder(server).build().unwrap()
}

pub fn mock_login_page(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/login");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(fixture("login_page.html"));
    })
}

/// Credential POST that sets the session cookie and lands on `landing`.
pub fn mock_credentials<'a>(server: &'a MockServer, landing: &str) -> Mock<'a> {
    let body = fixture(landing);
    server.mock(|when, then| {
        when.method(POST)
            .path("/account/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(CREDENTIAL_BODY);
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .header("set-cookie", "session=abc; Path=/")
            .body(body);
    })
}

pub fn mock_home<'a>(server: &'a MockServer, page: &str) -> Mock<'a> {
    let body = fixture(page);
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

/// Shareholder page, only served to a request carrying the session cookie.
pub fn mock_target<'a>(server: &'a MockServer, page: &str) -> Mock<'a> {
    let body = fixture(page);
    server.mock(|when, then| {
        when.method(GET)
            .path("/content/security/")
            .query_param("orgnr", "985279721")
            .header("cookie", "session=abc");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

pub fn mock_empty_collection(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/collections/coll-1/items");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[],"count":0}"#);
    })
}

/// Create call for one exact payload, answered with `item-{rank}`.
pub fn mock_create<'a>(
    server: &'a MockServer,
    fields: serde_json::Value,
    status: u16,
) -> Mock<'a> {
    let rank = fields["rank"].as_u64().unwrap_or_default();
    server.mock(|when, then| {
        when.method(POST)
            .path("/collections/coll-1/items")
            .header("authorization", "Bearer wf-token")
            .json_body(serde_json::json!({ "fields": fields }));
        then.status(status)
            .header("content-type", "application/json")
            .body(format!(r#"{{"_id":"item-{rank}"}}"#));
    })
}
