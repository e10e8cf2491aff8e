use std::time::{Duration, Instant};

use httpmock::Method::POST;
use httpmock::MockServer;
use shareholder_sync::{Authenticator, RegistryClient};

use crate::common;

#[tokio::test]
async fn challenge_without_code_waits_then_verifies() {
    let server = MockServer::start();
    let _page = common::mock_login_page(&server);
    let post = common::mock_credentials(&server, "challenge_page.html");
    let code_post = server.mock(|when, then| {
        when.method(POST).path("/account/2fa");
        then.status(200);
    });
    let home = common::mock_home(&server, "home_logged_in.html");

    let cfg = common::config_builder(&server)
        .challenge_wait(Duration::from_millis(300))
        .build()
        .unwrap();
    let client = RegistryClient::from_config(&cfg).unwrap();
    let auth = Authenticator::new(&client, &cfg);

    let started = Instant::now();
    assert!(auth.login().await);
    assert!(
        started.elapsed() >= Duration::from_millis(300),
        "login returned before the challenge wait elapsed"
    );

    post.assert();
    home.assert();
    assert_eq!(code_post.hits(), 0, "no code is configured, nothing to submit");
}

#[tokio::test]
async fn challenge_with_code_submits_it_with_hidden_fields() {
    let server = MockServer::start();
    let _page = common::mock_login_page(&server);
    let _post = common::mock_credentials(&server, "challenge_page.html");
    let code_post = server.mock(|when, then| {
        when.method(POST)
            .path("/account/2fa")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("code=654321&state=xyz");
        then.status(200).body("ok");
    });
    let home = common::mock_home(&server, "home_logged_in.html");

    let cfg = common::config_builder(&server)
        .twofa_code("654321")
        .challenge_wait(Duration::from_secs(60))
        .build()
        .unwrap();
    let client = RegistryClient::from_config(&cfg).unwrap();

    let started = Instant::now();
    assert!(Authenticator::new(&client, &cfg).login().await);
    assert!(started.elapsed() < Duration::from_secs(60));

    code_post.assert();
    home.assert();
}

#[tokio::test]
async fn rejected_code_is_false() {
    let server = MockServer::start();
    let _page = common::mock_login_page(&server);
    let _post = common::mock_credentials(&server, "challenge_page.html");
    let code_post = server.mock(|when, then| {
        when.method(POST).path("/account/2fa");
        then.status(403).body("invalid code");
    });
    let home = common::mock_home(&server, "home_logged_in.html");

    let cfg = common::config_builder(&server)
        .twofa_code("000000")
        .build()
        .unwrap();
    let client = RegistryClient::from_config(&cfg).unwrap();

    assert!(!Authenticator::new(&client, &cfg).login().await);
    code_post.assert();
    assert_eq!(home.hits(), 0);
}
