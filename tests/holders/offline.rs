use httpmock::Method::GET;
use httpmock::MockServer;
use shareholder_sync::{Error, RegistryClient, ShareholderScraper};

use crate::common;

#[tokio::test]
async fn offline_shareholders_from_fixture_after_login() {
    let server = MockServer::start();
    let _page = common::mock_login_page(&server);
    let _post = common::mock_credentials(&server, "home_logged_in.html");
    let _home = common::mock_home(&server, "home_logged_in.html");
    let target = common::mock_target(&server, "shareholders_page.html");

    let cfg = common::config(&server);
    let client = RegistryClient::from_config(&cfg).unwrap();
    assert!(shareholder_sync::Authenticator::new(&client, &cfg).login().await);

    // Same cookie jar: the target mock only answers with the session cookie present.
    let records = ShareholderScraper::new(&client, &cfg).scrape().await;
    target.assert();

    let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 4, 5], "malformed third row leaves a rank gap");

    let acme = &records[0];
    assert_eq!(acme.surname_company, "Acme Holding AS");
    assert_eq!(acme.first_name, "");
    assert_eq!(acme.holdings, "12345678");
    assert_eq!(acme.percent, "24.70");

    let ola = &records[1];
    assert_eq!(ola.display_name(), "Nordmann Ola");
    assert_eq!(ola.holdings, "1234000");
    assert_eq!(ola.percent, "2.47");

    assert!(
        records.iter().all(|r| r.surname_company != "Sum"),
        "rows without an investor id are not shareholders"
    );
}

#[tokio::test]
async fn cap_limits_rows_taken_from_the_page() {
    let server = MockServer::start();
    let target = server.mock(|when, then| {
        when.method(GET).path("/content/security/");
        then.status(200).body(common::fixture("shareholders_page.html"));
    });

    let cfg = common::config_builder(&server)
        .max_shareholders(3)
        .build()
        .unwrap();
    let client = RegistryClient::from_config(&cfg).unwrap();

    let records = ShareholderScraper::new(&client, &cfg).scrape().await;
    target.assert();

    // Three rows are taken, the third is malformed.
    let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[tokio::test]
async fn unauthenticated_target_yields_empty_list() {
    let server = MockServer::start();
    let target = server.mock(|when, then| {
        when.method(GET).path("/content/security/");
        then.status(403).body("forbidden");
    });

    let cfg = common::config(&server);
    let client = RegistryClient::from_config(&cfg).unwrap();
    let scraper = ShareholderScraper::new(&client, &cfg);

    assert!(scraper.scrape().await.is_empty());
    match scraper.try_scrape().await.unwrap_err() {
        Error::Status { status, url } => {
            assert_eq!(status, 403);
            assert!(url.contains("/content/security/"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    target.assert_hits(2);
}
