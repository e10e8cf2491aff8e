use httpmock::Method::{DELETE, GET, POST};
use httpmock::MockServer;
use serde_json::json;
use shareholder_sync::{CollectionClient, ShareholderRecord, SyncReport};

use crate::common;

fn record(rank: u32, surname: &str, first: &str) -> ShareholderRecord {
    ShareholderRecord {
        rank,
        surname_company: surname.into(),
        first_name: first.into(),
        holdings: format!("{}000", 10 - rank),
        percent: format!("{}.5", 10 - rank),
    }
}

fn fields(r: &ShareholderRecord) -> serde_json::Value {
    json!({
        "name": r.display_name(),
        "surname-company": r.surname_company,
        "first-name": r.first_name,
        "holdings": r.holdings,
        "percentage": r.percent,
        "rank": r.rank,
        "slug": format!("shareholder-{}", r.rank),
    })
}

#[tokio::test]
async fn sync_clears_existing_items_then_creates_all() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/collections/coll-1/items")
            .header("authorization", "Bearer wf-token")
            .header("accept-version", "1.0.0");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[{"_id":"old-a","name":"Old A"},{"_id":"old-b"}],"count":2}"#);
    });
    let del_a = server.mock(|when, then| {
        when.method(DELETE).path("/collections/coll-1/items/old-a");
        then.status(200).body("{}");
    });
    // A failed delete is logged and skipped.
    let del_b = server.mock(|when, then| {
        when.method(DELETE).path("/collections/coll-1/items/old-b");
        then.status(500).body("oops");
    });

    let records = vec![record(1, "Acme Holding AS", ""), record(2, "Nordmann", "Ola")];
    let creates: Vec<_> = records
        .iter()
        .map(|r| common::mock_create(&server, fields(r), 200))
        .collect();

    let collection = CollectionClient::new(&common::config(&server)).unwrap();
    let report = collection.sync_report(&records).await.unwrap();

    assert_eq!(
        report,
        SyncReport { deleted: 1, delete_failures: 1, attempted: 2, created: 2 }
    );
    list.assert();
    del_a.assert();
    del_b.assert();
    for m in &creates {
        m.assert();
    }
}

#[tokio::test]
async fn one_failed_create_makes_sync_false_without_rollback() {
    let server = MockServer::start();
    let _list = common::mock_empty_collection(&server);

    let records = vec![
        record(1, "Acme Holding AS", ""),
        record(2, "Nordmann", "Ola"),
        record(4, "Hansen", "Kari"),
    ];
    let ok_1 = common::mock_create(&server, fields(&records[0]), 200);
    let bad_2 = common::mock_create(&server, fields(&records[1]), 500);
    let ok_4 = common::mock_create(&server, fields(&records[2]), 200);
    let any_delete = server.mock(|when, then| {
        when.method(DELETE);
        then.status(200);
    });

    let collection = CollectionClient::new(&common::config(&server)).unwrap();
    assert!(!collection.sync(&records).await);

    ok_1.assert();
    bad_2.assert();
    ok_4.assert();
    assert_eq!(any_delete.hits(), 0, "created items are not rolled back");
}

#[tokio::test]
async fn create_response_without_id_is_a_failure() {
    let server = MockServer::start();
    let _list = common::mock_empty_collection(&server);
    let rec = record(1, "Acme Holding AS", "");
    let create = server.mock(|when, then| {
        when.method(POST).path("/collections/coll-1/items");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"name":"Acme Holding AS"}"#);
    });

    let collection = CollectionClient::new(&common::config(&server)).unwrap();
    let report = collection.sync_report(std::slice::from_ref(&rec)).await.unwrap();

    create.assert();
    assert_eq!(report.created, 0);
    assert!(!report.is_complete());
}

#[tokio::test]
async fn failed_listing_aborts_before_any_create() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/collections/coll-1/items");
        then.status(401).body(r#"{"msg":"Unauthorized"}"#);
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/collections/coll-1/items");
        then.status(200).body(r#"{"_id":"x"}"#);
    });

    let collection = CollectionClient::new(&common::config(&server)).unwrap();
    assert!(!collection.sync(&[record(1, "Acme Holding AS", "")]).await);

    list.assert();
    assert_eq!(create.hits(), 0);
}
