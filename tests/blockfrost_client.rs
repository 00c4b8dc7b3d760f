mod common;

use ada_gallery::blockfrost::{BlockfrostClient, BlockfrostError};
use common::{amount, unit, utxo, Fixture, MockBlockfrost, WALLET};
use serde_json::Value;

fn full_page(prefix: &str) -> Vec<Value> {
    (0..100)
        .map(|i| utxo(&format!("{}{:03}", prefix, i), vec![amount("lovelace", "1")]))
        .collect()
}

#[actix_web::test]
async fn fetches_address_info() {
    let mock = MockBlockfrost::start(Fixture {
        wallet: Fixture::wallet("42000000"),
        ..Default::default()
    });
    let client = BlockfrostClient::new(&mock.config());

    let info = client.session().get_address(WALLET).await.unwrap();
    assert_eq!(info.address, WALLET);
    assert_eq!(info.stake_address.as_deref(), Some("stake1uxmockstake"));
    assert_eq!(info.ada_balance(), 42.0);
    mock.stop().await;
}

#[actix_web::test]
async fn utxo_paging_stops_at_cap() {
    let mock = MockBlockfrost::start(Fixture {
        utxo_pages: vec![full_page("a"), full_page("b"), full_page("c")],
        ..Default::default()
    });
    let mut cfg = mock.config();
    cfg.max_utxo_pages = 2;
    let client = BlockfrostClient::new(&cfg);

    let utxos = client.session().get_utxos(WALLET).await.unwrap();
    assert_eq!(utxos.len(), 200);
    assert_eq!(utxos[0].tx_hash, "a000");
    assert_eq!(utxos[199].tx_hash, "b099");
    mock.stop().await;
}

#[actix_web::test]
async fn empty_wallet_has_no_utxos() {
    let mock = MockBlockfrost::start(Fixture::default());
    let client = BlockfrostClient::new(&mock.config());

    assert!(client.session().get_utxos(WALLET).await.unwrap().is_empty());
    mock.stop().await;
}

#[actix_web::test]
async fn missing_asset_reports_status_and_message() {
    let mock = MockBlockfrost::start(Fixture::default());
    let client = BlockfrostClient::new(&mock.config());

    let err = client.session().get_asset(&unit("Ghost1")).await.unwrap_err();
    match err {
        BlockfrostError::Status {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(
                message.as_deref(),
                Some("The requested component has not been found.")
            );
        }
        other => panic!("unexpected error: {}", other),
    }
    mock.stop().await;
}

#[actix_web::test]
async fn unreachable_upstream_is_transport_error() {
    let mock = MockBlockfrost::start(Fixture::default());
    let mut cfg = mock.config();
    mock.stop().await;
    // nothing listens on port 9 of localhost in the test environment
    cfg.base_url = "http://127.0.0.1:9/api/v0".to_owned();
    cfg.timeout_secs = 2;

    let err = BlockfrostClient::new(&cfg)
        .session()
        .get_address(WALLET)
        .await
        .unwrap_err();
    assert!(matches!(err, BlockfrostError::Transport { .. }));
}

#[actix_web::test]
async fn session_reuses_one_connection() {
    let mock = MockBlockfrost::start(Fixture {
        wallet: Fixture::wallet("1000000"),
        ..Default::default()
    });
    let client = BlockfrostClient::new(&mock.config());
    let session = client.session();

    session.get_address(WALLET).await.unwrap();
    session.get_utxos(WALLET).await.unwrap();
    let _ = session.get_asset(&unit("Ghost1")).await;
    session.get_address(WALLET).await.unwrap();

    assert_eq!(mock.asset_calls(), 1);
    assert_eq!(mock.connections(), 1);
    mock.stop().await;
}

#[actix_web::test]
async fn each_session_opens_its_own_connection() {
    let mock = MockBlockfrost::start(Fixture {
        wallet: Fixture::wallet("1000000"),
        ..Default::default()
    });
    let client = BlockfrostClient::new(&mock.config());

    let first = client.session();
    let second = client.session();
    first.get_address(WALLET).await.unwrap();
    second.get_address(WALLET).await.unwrap();

    assert_eq!(mock.connections(), 2);
    mock.stop().await;
}
