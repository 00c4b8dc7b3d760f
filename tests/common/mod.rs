#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ada_gallery::config::BlockfrostConfig;

pub const PROJECT_ID: &str = "mainnetTestKey";
pub const WALLET: &str = "addr1q9mockwallet";
pub const POLICY: &str = "d5e6bf0500378d4f0da4e8dde6becec7621cd8cbf5cbb9b87013d4cc";

pub fn unit(name: &str) -> String {
    format!("{}{}", POLICY, hex::encode(name))
}

pub fn amount(unit: &str, quantity: &str) -> Value {
    json!({"unit": unit, "quantity": quantity})
}

pub fn utxo(tx_hash: &str, amounts: Vec<Value>) -> Value {
    json!({
        "tx_hash": tx_hash,
        "output_index": 0,
        "amount": amounts,
        "block": "7eb8e27d18686c7db9a18f8bbcfe34e3fed6e047afaa2d969904d15e934847e6",
        "data_hash": null,
        "inline_datum": null,
        "reference_script_hash": null
    })
}

/// Canned Blockfrost responses.
#[derive(Clone, Default)]
pub struct Fixture {
    pub wallet: Value,
    pub utxo_pages: Vec<Vec<Value>>,
    pub assets: HashMap<String, Value>,
    pub fail_address: bool,
    pub fail_utxos: bool,
}

impl Fixture {
    pub fn wallet(lovelace: &str) -> Value {
        json!({
            "address": WALLET,
            "amount": [amount("lovelace", lovelace)],
            "stake_address": "stake1uxmockstake",
            "type": "shelley",
            "script": false
        })
    }
}

#[derive(Clone)]
struct MockState {
    fixture: Arc<Fixture>,
    asset_calls: Arc<AtomicUsize>,
    peers: Arc<Mutex<HashSet<u16>>>,
}

impl MockState {
    /// Remembers the client port so tests can count distinct connections.
    fn record_peer(&self, req: &HttpRequest) {
        if let Some(addr) = req.peer_addr() {
            self.peers.lock().unwrap().insert(addr.port());
        }
    }
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("project_id")
        .map(|v| v.as_bytes() == PROJECT_ID.as_bytes())
        .unwrap_or(false)
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "status_code": 403,
        "error": "Forbidden",
        "message": "Invalid project token."
    }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "status_code": 404,
        "error": "Not Found",
        "message": "The requested component has not been found."
    }))
}

fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "status_code": 500,
        "error": "Internal Server Error",
        "message": "An unexpected response was received from the backend."
    }))
}

async fn address(req: HttpRequest, state: web::Data<MockState>) -> HttpResponse {
    state.record_peer(&req);
    if !authorized(&req) {
        return forbidden();
    }
    if state.fixture.fail_address {
        return server_error();
    }
    HttpResponse::Ok().json(&state.fixture.wallet)
}

async fn utxos(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.record_peer(&req);
    if !authorized(&req) {
        return forbidden();
    }
    if state.fixture.fail_utxos {
        return server_error();
    }
    let page = query.page.unwrap_or(1).max(1);
    let records = state
        .fixture
        .utxo_pages
        .get(page - 1)
        .cloned()
        .unwrap_or_default();
    HttpResponse::Ok().json(records)
}

async fn asset(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.record_peer(&req);
    if !authorized(&req) {
        return forbidden();
    }
    state.asset_calls.fetch_add(1, Ordering::SeqCst);
    match state.fixture.assets.get(path.as_str()) {
        Some(meta) => HttpResponse::Ok().json(meta),
        None => not_found(),
    }
}

pub struct MockBlockfrost {
    pub base_url: String,
    asset_calls: Arc<AtomicUsize>,
    peers: Arc<Mutex<HashSet<u16>>>,
    handle: ServerHandle,
}

impl MockBlockfrost {
    /// Binds to an ephemeral port; must be called inside an actix runtime.
    pub fn start(fixture: Fixture) -> Self {
        let state = MockState {
            fixture: Arc::new(fixture),
            asset_calls: Arc::new(AtomicUsize::new(0)),
            peers: Arc::new(Mutex::new(HashSet::new())),
        };
        let asset_calls = state.asset_calls.clone();
        let peers = state.peers.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .route("/api/v0/addresses/{address}", web::get().to(address))
                .route("/api/v0/addresses/{address}/utxos", web::get().to(utxos))
                .route("/api/v0/assets/{unit}", web::get().to(asset))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{}/api/v0", port),
            asset_calls,
            peers,
            handle,
        }
    }

    pub fn config(&self) -> BlockfrostConfig {
        BlockfrostConfig {
            base_url: self.base_url.clone(),
            api_key: PROJECT_ID.to_owned(),
            wallet_address: WALLET.to_owned(),
            timeout_secs: 5,
            max_utxo_pages: 5,
        }
    }

    pub fn asset_calls(&self) -> usize {
        self.asset_calls.load(Ordering::SeqCst)
    }

    /// Number of distinct client connections seen so far.
    pub fn connections(&self) -> usize {
        self.peers.lock().unwrap().len()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
