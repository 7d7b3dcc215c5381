#![allow(dead_code)]

use market_client::app::App;
use market_client::auth::GateConfig;
use market_client::view::Document;
use market_client::Marketplace;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const PLUGIN_ID: &str = "64b7f0c2a1b2c3d4e5f60718";
pub const OTHER_ID: &str = "64b7f0c2a1b2c3d4e5f60719";

// Client pointed at the mock server's `/api`
pub fn market(server: &MockServer) -> Marketplace {
    Marketplace::new(&format!("{}/api", server.uri())).unwrap()
}

pub fn app(server: &MockServer, location: &str, gate: GateConfig) -> App {
    App::new(market(server), Document::at(location), gate)
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn plugin(id: &str, title: &str, hearts: u64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "desc": format!("{} description", title),
        "category": "Chrome extensions",
        "subcategory": "",
        "tags": ["tabs"],
        "screenshots": [],
        "hearts": hearts,
        "likes": 1,
        "oks": 0
    })
}

pub fn user(role: &str) -> Value {
    json!({ "user": { "_id": "u1", "name": "Ann", "email": "ann@example.com", "role": role } })
}

pub async fn requests_to(server: &MockServer, method: &str, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.to_string() == method && r.url.path() == path)
        .count()
}
