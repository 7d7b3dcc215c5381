mod common;

use common::{market, ok, plugin, PLUGIN_ID};
use dotenv::dotenv;
use market_client::attachment::Attachment;
use market_client::categories::Category;
use market_client::config::ClientOptions;
use market_client::error::{Error, ErrorKind};
use market_client::plugins::{PluginFilter, PluginPatch, Reaction};
use market_client::requests::NewRequest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_sends_filter_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("q", "tab saver"))
        .and(query_param("category", "Chrome extensions"))
        .and(query_param("tags", "tabs,memory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([plugin(PLUGIN_ID, "Tab Saver", 2)]))))
        .expect(1)
        .mount(&server)
        .await;

    let filter = PluginFilter::new()
        .query("tab saver")
        .category("Chrome extensions")
        .tags(["tabs", "memory"]);
    let items = market(&server).plugins().list(&filter).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, PLUGIN_ID);
    assert_eq!(items[0].hearts, 2);
}

#[tokio::test]
async fn test_items_and_bare_bodies_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "items": [plugin(PLUGIN_ID, "A", 0)] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "_id": "c1", "name": "Wordpress", "subs": ["Themes"] }])))
        .mount(&server)
        .await;

    let client = market(&server);
    assert_eq!(client.plugins().list(&PluginFilter::new()).await.unwrap().len(), 1);
    let categories = client.categories().list().await.unwrap();
    assert_eq!(categories[0].name, "Wordpress");
    assert!(categories[0].has_sub("Themes"));
}

#[tokio::test]
async fn test_failure_envelope_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Plugin is archived" })))
        .mount(&server)
        .await;

    let err = market(&server).plugins().get(PLUGIN_ID).await.unwrap_err();
    assert_eq!(err.to_string(), "Plugin is archived");
    assert_eq!(err.kind(), Some(ErrorKind::Server));
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/comments/c1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = market(&server);
    let err = client.comments().list().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502");

    let err = client.comments().remove("c1").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_update_sends_only_patched_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "Renamed", 0))))
        .expect(1)
        .mount(&server)
        .await;

    let patch = PluginPatch {
        title: Some("Renamed".into()),
        ..PluginPatch::default()
    };
    let updated = market(&server).plugins().update(PLUGIN_ID, &patch).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn test_soft_delete_and_restore() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/plugins/{}/restore", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "Back", 0))))
        .expect(1)
        .mount(&server)
        .await;

    let store = market(&server).plugins();
    store.soft_delete(PLUGIN_ID).await.unwrap();
    assert_eq!(store.restore(PLUGIN_ID).await.unwrap().title, "Back");
}

#[tokio::test]
async fn test_inc_writes_current_plus_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "A", 41))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_json(json!({ "hearts": 42 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "A", 42))))
        .expect(1)
        .mount(&server)
        .await;

    let updated = market(&server).plugins().inc(PLUGIN_ID, Reaction::Heart).await.unwrap();
    assert_eq!(updated.hearts, 42);
}

// Two overlapping increments both read 0 and both write 1: one is lost.
#[tokio::test]
async fn test_concurrent_inc_loses_an_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "A", 0))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_json(json!({ "hearts": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "A", 1))))
        .expect(2)
        .mount(&server)
        .await;

    let store = market(&server).plugins();
    let (a, b) = tokio::join!(
        store.inc(PLUGIN_ID, Reaction::Heart),
        store.inc(PLUGIN_ID, Reaction::Heart)
    );
    assert_eq!(a.unwrap().hearts, 1);
    assert_eq!(b.unwrap().hearts, 1);
}

#[tokio::test]
async fn test_add_subcategory_patches_subs() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/categories/c1"))
        .and(body_json(json!({ "subs": ["Plugins", "Themes"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "_id": "c1", "name": "Wordpress", "subs": ["Plugins", "Themes"]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let category = Category {
        id: "c1".into(),
        name: "Wordpress".into(),
        subs: vec!["Plugins".into()],
    };
    let store = market(&server).categories();
    let updated = store.add_subcategory(&category, " Themes ").await.unwrap();
    assert_eq!(updated.subs, vec!["Plugins", "Themes"]);

    // already present: no request
    let same = store.add_subcategory(&updated, "Plugins").await.unwrap();
    assert_eq!(same, updated);
}

#[tokio::test]
async fn test_comment_validation_sends_nothing() {
    let server = MockServer::start().await;
    let err = market(&server)
        .comments()
        .create_for_plugin(PLUGIN_ID, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_comment_and_contact_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comments/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "_id": "c1", "pluginId": PLUGIN_ID, "content": "Handy", "user_name": "Ann"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contact/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "_id": "m1", "email": "bob@example.com", "msg": "Hello"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contact/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "success": false, "message": "Not found" })))
        .mount(&server)
        .await;

    let market = market(&server);
    let comment = market.comments().get("c1").await.unwrap();
    assert_eq!(comment.plugin_id, PLUGIN_ID);
    assert_eq!(comment.author(), "Ann");

    let message = market.contact().get("m1").await.unwrap();
    assert_eq!(message.email, "bob@example.com");
    assert_eq!(message.message, "Hello");

    let err = market.contact().get("gone").await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_request_attachment_is_a_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/requests"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "phone": "",
            "text": "A tab manager",
            "file": "data:text/plain;base64,aGk="
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok(json!({ "_id": "r1" }))))
        .expect(1)
        .mount(&server)
        .await;

    let file = Attachment::new("brief.txt", "text/plain", b"hi".to_vec());
    let payload = NewRequest::new("Ann", "ann@example.com", "", "A tab manager", Some(&file)).unwrap();
    let created = market(&server).requests().create(&payload).await.unwrap();
    assert_eq!(created.id, "r1");
}

#[tokio::test]
async fn test_auth_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .and(header("Authorization", "Bearer google-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(common::user("user"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/user-login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Invalid credentials" })))
        .mount(&server)
        .await;

    let auth = market(&server).auth();
    let user = auth.google("google-token").await.unwrap();
    assert_eq!(user.name, "Ann");
    assert!(!user.is_admin());

    assert_eq!(auth.me().await.unwrap(), None);

    let err = auth.login("ann@example.com", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn test_options_from_env() {
    dotenv().ok();
    std::env::remove_var("MARKETPLACE_API_BASE");
    std::env::set_var("MARKETPLACE_PAGE_HOST", "127.0.0.1");
    let options = ClientOptions::from_env().unwrap();
    assert_eq!(options.api_base, "http://127.0.0.1:5000/api");

    std::env::set_var("MARKETPLACE_API_BASE", "https://api.example.com/api/");
    let options = ClientOptions::from_env().unwrap();
    assert_eq!(options.api_base, "https://api.example.com/api");

    std::env::remove_var("MARKETPLACE_API_BASE");
    std::env::remove_var("MARKETPLACE_PAGE_HOST");
}
