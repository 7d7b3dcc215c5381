mod common;

use common::{market, ok, plugin, OTHER_ID, PLUGIN_ID};
use market_client::plugins::{Plugin, PluginFilter};
use market_client::ui::{ToastLevel, ToastStack};
use market_client::view::{
    ClickModifiers, Document, Rendered, Views, DETAIL, DETAIL_TAGS, HOME_GRID, LISTING, RELATED,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn views(server: &MockServer, location: &str) -> (Views, ToastStack) {
    let toasts = ToastStack::new();
    let views = Views::new(Document::at(location), market(server), toasts.clone());
    (views, toasts)
}

#[tokio::test]
async fn test_cards_match_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            plugin(PLUGIN_ID, "Tab Saver", 5),
            plugin(OTHER_ID, "Dark Reader", 0),
            plugin("64b7f0c2a1b2c3d4e5f6071a", "Color Pick", 12)
        ]))))
        .mount(&server)
        .await;

    let (views, _) = views(&server, "https://market.example.com/index.html");
    let doc = views.document().clone();
    doc.mount(HOME_GRID);

    assert_eq!(views.render_listing(HOME_GRID, &PluginFilter::new()).await, Rendered::Items(3));
    let html = doc.html(HOME_GRID).unwrap();
    assert_eq!(html.matches("<article class=\"card\"").count(), 3);
    assert!(html.contains(&format!("<button data-act=\"heart\" data-id=\"{}\">❤ 5</button>", PLUGIN_ID)));
    assert!(html.contains("❤ 12"));

    // idempotent: a second render replaces, never appends
    views.render_listing(HOME_GRID, &PluginFilter::new()).await;
    assert_eq!(doc.html(HOME_GRID).unwrap(), html);
}

#[tokio::test]
async fn test_unmounted_container_makes_no_request() {
    let server = MockServer::start().await;
    let (views, _) = views(&server, "https://market.example.com/index.html");
    assert_eq!(views.render_listing(LISTING, &PluginFilter::new()).await, Rendered::Skipped);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_failure_renders_inline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false, "message": "db down" })))
        .mount(&server)
        .await;

    let (views, _) = views(&server, "https://market.example.com/listing.html");
    views.document().mount(LISTING);
    let rendered = views.render_listing(LISTING, &PluginFilter::new()).await;
    assert_eq!(rendered, Rendered::Failed("Failed to load: db down".into()));
    assert_eq!(
        views.document().html(LISTING).unwrap(),
        "<p class=\"error\">Failed to load: db down</p>"
    );
}

// Two renders of one container are not ordered: the response that resolves
// last is what stays on screen, even if it answers the older request.
#[tokio::test]
async fn test_later_resolving_render_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("q", "old"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok(json!([plugin(PLUGIN_ID, "Old Result", 0)])))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("q", "new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([plugin(OTHER_ID, "New Result", 0)]))))
        .mount(&server)
        .await;

    let (views, _) = views(&server, "https://market.example.com/listing.html");
    views.document().mount(LISTING);
    let old = PluginFilter::new().query("old");
    let new = PluginFilter::new().query("new");
    tokio::join!(views.render_listing(LISTING, &old), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        views.render_listing(LISTING, &new).await
    });

    let html = views.document().html(LISTING).unwrap();
    assert!(html.contains("Old Result"));
    assert!(!html.contains("New Result"));
}

#[tokio::test]
async fn test_detail_without_id_makes_no_request() {
    let server = MockServer::start().await;
    let (views, _) = views(&server, "https://market.example.com/detail.html");
    views.document().mount(DETAIL);
    let rendered = views.render_detail(DETAIL, None, false).await;
    assert_eq!(rendered, Rendered::Failed("Plugin not found".into()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_detail_with_zero_screenshots_and_related() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "Tab Saver", 3))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}/comments", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("category", "Chrome extensions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            plugin(PLUGIN_ID, "Tab Saver", 3),
            plugin(OTHER_ID, "Dark Reader", 0)
        ]))))
        .mount(&server)
        .await;
    // tag query fails; related still renders from the category query
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("tags", "tabs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let location = format!("https://market.example.com/detail.html?id={}", PLUGIN_ID);
    let (views, toasts) = views(&server, &location);
    let doc = views.document().clone();
    doc.mount(DETAIL);
    doc.mount(RELATED);

    let rendered = views.render_detail(DETAIL, Some(PLUGIN_ID), false).await;
    assert_eq!(rendered, Rendered::Items(1));
    let html = doc.html(DETAIL).unwrap();
    assert!(html.contains("<h1>Tab Saver</h1>"));
    assert!(!html.contains("mainScreenshot"));
    assert!(!html.contains("screenshot-link"));
    assert!(html.contains("No comments yet."));
    assert!(html.contains("Sign in to comment"));

    let related = doc.html(RELATED).unwrap();
    assert!(related.contains("Dark Reader"));
    assert!(!related.contains("Tab Saver"));
    assert!(toasts.toasts().is_empty());
    // sidebars that are not on the page are left alone
    assert!(!doc.is_mounted(DETAIL_TAGS));
}

#[tokio::test]
async fn test_related_failure_replaces_stale_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/plugins"))
        .and(query_param("category", "Chrome extensions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false, "message": "db down" })))
        .mount(&server)
        .await;

    let (views, toasts) = views(&server, "https://market.example.com/detail.html");
    let doc = views.document().clone();
    doc.mount(RELATED);
    doc.set_html(RELATED, "<li>Previous listing's neighbour</li>".into());

    let current: Plugin = serde_json::from_value(plugin(PLUGIN_ID, "Tab Saver", 0)).unwrap();
    let rendered = views.render_related(RELATED, &current).await;
    assert_eq!(rendered, Rendered::Failed("db down".into()));
    assert_eq!(doc.html(RELATED).unwrap(), "<p class=\"error\">db down</p>");
    assert!(toasts.toasts().is_empty());
}

#[tokio::test]
async fn test_detail_load_failure_toasts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "success": false, "message": "Not found" })))
        .mount(&server)
        .await;

    let (views, toasts) = views(&server, "https://market.example.com/detail.html");
    views.document().mount(DETAIL);
    views.render_detail(DETAIL, Some(PLUGIN_ID), true).await;
    assert_eq!(views.document().html(DETAIL).unwrap(), "<p class=\"error\">Not found</p>");
    let toast = toasts.last().unwrap();
    assert_eq!(toast.message, "Failed to load plugin: Not found");
    assert_eq!(toast.level, ToastLevel::Error);
}

#[tokio::test]
async fn test_thumbnail_click() {
    let server = MockServer::start().await;
    let (views, _) = views(&server, "https://market.example.com/detail.html");
    let doc = views.document().clone();

    views.thumbnail_click("two.png", ClickModifiers::default());
    assert_eq!(doc.attribute("mainScreenshotImg", "src").as_deref(), Some("two.png"));
    assert!(doc.opened_tabs().is_empty());

    views.thumbnail_click("three.png", ClickModifiers { ctrl: false, meta: true });
    assert_eq!(doc.opened_tabs(), vec!["three.png"]);
}
