mod common;

use common::{app, ok, plugin, requests_to, PLUGIN_ID};
use market_client::app::App;
use market_client::attachment::Attachment;
use market_client::handlers::{PluginForm, Submission, EDIT_MODAL, SUB_PARENT};
use market_client::plugins::ScreenshotEdit;
use market_client::ui::ToastLevel;
use market_client::view::ADMIN_CATEGORIES;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADMIN_PAGE: &str = "https://market.example.com/admin.html";

fn upload() -> Attachment {
    Attachment::new("shot.png", "image/png", b"png".to_vec())
}

fn listing_with_screenshot() -> Value {
    let mut record = plugin(PLUGIN_ID, "Tab Saver", 3);
    record["screenshots"] = json!([{ "url": "old.png" }]);
    record
}

async fn serve_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(listing_with_screenshot())))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_plugin_validates_and_encodes_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/plugins"))
        .and(body_json(json!({
            "title": "Tab Saver",
            "desc": "Save tabs",
            "descText": "<p>Long</p>",
            "tags": ["tabs", "productivity"],
            "category": "Chrome extensions",
            "subcategory": "",
            "screenshots": [{ "url": "data:image/png;base64,cG5n" }],
            "video": "",
            "appLink": "https://app.example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok(plugin(PLUGIN_ID, "Tab Saver", 0))))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server, ADMIN_PAGE, App::public_page());
    let mut form = PluginForm {
        title: " Tab Saver ".into(),
        desc: "Save tabs".into(),
        desc_text: "<p>Long</p>".into(),
        tags: "tabs, , productivity".into(),
        app_link: " https://app.example.com ".into(),
        ..PluginForm::default()
    };

    let outcome = app.create_plugin(&form, &[upload()]).await;
    assert_eq!(outcome, Submission::Invalid("Category is required".into()));
    assert_eq!(app.toasts().last().unwrap().level, ToastLevel::Warning);
    assert!(server.received_requests().await.unwrap().is_empty());

    form.category = "Chrome extensions".into();
    assert_eq!(app.create_plugin(&form, &[upload()]).await, Submission::Sent);
    assert_eq!(app.toasts().last().unwrap().message, "Plugin added");
}

#[tokio::test]
async fn test_save_edit_without_uploads_leaves_screenshots_alone() {
    let server = MockServer::start().await;
    serve_listing(&server).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_json(json!({
            "title": "Tab Saver Pro",
            "desc": "Tab Saver description",
            "descText": "",
            "tags": ["tabs"],
            "category": "Chrome extensions",
            "subcategory": "",
            "video": "",
            "appLink": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "Tab Saver Pro", 3))))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server, ADMIN_PAGE, App::public_page());
    let draft = app.open_edit(PLUGIN_ID).await.unwrap();
    assert_eq!(draft.form.title, "Tab Saver");
    assert_eq!(app.document().attribute(EDIT_MODAL, "aria-hidden").as_deref(), Some("false"));

    let mut form = draft.form.clone();
    form.title = "Tab Saver Pro".into();
    let outcome = app.save_edit(&form, &[], ScreenshotEdit::Replace).await;
    assert_eq!(outcome, Submission::Sent);

    // the record is read once, when the editor opens
    assert_eq!(requests_to(&server, "GET", &format!("/api/plugins/{}", PLUGIN_ID)).await, 1);
    assert_eq!(app.document().attribute(EDIT_MODAL, "aria-hidden").as_deref(), Some("true"));
    assert_eq!(app.state().edit(), None);
    assert_eq!(app.toasts().last().unwrap().message, "Plugin updated");
}

#[tokio::test]
async fn test_save_edit_appends_uploads_to_current_screenshots() {
    let server = MockServer::start().await;
    serve_listing(&server).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_partial_json(json!({
            "screenshots": [{ "url": "old.png" }, { "url": "data:image/png;base64,cG5n" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(listing_with_screenshot())))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server, ADMIN_PAGE, App::public_page());
    let draft = app.open_edit(PLUGIN_ID).await.unwrap();
    let outcome = app.save_edit(&draft.form, &[upload()], ScreenshotEdit::Append).await;
    assert_eq!(outcome, Submission::Sent);
    // opening, then the fresh read before merging
    assert_eq!(requests_to(&server, "GET", &format!("/api/plugins/{}", PLUGIN_ID)).await, 2);
}

#[tokio::test]
async fn test_save_edit_replaces_screenshots() {
    let server = MockServer::start().await;
    serve_listing(&server).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/plugins/{}", PLUGIN_ID)))
        .and(body_partial_json(json!({
            "screenshots": [{ "url": "data:image/png;base64,cG5n" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(plugin(PLUGIN_ID, "Tab Saver", 3))))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server, ADMIN_PAGE, App::public_page());
    let draft = app.open_edit(PLUGIN_ID).await.unwrap();
    let outcome = app.save_edit(&draft.form, &[upload()], ScreenshotEdit::Replace).await;
    assert_eq!(outcome, Submission::Sent);
}

#[tokio::test]
async fn test_save_without_open_editor_sends_nothing() {
    let server = MockServer::start().await;
    let app = app(&server, ADMIN_PAGE, App::public_page());
    let form = PluginForm {
        title: "Tab Saver".into(),
        category: "Chrome extensions".into(),
        ..PluginForm::default()
    };
    let outcome = app.save_edit(&form, &[], ScreenshotEdit::Append).await;
    assert_eq!(outcome, Submission::Invalid("No plugin selected.".into()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_changes_refresh_selects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({ "name": "Shopify", "subs": ["Apps", "Themes"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok(json!({
            "_id": "c3", "name": "Shopify", "subs": ["Apps", "Themes"]
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/categories/c3"))
        .and(body_json(json!({ "subs": ["Apps", "Themes", "Sections"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "_id": "c3", "name": "Shopify", "subs": ["Apps", "Themes", "Sections"]
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            { "_id": "c3", "name": "Shopify", "subs": ["Apps", "Themes"] }
        ]))))
        .mount(&server)
        .await;

    let app = app(&server, ADMIN_PAGE, App::public_page());
    let doc = app.document().clone();
    doc.mount(ADMIN_CATEGORIES);
    doc.mount(SUB_PARENT);

    assert_eq!(app.create_category(" Shopify ", "Apps, Themes, Apps").await, Submission::Sent);
    assert!(doc.html(ADMIN_CATEGORIES).unwrap().contains("Subs: Apps, Themes"));
    assert!(doc.html(SUB_PARENT).unwrap().contains("<option value=\"Shopify\">Shopify</option>"));
    assert_eq!(app.state().categories().len(), 1);

    assert_eq!(app.add_subcategory("Shopify", " Sections ").await, Submission::Sent);
    assert_eq!(app.toasts().last().unwrap().message, "Subcategory added");
    assert_eq!(requests_to(&server, "GET", "/api/categories").await, 2);

    let outcome = app.add_subcategory("Wix", "Widgets").await;
    assert_eq!(outcome, Submission::Invalid("Pick a category".into()));
    assert_eq!(requests_to(&server, "PATCH", "/api/categories/c3").await, 1);
}
