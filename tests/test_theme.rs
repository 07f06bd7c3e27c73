#![cfg(feature = "ssr")]

mod common;

#[tokio::test]
async fn theme_preference_sets_cookie() {
    let env = common::TestEnv::start();
    let server = env.server();

    let response = server
        .post("/api/v1/theme")
        .json(&serde_json::json!({ "theme": "dark" }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["class"], "theme-dark");
    assert_eq!(body["mermaid_theme"], "dark");
    assert_eq!(response.cookie("folio_theme").value(), "dark");
}

#[tokio::test]
async fn invalid_theme_rejected() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/api/v1/theme")
        .json(&serde_json::json!({ "theme": "a b" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn syntax_css_follows_stored_theme() {
    let env = common::TestEnv::start();
    let server = env.server();

    let light = server.get("/syntax.css").await.text();

    server
        .post("/api/v1/theme")
        .json(&serde_json::json!({ "theme": "dark" }))
        .await;
    let dark = server.get("/syntax.css").await;
    assert_eq!(dark.header("content-type"), "text/css; charset=utf-8");
    assert_ne!(dark.text(), light);

    let explicit = server
        .get("/syntax.css")
        .add_query_param("theme", "light")
        .await
        .text();
    assert_eq!(explicit, light);
}
