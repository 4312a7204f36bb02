// tests/api_tests.rs

use markup_guard::{config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    spawn_app_with(Config::default()).await
}

async fn spawn_app_with(config: Config) -> String {
    let state = AppState::from_config(config);
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn post_json(
    address: &str,
    path: &str,
    body: serde_json::Value,
) -> (u16, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/sanitize{}", address, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    let status = response.status().as_u16();
    let json = response.json::<serde_json::Value>().await.unwrap_or_default();
    (status, json)
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn sanitize_html_with_default_policy() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/html",
        serde_json::json!({
            "content": "<b>Bold</b> and <i>italic</i> and <script>alert('XSS');</script>"
        }),
    )
    .await;

    assert_eq!(status, 200);
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("<b>Bold</b>"));
    assert!(output.contains("<i>italic</i>"));
    assert!(!output.contains("script"));
    assert!(!output.contains("alert"));
}

#[tokio::test]
async fn sanitize_html_with_request_overrides() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/html",
        serde_json::json!({
            "content": r#"<p class="lead" title="t"><b class="x" onclick="y()">Bold</b> <u>u</u></p>"#,
            "tags": ["b", "i"],
            "attributes": ["id", "class"]
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["output"], r#"<b class="x">Bold</b> u"#);
}

#[tokio::test]
async fn sanitize_html_rejects_invalid_override_names() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/html",
        serde_json::json!({
            "content": "<b>x</b>",
            "tags": ["<script>"]
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn sanitize_css_endpoint() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/css",
        serde_json::json!({
            "content": "background-color: red; color: white; width: expression(alert(1)); font-size: 16px;"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["output"],
        "background-color: red; color: white; font-size: 16px;"
    );
}

#[tokio::test]
async fn strip_endpoints() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/strip-tags",
        serde_json::json!({ "content": "<h1>Header</h1><p>Paragraph <b>bold</b></p>" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["output"], "HeaderParagraph bold");

    let (status, body) = post_json(
        &address,
        "/strip-links",
        serde_json::json!({ "content": "Visit <a href='https://example.org'>Example</a> now!" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["output"], "Visit Example now!");
}

#[tokio::test]
async fn oversized_input_returns_413() {
    let config = Config {
        max_input_bytes: 64,
        ..Config::default()
    };
    let address = spawn_app_with(config).await;

    let (status, body) = post_json(
        &address,
        "/strip-tags",
        serde_json::json!({ "content": "x".repeat(100) }),
    )
    .await;

    assert_eq!(status, 413);
    assert!(body["error"].as_str().unwrap().contains("64"));
}

#[tokio::test]
async fn deeply_nested_input_returns_413() {
    let address = spawn_app().await;

    let (status, body) = post_json(
        &address,
        "/html",
        serde_json::json!({ "content": "<div>".repeat(100_000) }),
    )
    .await;

    assert_eq!(status, 413);
    assert!(body["error"].as_str().unwrap().contains("levels deep"));
}

#[tokio::test]
async fn policy_reflects_configuration() {
    let config = Config {
        allowed_tags: vec!["b".to_string(), "script".to_string()],
        allowed_attributes: vec!["class".to_string(), "onclick".to_string()],
        ..Config::default()
    };
    let address = spawn_app_with(config).await;

    let body = reqwest::Client::new()
        .get(format!("{}/api/sanitize/policy", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json::<serde_json::Value>()
        .await
        .unwrap();

    assert_eq!(body["allow_list"]["tags"], serde_json::json!(["b"]));
    assert_eq!(body["allow_list"]["attributes"], serde_json::json!(["class"]));
    assert!(
        body["forbidden_tags"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("script"))
    );
    assert_eq!(body["url_schemes"], serde_json::json!(["http", "https", "mailto"]));
    assert_eq!(body["limits"]["max_input_bytes"], 524288);
    assert_eq!(body["limits"]["max_nesting_depth"], 512);
    assert_eq!(body["limits"]["max_tags"], 20000);
}
