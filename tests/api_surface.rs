//! End-to-end tests for the local JSON API, static files and CORS handling.

use reqwest::{Method, StatusCode};

mod common;

use common::{client, scratch_dir, spawn_host, test_config};

#[tokio::test]
async fn test_options_on_any_path() {
    let host = spawn_host(test_config(&scratch_dir(), &[])).await;

    for path in ["/", "/api/env", "/api/proxy/ollama/api/chat", "/no/such/thing"] {
        let res = client()
            .request(Method::OPTIONS, host.url(path))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
        let headers = res.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert!(res.bytes().await.unwrap().is_empty());
    }

    host.stop();
}

#[tokio::test]
async fn test_env_without_file_is_null() {
    let host = spawn_host(test_config(&scratch_dir(), &[])).await;

    let res = client().get(host.url("/api/env")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "apiKey": null }));

    host.stop();
}

#[tokio::test]
async fn test_env_reads_key() {
    let dir = scratch_dir();
    std::fs::write(dir.join(".env"), "OTHER=x\nGEMINI_API_KEY=\"abc123\"\n").unwrap();
    let host = spawn_host(test_config(&dir, &[])).await;

    let body: serde_json::Value = client()
        .get(host.url("/api/env"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({ "apiKey": "abc123" }));

    host.stop();
}

#[tokio::test]
async fn test_templates_default_to_empty_object() {
    let host = spawn_host(test_config(&scratch_dir(), &[])).await;

    let res = client().get(host.url("/api/templates")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), "{}");

    host.stop();
}

#[tokio::test]
async fn test_templates_round_trip() {
    let host = spawn_host(test_config(&scratch_dir(), &[])).await;

    let res = client()
        .post(host.url("/api/templates"))
        .header("content-type", "application/json")
        .body(r#"{"a":1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let ack: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ack, serde_json::json!({ "status": "ok" }));

    let stored: serde_json::Value = client()
        .get(host.url("/api/templates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored, serde_json::json!({ "a": 1 }));

    host.stop();
}

#[tokio::test]
async fn test_invalid_template_leaves_previous_document() {
    let dir = scratch_dir();
    let host = spawn_host(test_config(&dir, &[])).await;

    let res = client()
        .post(host.url("/api/templates"))
        .body(r#"{"keep":[1,2,3]}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let before = std::fs::read(dir.join("src").join("user_templates.json")).unwrap();

    let res = client()
        .post(host.url("/api/templates"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("invalid template JSON"));

    let after = std::fs::read(dir.join("src").join("user_templates.json")).unwrap();
    assert_eq!(before, after);

    host.stop();
}

#[tokio::test]
async fn test_static_files_and_unknown_post() {
    let dir = scratch_dir();
    std::fs::create_dir_all(dir.join("public")).unwrap();
    std::fs::write(dir.join("public").join("index.html"), "<h1>chat</h1>").unwrap();
    let host = spawn_host(test_config(&dir, &[])).await;

    let res = client().get(host.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.text().await.unwrap(), "<h1>chat</h1>");

    let res = client().head(host.url("/index.html")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-length"], "13");
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client().get(host.url("/missing.js")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client().post(host.url("/index.html")).body("x").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client().put(host.url("/api/templates")).body("{}").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);

    host.stop();
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let host = spawn_host(test_config(&scratch_dir(), &[])).await;

    let res = client()
        .get(host.url("/api/env"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = client().get(host.url("/api/env")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    host.stop();
}
