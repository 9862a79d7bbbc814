mod support;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: &str, path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            &json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["session"]["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = support::make_test_router().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn admin_can_manage_posts_end_to_end() {
    let app = support::make_test_router().await;
    let token = login(&app, "admin", "admin-password").await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            &json!({
                "title": "Hello, World!",
                "summary": "a teaser",
                "body": "the full text"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    assert_eq!(created["slug"], "hello-world");

    let (status, listed) = send(&app, get("/api/v1/posts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Hello, World!");

    let (status, fetched) = send(&app, get("/api/v1/posts/hello-world")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["body"], "the full text");
    assert_eq!(fetched["summary"], "a teaser");

    let (status, deleted) = send(&app, authed("DELETE", "/api/v1/posts/hello-world", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["title"], "Hello, World!");
    assert_eq!(deleted["slug"], "hello-world");

    let (status, body) = send(&app, get("/api/v1/posts/hello-world")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn repeated_titles_get_suffixed_slugs_over_http() {
    let app = support::make_test_router().await;
    let token = login(&app, "admin", "admin-password").await;

    let mut slugs = Vec::new();
    for _ in 0..3 {
        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/posts",
                Some(&token),
                &json!({ "title": "Weekly Update", "summary": "s", "body": "b" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        slugs.push(created["slug"].as_str().unwrap().to_owned());
    }
    assert_eq!(slugs, ["weekly-update", "weekly-update-1", "weekly-update-2"]);

    // Each suffixed slug resolves to its own post.
    for slug in &slugs {
        let (status, fetched) = send(&app, get(&format!("/api/v1/posts/{slug}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["slug"], slug.as_str());
    }
}

#[tokio::test]
async fn mutations_require_a_session() {
    let app = support::make_test_router().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/posts",
            None,
            &json!({ "title": "t", "summary": "s", "body": "b" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/posts",
            Some("garbage.token"),
            &json!({ "title": "t", "summary": "s", "body": "b" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed("DELETE", "/api/v1/posts/anything", "nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn members_cannot_create_or_delete_posts() {
    let app = support::make_test_router().await;

    let (status, registered) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            &json!({ "username": "reader", "password": "reader-pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registered["is_superuser"], false);

    let token = login(&app, "reader", "reader-pass").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            &json!({ "title": "t", "summary": "s", "body": "b" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _) = send(&app, authed("DELETE", "/api/v1/posts/anything", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_reflects_the_session_owner() {
    let app = support::make_test_router().await;
    let token = login(&app, "admin", "admin-password").await;

    let (status, profile) = send(&app, authed("GET", "/api/v1/auth/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["username"], "admin");
    assert_eq!(profile["user"]["is_superuser"], true);

    let actions: Vec<_> = profile["capabilities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"create"));
    assert!(actions.contains(&"delete"));

    let (status, _) = send(&app, get("/api/v1/auth/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = support::make_test_router().await;

    let request = || {
        json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            &json!({ "username": "reader", "password": "reader-pass" }),
        )
    };
    let (status, _) = send(&app, request()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn invalid_payloads_are_rejected_as_bad_requests() {
    let app = support::make_test_router().await;
    let token = login(&app, "admin", "admin-password").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/posts",
            Some(&token),
            &json!({ "title": "   ", "summary": "s", "body": "b" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            &json!({ "username": "bob", "password": "short" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
