use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use oidc_agent::{AgentConfig, AgentState, Classified};

async fn classify_handler(classified: Classified) -> Json<Value> {
    Json(json!({
        "classification": classified.classification,
        "index_page": classified.index_page,
    }))
}

fn app() -> Router {
    let config = AgentConfig::builder("https://rp.example.com/callback")
        .logout_url("/logout")
        .skip_uris(["/health", "/static/app.css"])
        .build()
        .unwrap();

    let inner = Router::new().route("/{*rest}", get(classify_handler));

    Router::new()
        .nest("/app", inner)
        .with_state(AgentState::from(config))
}

async fn send(uri: &str) -> (StatusCode, Value) {
    let res = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn routes_each_phase_of_the_flow() {
    let cases = [
        ("/app/health", "skip"),
        ("/app/static/app.css", "skip"),
        ("/app/callback?error=access_denied&state=xyz", "callback_error"),
        ("/app/callback?code=SplxlOBeZQQYbYS6WxSbIA&state=xyz", "authorization_code"),
        ("/app/callback?code=abc&state=%EF%BF%BD", "authorization_code"),
        ("/app/callback?error=%20&code=abc", "callback_error"),
        ("/app/logout", "logout"),
        ("/app/orders/42", "protected"),
        ("/app/callback/", "protected"),
    ];

    for (uri, expected) in cases {
        let (status, body) = send(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["classification"], expected, "{uri}");
    }
}

#[tokio::test]
async fn index_page_falls_back_to_mount_prefix() {
    let (_, body) = send("/app/orders/42").await;
    assert_eq!(body["index_page"], "/app");
}

#[tokio::test]
async fn malformed_callback_is_rejected() {
    let (status, body) = send("/app/callback?state=xyz").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_CALLBACK");
    assert_eq!(
        body["error"]["message"],
        "invalid authorization callback: missing authorization code"
    );
}
