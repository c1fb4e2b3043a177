//! REST client tests against a mock HTTP server

use bizcard::api::{
    ApiClient, ApiError, AuthApi, DashboardApi, LoginRequest, RegisterRequest, ResourceId,
    TemplateApi,
};
use bizcard::auth::{AuthToken, Credentials};
use bizcard::config::ApiSettings;
use bizcard::templates::{ColorScheme, FontPair, TemplateCategory, TemplateInput};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, credentials: Credentials) -> ApiClient {
    let settings = ApiSettings {
        base_url: format!("{}/api/", server.uri()),
        request_timeout_ms: 2_000,
        ..ApiSettings::default()
    };
    ApiClient::new(&settings, credentials).unwrap()
}

fn template_json(id: serde_json::Value, name: &str, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} layout"),
        "category": category,
        "isPremium": false,
        "isActive": true,
        "thumbnail": "https://cdn.example.com/t.png",
        "defaultColors": {"primary": "#000000", "secondary": "#111111", "text": "#222222", "background": "#ffffff"},
        "defaultFonts": {"heading": "Inter", "body": "Inter"},
        "features": ["QR code"],
        "usageCount": 3
    })
}

fn input(name: &str) -> TemplateInput {
    TemplateInput {
        name: name.to_string(),
        description: "Bright".to_string(),
        category: TemplateCategory::Creative,
        is_premium: true,
        is_active: true,
        thumbnail: "https://cdn.example.com/neon.png".to_string(),
        default_colors: ColorScheme::default(),
        default_fonts: FontPair::default(),
        features: vec!["Animated header".to_string()],
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "Ada", "email": "ada@example.com"},
            "token": "tok-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server, Credentials::default())
        .login(LoginRequest {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.id, ResourceId::from("1"));
    assert_eq!(response.token, "tok-1");
}

#[tokio::test]
async fn login_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client(&server, Credentials::default())
        .login(LoginRequest {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }
    );
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn failure_without_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client(&server, Credentials::default())
        .register(RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret-pass".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn current_user_uses_explicit_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer saved-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u-9", "name": "Ada", "email": "ada@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = client(&server, Credentials::default())
        .current_user(AuthToken::new("saved-token"))
        .await
        .unwrap();
    assert_eq!(account.id.as_str(), "u-9");
}

// =============================================================================
// TEMPLATES
// =============================================================================

#[tokio::test]
async fn list_templates_accepts_numeric_and_string_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            template_json(json!(1), "Business Card Pro", "business"),
            template_json(json!("t-2"), "Circuit", "technology"),
        ])))
        .mount(&server)
        .await;

    let templates = client(&server, Credentials::default())
        .list_templates()
        .await
        .unwrap();

    let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "t-2"]);
    assert_eq!(templates[1].category, TemplateCategory::Technology);
}

#[tokio::test]
async fn mutations_send_bearer_token() {
    let server = MockServer::start().await;
    let credentials = Credentials::default();
    credentials.set(AuthToken::new("tok-1"));

    Mock::given(method("POST"))
        .and(path("/api/templates"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(serde_json::to_value(input("Neon")).unwrap()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(template_json(json!(10), "Neon", "creative")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/templates/10"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(template_json(json!(10), "Neon II", "creative")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/templates/10"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, credentials);
    let created = api.create_template(input("Neon")).await.unwrap();
    let updated = api
        .update_template(created.id.clone(), input("Neon II"))
        .await
        .unwrap();
    api.delete_template(updated.id).await.unwrap();
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let err = client(&server, Credentials::default())
        .list_templates()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[tokio::test]
async fn dashboard_tolerates_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalProfiles": 2,
            "totalViews": 40
        })))
        .mount(&server)
        .await;

    let stats = client(&server, Credentials::default())
        .dashboard()
        .await
        .unwrap();
    assert_eq!(stats.total_profiles, 2);
    assert_eq!(stats.total_views, 40);
    assert_eq!(stats.total_taps, 0);
    assert!(stats.recent_activity.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let api = client(&server, Credentials::default());
    drop(server);

    let err = api.dashboard().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
}
