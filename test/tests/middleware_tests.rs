//! ApiKeyTransform middleware tests.


use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use actix_apikey::http::security::api_key::Requirements;
use actix_apikey::http::security::{AllowAnonymous, ApiKeyTransform};

use common::*;

// =============================================================================
// Authorize mode (allow-list)
// =============================================================================

#[actix_web::test]
async fn test_listed_key_is_accepted() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", "key123"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unlisted_key_is_rejected_with_challenge() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", "key999"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let challenge = resp
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    assert_eq!(
        challenge.as_deref(),
        Some("ApiKey realm=\"Test\", charset=\"UTF-8\"")
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "API key required");
}

#[actix_web::test]
async fn test_missing_key_is_rejected() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/data").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_authorization_header_fallback() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("Authorization", "ApiKey abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("Authorization", "apikey abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_other_authorization_schemes_are_ignored() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    for value in ["Bearer abc", "BadHeaderWithoutSpace", "ApiKey "] {
        let req = test::TestRequest::get()
            .uri("/api/data")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", value);
    }
}

#[actix_web::test]
async fn test_named_header_beats_authorization() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", "key999"))
        .insert_header(("Authorization", "ApiKey key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Header selection
// =============================================================================

#[actix_web::test]
async fn test_settings_header_name() {
    let gate = actix_apikey::http::security::ApiKeyGate::from_settings(
        test_settings().header_name("X-Service-Key"),
    );
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(gate))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-Service-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_route_header_pattern() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()).route_header("^/reports/", "X-Report-Key"))
            .service(api_data)
            .service(reports_summary),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports/summary")
        .insert_header(("X-Report-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/reports/summary")
        .insert_header(("X-API-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Other routes keep the configured header
    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_global_override_beats_route_header() {
    let app = test::init_service(
        App::new()
            .wrap(
                ApiKeyTransform::new(authorize_gate())
                    .route_header("^/reports/", "X-Report-Key")
                    .header("X-Global-Key"),
            )
            .service(reports_summary),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports/summary")
        .insert_header(("X-Report-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/reports/summary")
        .insert_header(("X-Global-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_invalid_route_pattern_is_ignored() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()).route_header("([", "X-Report-Key"))
            .service(reports_summary),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/reports/summary")
        .insert_header(("X-API-Key", "key123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Anonymous routes
// =============================================================================

#[actix_web::test]
async fn test_permitted_route_skips_check() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()).permit("^/health$"))
            .service(health)
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/data").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_allow_anonymous_marker() {
    let app = test::init_service(
        App::new()
            .service(
                web::scope("/open").app_data(AllowAnonymous).service(
                    web::resource("/ping")
                        .wrap(ApiKeyTransform::new(authorize_gate()))
                        .route(web::get().to(ping)),
                ),
            )
            .service(
                web::scope("/closed").service(
                    web::resource("/ping")
                        .wrap(ApiKeyTransform::new(authorize_gate()))
                        .route(web::get().to(ping)),
                ),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/open/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/closed/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Authenticate mode
// =============================================================================

#[actix_web::test]
async fn test_identity_reaches_handler() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authenticate_gate()))
            .service(api_whoami),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("X-API-Key", admin_key()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Owner: SystemA");
}

#[actix_web::test]
async fn test_undecodable_key_is_rejected() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authenticate_gate()))
            .service(api_whoami),
    )
    .await;

    for key in ["key123".to_string(), BASE64_NULL.to_string()] {
        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("X-API-Key", key))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

// base64 of the JSON document `null`
const BASE64_NULL: &str = "bnVsbA==";

#[actix_web::test]
async fn test_optional_identity_on_permitted_route() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authenticate_gate()).permit("^/api/optional$"))
            .service(api_optional),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/optional").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Anonymous");
}

#[actix_web::test]
async fn test_middleware_requirements() {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(authorize_gate()).require(Requirements::new().roles(&["Admin"])))
            .service(api_whoami),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("X-API-Key", admin_key()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("X-API-Key", reader_key()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
}
