//! Strategy registration and selection tests.


use actix_web::http::StatusCode;
use actix_web::{test, App};

use actix_apikey::http::security::api_key::StrategyRegistryError;
use actix_apikey::http::security::{
    ApiKeyGate, ApiKeySettings, ApiKeyTransform, ApiKeyValidator, DefaultApiKeyStrategy,
    StrategyFactory, StrategyRegistry,
};

use common::*;

fn create_gate(settings: ApiKeySettings) -> ApiKeyGate {
    let registry = StrategyRegistry::new()
        .with_strategy(DefaultApiKeyStrategy::new(settings.default_strategy.clone()))
        .with_strategy(LiveKeyStrategy)
        .with_strategy(BrokenStrategy);
    let factory = StrategyFactory::new(registry, &settings).unwrap();
    let validator = ApiKeyValidator::new(&factory, &settings);
    ApiKeyGate::new(validator, settings)
}

async fn status_for(gate: ApiKeyGate, key: &str) -> StatusCode {
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(gate))
            .service(api_data),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/data")
        .insert_header(("X-API-Key", key))
        .to_request();
    test::call_service(&app, req).await.status()
}

// =============================================================================
// Selection
// =============================================================================

#[actix_web::test]
async fn test_custom_strategy_selected_by_name() {
    let gate = create_gate(test_settings().strategy_type("live"));
    assert_eq!(status_for(gate.clone(), "sk_live_123").await, StatusCode::OK);
    assert_eq!(status_for(gate, "key123").await, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_selection_is_case_insensitive() {
    let gate = create_gate(test_settings().strategy_type("LIVE"));
    assert_eq!(status_for(gate, "sk_live_123").await, StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_strategy_falls_back_to_default() {
    let gate = create_gate(test_settings().strategy_type("missing"));
    assert_eq!(status_for(gate.clone(), "key123").await, StatusCode::OK);
    assert_eq!(status_for(gate, "sk_live_123").await, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_blank_strategy_falls_back_to_default() {
    let gate = create_gate(
        test_settings()
            .strategy_type("  ")
            .suppress_fallback_logging(true),
    );
    assert_eq!(status_for(gate, "key123").await, StatusCode::OK);
}

#[actix_web::test]
async fn test_panicking_strategy_rejects_request() {
    let gate = create_gate(test_settings().strategy_type("broken"));
    assert_eq!(status_for(gate, "key123").await, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_custom_strategy_identity() {
    let gate = create_gate(test_settings().strategy_type("live")).authenticate();
    let app = test::init_service(
        App::new()
            .wrap(ApiKeyTransform::new(gate))
            .service(api_whoami),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "ApiKey sk_live_abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Owner: live-client");
}

// =============================================================================
// Registration
// =============================================================================

#[actix_web::test]
async fn test_registry_without_default_is_rejected() {
    let registry = StrategyRegistry::new().with_strategy(LiveKeyStrategy);
    let result = StrategyFactory::new(registry, &ApiKeySettings::default());
    assert_eq!(
        result.err(),
        Some(StrategyRegistryError::MissingDefaultStrategy)
    );
}

#[actix_web::test]
async fn test_registry_with_two_defaults_is_rejected() {
    let registry = StrategyRegistry::new()
        .with_strategy(DefaultApiKeyStrategy::default())
        .with_strategy(DefaultApiKeyStrategy::default());
    let result = StrategyFactory::new(registry, &ApiKeySettings::default());
    assert_eq!(
        result.err(),
        Some(StrategyRegistryError::DuplicateDefaultStrategy)
    );
}

#[actix_web::test]
async fn test_validator_keeps_resolved_strategy() {
    let settings = test_settings().strategy_type("live");
    let registry = StrategyRegistry::new()
        .with_strategy(DefaultApiKeyStrategy::new(settings.default_strategy.clone()))
        .with_strategy(LiveKeyStrategy);
    let factory = StrategyFactory::new(registry, &settings).unwrap();
    let validator = ApiKeyValidator::new(&factory, &settings);

    assert_eq!(validator.get_strategy().name(), "live");
    assert_eq!(validator.is_valid("sk_live_1"), Ok(true));
    assert_eq!(
        validator.validate_and_get_info("sk_live_1").unwrap().get_name(),
        "live-client"
    );
}
