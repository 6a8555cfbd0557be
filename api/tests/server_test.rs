mod common;

use serde_json::{Value, json};
use test_context::test_context;

use common::ApiContext;

#[test_context(ApiContext)]
#[tokio::test]
async fn serves_locale_bundles_with_english_fallback(ctx: &mut ApiContext) {
    let spanish = ctx.server.get("/messages/es-MX").await.json::<Value>();
    let fallback = ctx.server.get("/messages/fr").await.json::<Value>();

    assert_eq!(spanish["locale"], "es");
    assert_eq!(fallback["locale"], "en");
    assert_eq!(fallback["title"], "StyleBuddy");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn health_lists_registered_flows(ctx: &mut ApiContext) {
    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "ok",
            "flows": [
                "rateOutfitFlow",
                "suggestOutfitFlow",
                "suggestOutfitFromPhotoFlow",
                "suggestHairstyleFlow"
            ]
        })
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn publishes_openapi_document(ctx: &mut ApiContext) {
    let document = ctx.server.get("/api-docs/openapi.json").await.json::<Value>();

    let paths = document["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/actions/rate-outfit"));
    assert!(paths.contains_key("/api/suggest-hairstyle"));
    assert!(paths.contains_key("/messages/{locale}"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn exposes_metrics(ctx: &mut ApiContext) {
    ctx.server.get("/health").await.assert_status_ok();

    ctx.server.get("/metrics").await.assert_status_ok();
}
