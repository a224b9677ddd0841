use recipe_extractor::api::{handle_extract, handle_scan, ExtractRequest, ScanRequest};
use recipe_extractor::{AppConfig, ImportError, ImportResult, RecipeImporter, VisionConfig};
use serde_json::{json, Value};
use std::time::Duration;

const RECIPE_PAGE: &str = r#"
    <html>
    <head>
        <script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@type": "Recipe",
            "name": "Lemon Bars",
            "recipeIngredient": ["3 lemons", "1 cup sugar"],
            "recipeInstructions": "Mix and bake."
        }
        </script>
    </head>
    <body></body>
    </html>
"#;

async fn recipe_server() -> mockito::ServerGuard {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(RECIPE_PAGE)
        .create_async()
        .await;
    server
        .mock("GET", "/gone")
        .with_status(404)
        .create_async()
        .await;
    server
}

#[tokio::test]
async fn test_builder_url_to_page() {
    let server = recipe_server().await;

    let result = RecipeImporter::builder()
        .url(format!("{}/recipe", server.url()))
        .timeout(Duration::from_secs(5))
        .config(AppConfig::default())
        .build()
        .await
        .unwrap();

    match result {
        ImportResult::Page(recipe) => {
            assert_eq!(recipe.title, "Lemon Bars");
            assert_eq!(recipe.instructions, vec!["Mix and bake."]);
        }
        ImportResult::Scan(_) => panic!("Expected page result"),
    }
}

#[tokio::test]
async fn test_builder_image_uses_overrides() {
    let mut server = mockito::Server::new_async().await;
    let reply = json!({
        "content": [{"type": "text", "text": r#"{"title": "Toast", "sections": [{"ingredients": ["bread"], "instructions": ["Toast it."]}]}"#}]
    });
    let m = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "override-key")
        .match_body(mockito::Matcher::PartialJson(json!({"model": "claude-test"})))
        .with_status(200)
        .with_body(reply.to_string())
        .expect(1)
        .create_async()
        .await;

    let config = AppConfig {
        vision: VisionConfig {
            base_url: server.url(),
            ..VisionConfig::default()
        },
        ..AppConfig::default()
    };
    let result = RecipeImporter::builder()
        .image_base64("data:image/jpeg;base64,/9j/4AAQSkZJRgABAQ")
        .api_key("override-key")
        .model("claude-test")
        .config(config)
        .build()
        .await
        .unwrap();

    let recipe = result.into_scan().expect("Expected scan result");
    assert_eq!(recipe.source, "Unknown");
    assert_eq!(recipe.title, "Toast");
    assert_eq!(recipe.sections[0].name, None);
    m.assert_async().await;
}

#[tokio::test]
async fn test_builder_without_source() {
    let result = RecipeImporter::builder()
        .config(AppConfig::default())
        .build()
        .await;
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[tokio::test]
async fn test_extract_envelopes() {
    let server = recipe_server().await;
    let config = AppConfig::default();

    let ok = handle_extract(
        ExtractRequest {
            url: Some(format!("{}/recipe", server.url())),
        },
        &config,
    )
    .await;
    assert_eq!(ok.status_code(), 200);
    let body: Value = serde_json::to_value(&ok).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["recipe"]["title"], "Lemon Bars");
    assert_eq!(body["recipe"]["ingredients"], json!(["3 lemons", "1 cup sugar"]));
    assert!(body.get("error").is_none());

    let missing = handle_extract(
        ExtractRequest {
            url: Some(format!("{}/gone", server.url())),
        },
        &config,
    )
    .await;
    assert_eq!(missing.status_code(), 400);
    assert_eq!(
        serde_json::to_value(&missing).unwrap(),
        json!({
            "success": false,
            "error": "Recipe not found at this URL. Please check the link and try again."
        })
    );
}

#[tokio::test]
async fn test_scan_envelope_relays_message() {
    let request: ScanRequest = serde_json::from_value(json!({
        "image": "data:image/png;base64,iVBORw0KGgo=",
        "author": "Dad"
    }))
    .unwrap();
    let config = AppConfig {
        vision: VisionConfig {
            api_key: Some("  ".to_string()),
            ..VisionConfig::default()
        },
        ..AppConfig::default()
    };

    let response = handle_scan(request, &config).await;

    assert!(!response.success);
    assert!(response
        .error
        .as_deref()
        .unwrap()
        .contains("ANTHROPIC_API_KEY"));
}
