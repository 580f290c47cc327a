//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        JsonCatalogueAdapter, OpenAiAdviceAdapter, OpenAiVisionAdapter, UnconfiguredGateway,
    },
    config::Config,
    error::ApiError,
    web::{
        get_disease_handler, get_plant_handler, list_diseases_handler, list_plants_handler,
        rest::ApiDoc, state::AppState, ws_handler,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::{routing::get, Router};
use remed_lakay_core::ports::{AdviceService, PlantIdentificationService, ReferenceDataSource};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Reference Catalogue ---
    let catalogue = JsonCatalogueAdapter::new(config.catalogue_path.clone())
        .load_catalogue()
        .await?;
    for dangling in catalogue.dangling_remedies() {
        warn!(
            "Disease {} lists unknown remedy plant {}; it will not be shown.",
            dangling.disease_id, dangling.plant_id
        );
    }
    info!(
        "Catalogue loaded: {} plants, {} diseases.",
        catalogue.plants().len(),
        catalogue.diseases().len()
    );

    // --- 3. Initialize Service Adapters ---
    let (advice_adapter, vision_adapter): (
        Arc<dyn AdviceService>,
        Arc<dyn PlantIdentificationService>,
    ) = match &config.ai_api_key {
        Some(api_key) => {
            let openai_config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(&config.ai_base_url);
            let client = Client::with_config(openai_config);
            info!("AI gateway: {}", config.ai_base_url);
            (
                Arc::new(OpenAiAdviceAdapter::new(client.clone(), config.advice_model.clone())),
                Arc::new(OpenAiVisionAdapter::new(client, config.vision_model.clone())),
            )
        }
        None => {
            warn!("No GEMINI_API_KEY or API_KEY set; chat and plant identification are disabled.");
            (Arc::new(UnconfiguredGateway), Arc::new(UnconfiguredGateway))
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        catalogue: Arc::new(catalogue),
        advice_adapter,
        vision_adapter,
    });

    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/ws", get(ws_handler))
        .route("/plants", get(list_plants_handler))
        .route("/plants/{id}", get(get_plant_handler))
        .route("/diseases", get(list_diseases_handler))
        .route("/diseases/{id}", get(get_disease_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
