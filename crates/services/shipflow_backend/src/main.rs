// File: services/shipflow_backend/src/main.rs
use axum::{routing::get, Router};
use shipflow_common::services::{MemoryShipmentStore, ShipmentStore};
use shipflow_config::load_config;
use shipflow_mrw::routes as mrw_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    shipflow_common::logging::init();

    // One in-process store shared by every carrier route; the host ERP owns
    // the real records in production deployments.
    let store: Arc<dyn ShipmentStore> = Arc::new(MemoryShipmentStore::new());

    let api_router = Router::new().route("/", get(|| async { "Welcome to Shipflow API!" }));

    let api_router = Router::new().nest("/api", {
        let mut router = api_router;
        if shipflow_common::is_mrw_enabled(&config) {
            router = router.merge(mrw_routes(config.clone(), store.clone()));
        } else {
            info!("MRW carrier integration disabled");
        }
        router
    });

    #[allow(unused_mut)] // for the openapi feature it needs to be mutable
    let mut app = api_router.layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use shipflow_mrw::doc::MrwApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Shipflow API",
                version = "0.1.0",
                description = "Shipflow Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Shipflow", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(MrwApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
