//! docsafe - papelera y reconciliación de almacenamiento
//!
//! Servicio HTTP que mueve usuarios y documentos a una papelera con
//! restauración y borrado definitivo, sincroniza el estado de las cuentas
//! con el proveedor de identidad y limpia los archivos del bucket que ya no
//! referencia ningún documento.
//!
//! Capas:
//!
//! - Domain: entidades y contratos de repositorio (domain/*)
//! - Application: casos de uso, puertos y DTOs (application/*)
//! - Infrastructure: PostgreSQL, object_store e Identity Toolkit (infrastructure/*)
//! - Interfaces: endpoints HTTP y middleware (interfaces/*)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsafe::common::config::AppConfig;
use docsafe::common::db::create_database_pool;
use docsafe::common::di::{AppServiceFactory, AppState};
use docsafe::common::storage::create_object_store;
use docsafe::interfaces::api::create_api_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = AppConfig::from_env();
    let factory = AppServiceFactory::with_config(config.clone());

    let db_pool = Arc::new(
        create_database_pool(&config).await.context("No se pudo inicializar PostgreSQL")?
    );

    let object_store = create_object_store(&config.storage)
        .with_context(|| format!("No se pudo abrir el almacenamiento {}", config.storage.dsn))?;
    tracing::info!("Almacenamiento de objetos: {}", config.storage.dsn);

    let identity_provider = factory.create_identity_provider()
        .context("No se pudo crear el cliente del proveedor de identidad")?;
    if config.identity.access_token.is_none() {
        tracing::warn!("DOCSAFE_IDENTITY_ACCESS_TOKEN no definido: las llamadas al proveedor de identidad irán sin autenticar");
    }

    let repositories = factory.create_repository_services(db_pool, object_store);
    let applications = factory.create_application_services(&repositories, identity_provider);
    let app_state = AppState::new(config.clone(), factory.create_auth_service(), applications);

    let app = Router::new()
        .nest("/api", create_api_routes(app_state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Dirección de servidor inválida")?;

    tracing::info!("Starting docsafe server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
