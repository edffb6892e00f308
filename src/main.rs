use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use marketplace_backend::api::{
    AuthApi, HealthApi, ProductsApi, ProductsManagementApi, UsersManagementApi,
};
use marketplace_backend::config::{logging, AppSettings};
use marketplace_backend::services::{AuthGuard, TokenService};
use marketplace_backend::stores::{AdminStore, ProductStore, UserStore};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    logging::init_logging().expect("Failed to initialize logging");

    // Configuration is validated up front; a missing JWT secret aborts here
    // instead of surfacing as per-request failures later.
    let settings = AppSettings::from_env().expect("Invalid configuration");

    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(database_url = %settings.database_url, "Connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let token_service =
        Arc::new(TokenService::new(settings.jwt_secret.clone()).expect("JWT secret rejected"));
    let guard = Arc::new(AuthGuard::new(token_service.clone()));

    let users = Arc::new(UserStore::new(db.clone(), settings.cache_ttl));
    let admins = Arc::new(AdminStore::new(db.clone()));
    let products = Arc::new(ProductStore::new(db.clone(), settings.cache_ttl));

    // Seed the super admin account from the environment, skipping when it
    // already exists.
    if let (Some(email), Some(password)) = (
        settings.super_admin_email.as_deref(),
        settings.super_admin_password.as_deref(),
    ) {
        match admins.seed_super_admin("rootadmin", email, password).await {
            Ok(true) => tracing::info!("Super admin account created"),
            Ok(false) => tracing::info!("Super admin account already exists, skipping creation"),
            Err(e) => tracing::error!(error = %e, "Failed to seed super admin"),
        }
    } else {
        tracing::warn!("SUPER_ADMIN_EMAIL/SUPER_ADMIN_PASSWORD not set, skipping seeding");
    }

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(users.clone(), admins.clone(), token_service.clone()),
            ProductsApi::new(products.clone(), guard.clone()),
            UsersManagementApi::new(users.clone(), guard.clone()),
            ProductsManagementApi::new(products.clone(), guard.clone()),
        ),
        "E-commerce API Documentation",
        "1.0.0",
    )
    .server(format!("http://localhost:{}/api/v1", settings.port));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api/v1", api_service)
        .nest("/docs", ui);

    let bind_addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!(addr = %bind_addr, "Starting server");
    tracing::info!("Swagger UI available at http://localhost:{}/docs", settings.port);

    Server::new(TcpListener::bind(bind_addr)).run(app).await
}
