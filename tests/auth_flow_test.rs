use migration::{Migrator, MigratorTrait};
use poem::http::HeaderMap;
use poem_openapi::{param::Query, payload::Json};
use sea_orm::Database;
use std::sync::Arc;
use std::time::Duration;

use marketplace_backend::api::{AuthApi, ProductsApi, UsersManagementApi};
use marketplace_backend::errors::{ApiError, AuthError};
use marketplace_backend::services::{AuthGuard, TokenService};
use marketplace_backend::stores::{AdminStore, ProductStore, UserStore};
use marketplace_backend::types::dto::auth::{LoginRequest, RegisterRequest};
use marketplace_backend::types::dto::product::AddProductRequest;

const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

struct TestApp {
    auth: AuthApi,
    products: ProductsApi,
    users_management: UsersManagementApi,
    users: Arc<UserStore>,
    admins: Arc<AdminStore>,
}

async fn setup() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let users = Arc::new(UserStore::new(db.clone(), Duration::from_secs(60)));
    let admins = Arc::new(AdminStore::new(db.clone()));
    let products = Arc::new(ProductStore::new(db, Duration::from_secs(60)));
    let tokens = Arc::new(TokenService::new(TEST_SECRET.to_string()).unwrap());
    let guard = Arc::new(AuthGuard::new(tokens.clone()));

    TestApp {
        auth: AuthApi::new(users.clone(), admins.clone(), tokens.clone()),
        products: ProductsApi::new(products, guard.clone()),
        users_management: UsersManagementApi::new(users.clone(), guard),
        users,
        admins,
    }
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
    headers
}

async fn register_and_login(app: &TestApp) -> String {
    app.auth
        .register(Json(RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
        }))
        .await
        .expect("registration failed");

    app.auth
        .login(Json(LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
        }))
        .await
        .expect("login failed")
        .access_token
        .clone()
}

#[tokio::test]
async fn registered_user_can_login_and_manage_products() {
    let app = setup().await;
    let token = register_and_login(&app).await;
    let headers = bearer(&token);

    app.products
        .add_product(
            &headers,
            Json(AddProductRequest {
                name: "Electric Motor".to_string(),
                price: 100.0,
                description: "White".to_string(),
                quantity: 10,
            }),
        )
        .await
        .expect("add product failed");

    let listing = app
        .products
        .get_all_products(
            &headers,
            Query(None),
            Query(None),
            Query(None),
            Query(None),
            Query(None),
            Query(None),
        )
        .await
        .expect("listing failed");

    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].name, "Electric Motor");
    assert_eq!(listing.metadata.page, 1);
    assert_eq!(listing.metadata.item_count, 1);
}

#[tokio::test]
async fn user_token_cannot_reach_admin_surface() {
    let app = setup().await;
    let token = register_and_login(&app).await;
    let headers = bearer(&token);

    let result = app
        .users_management
        .view_all_users(&headers, Query(None), Query(None), Query(None), Query(None))
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden(_))));
}

#[tokio::test]
async fn suspension_blocks_the_next_login_but_not_the_issued_token() {
    let app = setup().await;
    let token = register_and_login(&app).await;
    let stored = app.users.find_by_email("a@b.com").await.unwrap().unwrap();

    app.users
        .change_status(stored.id, marketplace_backend::types::dto::user::UserStatus::Suspended)
        .await
        .unwrap();

    // Re-authentication fails with the suspension error, not an
    // authentication error.
    let login = app
        .auth
        .login(Json(LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
        }))
        .await;
    assert!(matches!(login, Err(AuthError::AccountSuspended(_))));

    // The token issued before suspension still verifies: there is no
    // revocation list, only expiry.
    let headers = bearer(&token);
    let listing = app
        .products
        .get_all_products(
            &headers,
            Query(None),
            Query(None),
            Query(None),
            Query(None),
            Query(None),
            Query(None),
        )
        .await;
    assert!(listing.is_ok());
}

#[tokio::test]
async fn admin_login_issues_a_token_that_opens_the_admin_surface() {
    let app = setup().await;
    app.admins
        .seed_super_admin("rootadmin", "root@example.com", "root-password")
        .await
        .unwrap();

    let response = app
        .auth
        .admin_login(Json(LoginRequest {
            email: "root@example.com".to_string(),
            password: "root-password".to_string(),
        }))
        .await
        .expect("admin login failed");

    let headers = bearer(&response.access_token);
    let listing = app
        .users_management
        .view_all_users(&headers, Query(None), Query(None), Query(None), Query(None))
        .await
        .expect("admin listing failed");

    assert!(listing.success);
    assert!(listing.data.is_empty());
}
