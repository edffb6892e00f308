// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod products;
pub mod products_management;
pub mod users_management;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use products::ProductsApi;
pub use products_management::ProductsManagementApi;
pub use users_management::UsersManagementApi;
