// Services layer - token issuance, authorization, pagination, caching
pub mod auth_guard;
pub mod list_cache;
pub mod pagination;
pub mod token_service;

pub use auth_guard::AuthGuard;
pub use list_cache::{CachedPage, FilterClass, ListCache};
pub use pagination::PageRequest;
pub use token_service::TokenService;
