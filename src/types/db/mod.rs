// Database entities - SeaORM models
pub mod admin;
pub mod product;
pub mod user;
