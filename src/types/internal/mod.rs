// Internal types - never exposed over HTTP
pub mod auth;
