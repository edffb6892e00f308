use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::product;
use crate::types::dto::common::PageMeta;

/// Moderation status of a product listing
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Pending,
    Approved,
    Suspended,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Pending => "Pending",
            ProductStatus::Approved => "Approved",
            ProductStatus::Suspended => "Suspended",
        }
    }
}

/// Request model for listing a new product
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AddProductRequest {
    #[oai(validator(min_length = 1))]
    pub name: String,

    #[oai(validator(minimum(value = "1")))]
    pub price: f64,

    #[oai(validator(min_length = 1))]
    pub description: String,

    #[oai(validator(minimum(value = "1")))]
    pub quantity: i32,
}

/// Request model for updating a product; absent fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,

    #[oai(validator(minimum(value = "1")))]
    pub price: Option<f64>,

    pub description: Option<String>,

    #[oai(validator(minimum(value = "1")))]
    pub quantity: Option<i32>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub quantity: i32,
    pub status: String,
    pub user_id: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<product::Model> for ProductDto {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            quantity: model.quantity,
            status: model.status,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Envelope for a paginated product listing
#[derive(Object, Debug)]
pub struct ProductListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<ProductDto>,
    pub metadata: PageMeta,
}

/// Envelope for a single product
#[derive(Object, Debug)]
pub struct ProductDetailResponse {
    pub success: bool,
    pub message: String,
    pub data: ProductDto,
}
