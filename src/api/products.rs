use poem::http::HeaderMap;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::{AuthGuard, PageRequest};
use crate::stores::{ProductFilter, ProductStore};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::product::{
    AddProductRequest, ProductDetailResponse, ProductDto, ProductListResponse, ProductStatus,
    UpdateProductRequest,
};
use crate::types::internal::auth::{PrincipalKind, RolePolicy};

/// Product endpoints for end users plus the public approved listing
pub struct ProductsApi {
    products: Arc<ProductStore>,
    guard: Arc<AuthGuard>,
}

impl ProductsApi {
    pub fn new(products: Arc<ProductStore>, guard: Arc<AuthGuard>) -> Self {
        Self { products, guard }
    }
}

/// API tags for product endpoints
#[derive(Tags)]
enum ProductTags {
    /// Product listing and management
    Products,
}

#[OpenApi(prefix_path = "/products")]
impl ProductsApi {
    /// User adds/lists a product
    #[oai(path = "/", method = "post", tag = "ProductTags::Products")]
    pub async fn add_product(
        &self,
        headers: &HeaderMap,
        body: Json<AddProductRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let principal =
            self.guard
                .authorize(headers, PrincipalKind::User, &RolePolicy::authenticated())?;

        self.products.add(principal.id, &body).await?;

        Ok(Json(MessageResponse::ok("Product added")))
    }

    /// User fetches all his/her listed products
    #[oai(path = "/", method = "get", tag = "ProductTags::Products")]
    #[allow(clippy::too_many_arguments)]
    pub async fn get_all_products(
        &self,
        headers: &HeaderMap,
        #[oai(name = "searchTerm")] search_term: Query<Option<String>>,
        status: Query<Option<ProductStatus>>,
        #[oai(name = "minPrice")] min_price: Query<Option<f64>>,
        #[oai(name = "maxPrice")] max_price: Query<Option<f64>>,
        #[oai(validator(minimum(value = "1")))] page: Query<Option<u64>>,
        #[oai(validator(minimum(value = "1"), maximum(value = "500")))] limit: Query<Option<u64>>,
    ) -> Result<Json<ProductListResponse>, ApiError> {
        let principal =
            self.guard
                .authorize(headers, PrincipalKind::User, &RolePolicy::authenticated())?;

        let filter = ProductFilter {
            search_term: search_term.0,
            status: status.0,
            min_price: min_price.0,
            max_price: max_price.0,
        };
        let result = self
            .products
            .get_all(&filter, PageRequest::new(page.0, limit.0), Some(principal.id))
            .await?;

        Ok(Json(ProductListResponse {
            success: true,
            message: "Products fetched".to_string(),
            data: result.rows.into_iter().map(ProductDto::from).collect(),
            metadata: result.metadata,
        }))
    }

    /// Fetch all approved products
    ///
    /// Unauthenticated users would see only approved products via this route
    #[oai(path = "/approved", method = "get", tag = "ProductTags::Products")]
    pub async fn get_all_approved_products(
        &self,
        #[oai(name = "searchTerm")] search_term: Query<Option<String>>,
        #[oai(name = "minPrice")] min_price: Query<Option<f64>>,
        #[oai(name = "maxPrice")] max_price: Query<Option<f64>>,
        #[oai(validator(minimum(value = "1")))] page: Query<Option<u64>>,
        #[oai(validator(minimum(value = "1"), maximum(value = "500")))] limit: Query<Option<u64>>,
    ) -> Result<Json<ProductListResponse>, ApiError> {
        let filter = ProductFilter {
            search_term: search_term.0,
            status: Some(ProductStatus::Approved),
            min_price: min_price.0,
            max_price: max_price.0,
        };
        let result = self
            .products
            .get_all(&filter, PageRequest::new(page.0, limit.0), None)
            .await?;

        Ok(Json(ProductListResponse {
            success: true,
            message: "Products fetched".to_string(),
            data: result.rows.into_iter().map(ProductDto::from).collect(),
            metadata: result.metadata,
        }))
    }

    /// User fetches details of one of his/her products
    #[oai(path = "/:id", method = "get", tag = "ProductTags::Products")]
    pub async fn view_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<ProductDetailResponse>, ApiError> {
        let principal =
            self.guard
                .authorize(headers, PrincipalKind::User, &RolePolicy::authenticated())?;

        let product = self
            .products
            .find_by_id(id.0, Some(principal.id))
            .await?
            .ok_or_else(|| ApiError::not_found("Product"))?;

        Ok(Json(ProductDetailResponse {
            success: true,
            message: "Product details fetched".to_string(),
            data: ProductDto::from(product),
        }))
    }

    /// User updates one of his/her listed products
    #[oai(path = "/:id", method = "patch", tag = "ProductTags::Products")]
    pub async fn update_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
        body: Json<UpdateProductRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let principal =
            self.guard
                .authorize(headers, PrincipalKind::User, &RolePolicy::authenticated())?;

        self.products.update(id.0, &body, Some(principal.id)).await?;

        Ok(Json(MessageResponse::ok("Product updated")))
    }

    /// User deletes one of his/her listed products
    #[oai(path = "/:id", method = "delete", tag = "ProductTags::Products")]
    pub async fn delete_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let principal =
            self.guard
                .authorize(headers, PrincipalKind::User, &RolePolicy::authenticated())?;

        self.products.delete(id.0, Some(principal.id)).await?;

        Ok(Json(MessageResponse::ok("Product deleted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TokenService;
    use crate::stores::UserStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::time::Duration;

    struct TestContext {
        api: ProductsApi,
        tokens: Arc<TokenService>,
        user_id: i32,
    }

    async fn setup() -> TestContext {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let users = UserStore::new(db.clone(), Duration::from_secs(60));
        let user_id = users
            .add_user("Ada", "Lovelace", "ada@example.com", "secret123")
            .await
            .expect("Failed to create test user");

        let tokens = Arc::new(
            TokenService::new("test-secret-key-minimum-32-characters-long".to_string()).unwrap(),
        );
        let guard = Arc::new(AuthGuard::new(tokens.clone()));
        let products = Arc::new(ProductStore::new(db, Duration::from_secs(60)));

        TestContext {
            api: ProductsApi::new(products, guard),
            tokens,
            user_id,
        }
    }

    fn user_headers(ctx: &TestContext) -> HeaderMap {
        let token = ctx
            .tokens
            .issue(ctx.user_id, PrincipalKind::User, vec![])
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    fn motor() -> Json<AddProductRequest> {
        Json(AddProductRequest {
            name: "Electric Motor".to_string(),
            price: 100.0,
            description: "White".to_string(),
            quantity: 10,
        })
    }

    #[tokio::test]
    async fn test_add_product_requires_authentication() {
        let ctx = setup().await;
        let headers = HeaderMap::new();

        let result = ctx.api.add_product(&headers, motor()).await;

        assert!(matches!(result, Err(ApiError::MissingAuthHeader(_))));
    }

    #[tokio::test]
    async fn test_add_then_list_own_products() {
        let ctx = setup().await;
        let headers = user_headers(&ctx);

        ctx.api.add_product(&headers, motor()).await.unwrap();

        let response = ctx
            .api
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
            .unwrap();

        assert!(response.success);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].user_id, ctx.user_id);
        assert_eq!(response.metadata.item_count, 1);
    }

    #[tokio::test]
    async fn test_approved_listing_is_public_and_excludes_pending() {
        let ctx = setup().await;
        let headers = user_headers(&ctx);
        ctx.api.add_product(&headers, motor()).await.unwrap();

        // No Authorization header at all - the route is public.
        let response = ctx
            .api
            .get_all_approved_products(
                Query(None),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
            )
            .await
            .unwrap();

        // The freshly added product is still Pending.
        assert!(response.data.is_empty());
        assert_eq!(response.metadata.item_count, 0);
    }

    #[tokio::test]
    async fn test_view_missing_product_is_not_found() {
        let ctx = setup().await;
        let headers = user_headers(&ctx);

        let result = ctx.api.view_product(&headers, Path(999)).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_token_is_rejected_on_user_routes() {
        let ctx = setup().await;
        let token = ctx
            .tokens
            .issue(1, PrincipalKind::Admin, vec![])
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());

        let result = ctx.api.add_product(&headers, motor()).await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }
}
