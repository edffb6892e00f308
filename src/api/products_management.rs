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
    ProductDetailResponse, ProductDto, ProductListResponse, ProductStatus,
};
use crate::types::internal::auth::{PrincipalKind, Role, RolePolicy};

/// Admin endpoints for product moderation
pub struct ProductsManagementApi {
    products: Arc<ProductStore>,
    guard: Arc<AuthGuard>,
}

impl ProductsManagementApi {
    pub fn new(products: Arc<ProductStore>, guard: Arc<AuthGuard>) -> Self {
        Self { products, guard }
    }
}

/// API tags for admin product management
#[derive(Tags)]
enum AdminTags {
    /// Product moderation
    ProductsManagement,
}

#[OpenApi(prefix_path = "/admin/products-management")]
impl ProductsManagementApi {
    /// Admin fetches all products
    #[oai(path = "/products", method = "get", tag = "AdminTags::ProductsManagement")]
    #[allow(clippy::too_many_arguments)]
    pub async fn view_all_products(
        &self,
        headers: &HeaderMap,
        #[oai(name = "searchTerm")] search_term: Query<Option<String>>,
        status: Query<Option<ProductStatus>>,
        #[oai(name = "minPrice")] min_price: Query<Option<f64>>,
        #[oai(name = "maxPrice")] max_price: Query<Option<f64>>,
        #[oai(validator(minimum(value = "1")))] page: Query<Option<u64>>,
        #[oai(validator(minimum(value = "1"), maximum(value = "500")))] limit: Query<Option<u64>>,
    ) -> Result<Json<ProductListResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        let filter = ProductFilter {
            search_term: search_term.0,
            status: status.0,
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

    /// Admin fetches details of a product
    #[oai(
        path = "/products/:id",
        method = "get",
        tag = "AdminTags::ProductsManagement"
    )]
    pub async fn view_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<ProductDetailResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        let product = self
            .products
            .find_by_id(id.0, None)
            .await?
            .ok_or_else(|| ApiError::not_found("Product"))?;

        Ok(Json(ProductDetailResponse {
            success: true,
            message: "Product details fetched".to_string(),
            data: ProductDto::from(product),
        }))
    }

    /// Admin suspends/bans a product
    #[oai(
        path = "/products/:id/suspend",
        method = "patch",
        tag = "AdminTags::ProductsManagement"
    )]
    pub async fn suspend_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        self.products
            .change_status(id.0, ProductStatus::Suspended)
            .await?;

        Ok(Json(MessageResponse::ok("Product suspended")))
    }

    /// Admin removes a product suspension
    #[oai(
        path = "/products/:id/unsuspend",
        method = "patch",
        tag = "AdminTags::ProductsManagement"
    )]
    pub async fn unsuspend_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.guard.authorize(
            headers,
            PrincipalKind::Admin,
            &RolePolicy::allow([Role::Admin]),
        )?;

        self.products
            .change_status(id.0, ProductStatus::Approved)
            .await?;

        Ok(Json(MessageResponse::ok("Suspension removed")))
    }

    /// Admin deletes a product
    #[oai(
        path = "/products/:id",
        method = "delete",
        tag = "AdminTags::ProductsManagement"
    )]
    pub async fn delete_product(
        &self,
        headers: &HeaderMap,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        // Any admin role may remove products.
        self.guard
            .authorize(headers, PrincipalKind::Admin, &RolePolicy::any_role())?;

        self.products.delete(id.0, None).await?;

        Ok(Json(MessageResponse::ok("Product removed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TokenService;
    use crate::stores::UserStore;
    use crate::types::dto::product::AddProductRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::time::Duration;

    struct TestContext {
        api: ProductsManagementApi,
        products: Arc<ProductStore>,
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

        let products = Arc::new(ProductStore::new(db, Duration::from_secs(60)));
        let tokens = Arc::new(
            TokenService::new("test-secret-key-minimum-32-characters-long".to_string()).unwrap(),
        );
        let guard = Arc::new(AuthGuard::new(tokens.clone()));

        TestContext {
            api: ProductsManagementApi::new(products.clone(), guard),
            products,
            tokens,
            user_id,
        }
    }

    fn admin_headers(ctx: &TestContext, roles: Vec<Role>) -> HeaderMap {
        let token = ctx.tokens.issue(1, PrincipalKind::Admin, roles).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    async fn add_product(ctx: &TestContext) -> i32 {
        ctx.products
            .add(
                ctx.user_id,
                &AddProductRequest {
                    name: "Electric Motor".to_string(),
                    price: 100.0,
                    description: "White".to_string(),
                    quantity: 10,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_admin_sees_products_of_every_status() {
        let ctx = setup().await;
        add_product(&ctx).await;
        let headers = admin_headers(&ctx, vec![Role::Admin]);

        let response = ctx
            .api
            .view_all_products(
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

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].status, "Pending");
    }

    #[tokio::test]
    async fn test_suspend_then_unsuspend_product() {
        let ctx = setup().await;
        let id = add_product(&ctx).await;
        let headers = admin_headers(&ctx, vec![Role::Admin]);

        ctx.api.suspend_product(&headers, Path(id)).await.unwrap();
        let product = ctx.products.find_by_id(id, None).await.unwrap().unwrap();
        assert_eq!(product.status, "Suspended");

        ctx.api.unsuspend_product(&headers, Path(id)).await.unwrap();
        let product = ctx.products.find_by_id(id, None).await.unwrap().unwrap();
        assert_eq!(product.status, "Approved");
    }

    #[tokio::test]
    async fn test_moderation_requires_admin_role() {
        let ctx = setup().await;
        let id = add_product(&ctx).await;
        let headers = admin_headers(&ctx, vec![Role::SuperAdmin]);

        let result = ctx.api.suspend_product(&headers, Path(id)).await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_product_admits_any_admin_role() {
        let ctx = setup().await;
        let id = add_product(&ctx).await;
        let headers = admin_headers(&ctx, vec![Role::SuperAdmin]);

        ctx.api.delete_product(&headers, Path(id)).await.unwrap();

        assert!(ctx.products.find_by_id(id, None).await.unwrap().is_none());
    }
}
