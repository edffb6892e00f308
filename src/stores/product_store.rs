use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::time::Duration;

use crate::errors::InternalError;
use crate::services::{CachedPage, FilterClass, ListCache, PageRequest};
use crate::types::db::product::{self, Entity as Product};
use crate::types::dto::product::{AddProductRequest, ProductStatus, UpdateProductRequest};

/// Filters for the product listing
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub search_term: Option<String>,
    pub status: Option<ProductStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// The cache key class this filter belongs to. Only the approved/other
    /// distinction participates; everything else shares a snapshot.
    fn filter_class(&self) -> FilterClass {
        if self.status == Some(ProductStatus::Approved) {
            FilterClass::ApprovedProducts
        } else {
            FilterClass::AllProducts
        }
    }
}

/// ProductStore owns product CRUD, moderation status changes and the
/// cached product listings.
pub struct ProductStore {
    db: DatabaseConnection,
    cache: ListCache<CachedPage<product::Model>>,
    cache_ttl: Duration,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection, cache_ttl: Duration) -> Self {
        Self {
            db,
            cache: ListCache::new(),
            cache_ttl,
        }
    }

    /// List a new product for the given user. Listings start `Pending`
    /// until moderation approves them.
    pub async fn add(&self, user_id: i32, request: &AddProductRequest) -> Result<i32, InternalError> {
        let now = Utc::now().timestamp();

        let new_product = product::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(request.name.clone()),
            price: Set(request.price),
            description: Set(request.description.clone()),
            quantity: Set(request.quantity),
            status: Set(ProductStatus::Pending.as_str().to_string()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_product
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert product", e))?;

        self.invalidate_listings();

        Ok(inserted.id)
    }

    /// Fetch a product, optionally scoped to its owner.
    pub async fn find_by_id(
        &self,
        id: i32,
        owner: Option<i32>,
    ) -> Result<Option<product::Model>, InternalError> {
        let mut query = Product::find_by_id(id);
        if let Some(user_id) = owner {
            query = query.filter(product::Column::UserId.eq(user_id));
        }

        query
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find product by id", e))
    }

    /// Apply a partial update. When `owner` is set the product must belong
    /// to that user.
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateProductRequest,
        owner: Option<i32>,
    ) -> Result<(), InternalError> {
        let product = self
            .find_by_id(id, owner)
            .await?
            .ok_or(InternalError::NotFound { resource: "Product" })?;

        let mut active: product::ActiveModel = product.into();
        if let Some(name) = &request.name {
            active.name = Set(name.clone());
        }
        if let Some(price) = request.price {
            active.price = Set(price);
        }
        if let Some(description) = &request.description {
            active.description = Set(description.clone());
        }
        if let Some(quantity) = request.quantity {
            active.quantity = Set(quantity);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update product", e))?;

        self.invalidate_listings();

        Ok(())
    }

    /// Moderation status change (approve/suspend).
    pub async fn change_status(&self, id: i32, status: ProductStatus) -> Result<(), InternalError> {
        let product = self
            .find_by_id(id, None)
            .await?
            .ok_or(InternalError::NotFound { resource: "Product" })?;

        let mut active: product::ActiveModel = product.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update product status", e))?;

        self.invalidate_listings();

        Ok(())
    }

    pub async fn delete(&self, id: i32, owner: Option<i32>) -> Result<(), InternalError> {
        let product = self
            .find_by_id(id, owner)
            .await?
            .ok_or(InternalError::NotFound { resource: "Product" })?;

        product
            .delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete product", e))?;

        self.invalidate_listings();

        Ok(())
    }

    /// The cached product listing. The cache key is the filter class, so a
    /// fresh entry is returned verbatim for any page/limit combination
    /// within the TTL window.
    pub async fn get_all(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
        owner: Option<i32>,
    ) -> Result<CachedPage<product::Model>, InternalError> {
        let class = filter.filter_class();

        if let Some(cached) = self.cache.get(class) {
            return Ok(cached);
        }

        let mut cond = Condition::all();
        if let Some(user_id) = owner {
            cond = cond.add(product::Column::UserId.eq(user_id));
        }
        if let Some(term) = &filter.search_term {
            let pattern = format!("%{}", term);
            cond = cond.add(
                Condition::any()
                    .add(product::Column::Name.like(pattern.as_str()))
                    .add(product::Column::Description.like(pattern.as_str())),
            );
        }
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            cond = cond.add(product::Column::Price.between(min, max));
        }
        if let Some(status) = filter.status {
            cond = cond.add(product::Column::Status.eq(status.as_str()));
        }

        let (offset, limit) = page.bounds();

        let item_count = Product::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count products", e))?;

        let rows = Product::find()
            .filter(cond)
            .order_by_desc(product::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list products", e))?;

        let result = CachedPage {
            metadata: page.meta(item_count),
            rows,
        };

        if !result.rows.is_empty() {
            self.cache.set(class, result.clone(), self.cache_ttl);
        }

        Ok(result)
    }

    fn invalidate_listings(&self) {
        self.cache.invalidate(FilterClass::AllProducts);
        self.cache.invalidate(FilterClass::ApprovedProducts);
    }
}
