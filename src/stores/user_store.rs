use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::time::Duration;

use crate::errors::InternalError;
use crate::services::{CachedPage, FilterClass, ListCache, PageRequest};
use crate::stores::password;
use crate::types::db::user::{self, Entity as User};
use crate::types::dto::user::UserStatus;

/// Filters for the user listing
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub search_term: Option<String>,
    pub status: Option<UserStatus>,
}

/// UserStore holds end-user credentials, status and profile data, and
/// serves the cached user listing.
pub struct UserStore {
    db: DatabaseConnection,
    cache: ListCache<CachedPage<user::Model>>,
    cache_ttl: Duration,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, cache_ttl: Duration) -> Self {
        Self {
            db,
            cache: ListCache::new(),
            cache_ttl,
        }
    }

    /// Register a new user. New accounts start in `Pending` status.
    ///
    /// # Returns
    /// * `Ok(id)` - the id of the created user
    /// * `Err(InternalError::DuplicateEmail)` if the email is taken
    pub async fn add_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<i32, InternalError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(InternalError::DuplicateEmail);
        }

        let password_hash = password::hash(password)?;
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            status: Set(UserStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_user
            .insert(&self.db)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    InternalError::DuplicateEmail
                } else {
                    InternalError::database("insert user", e)
                }
            })?;

        self.cache.invalidate(FilterClass::AllUsers);

        Ok(inserted.id)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find user by email", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find user by id", e))
    }

    /// Verify login credentials and return the user on success.
    ///
    /// Credential failures and suspension are distinct: a suspended account
    /// with a correct password fails with `AccountSuspended`, never with a
    /// credential error.
    pub async fn verify_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(InternalError::UnknownEmail)?;

        if !password::verify(password, &user.password_hash)? {
            return Err(InternalError::InvalidCredentials);
        }

        if user.status == UserStatus::Suspended.as_str() {
            return Err(InternalError::AccountSuspended);
        }

        Ok(user)
    }

    /// Administrative status change (suspend/unsuspend/approve).
    pub async fn change_status(&self, id: i32, status: UserStatus) -> Result<(), InternalError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or(InternalError::NotFound { resource: "User" })?;

        let mut active: user::ActiveModel = user.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update user status", e))?;

        self.cache.invalidate(FilterClass::AllUsers);

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or(InternalError::NotFound { resource: "User" })?;

        user.delete(&self.db)
            .await
            .map_err(|e| InternalError::database("delete user", e))?;

        self.cache.invalidate(FilterClass::AllUsers);

        Ok(())
    }

    /// The cached user listing. Serves the memoized page when one is fresh;
    /// otherwise runs the filtered query, computes metadata and memoizes
    /// non-empty results.
    pub async fn get_all(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<CachedPage<user::Model>, InternalError> {
        if let Some(cached) = self.cache.get(FilterClass::AllUsers) {
            return Ok(cached);
        }

        let mut cond = Condition::all();
        if let Some(term) = &filter.search_term {
            let pattern = format!("%{}", term);
            cond = cond.add(
                Condition::any()
                    .add(user::Column::FirstName.like(pattern.as_str()))
                    .add(user::Column::LastName.like(pattern.as_str()))
                    .add(user::Column::Email.like(pattern.as_str())),
            );
        }
        if let Some(status) = filter.status {
            cond = cond.add(user::Column::Status.eq(status.as_str()));
        }

        let (offset, limit) = page.bounds();

        let item_count = User::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count users", e))?;

        let rows = User::find()
            .filter(cond)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list users", e))?;

        let result = CachedPage {
            metadata: page.meta(item_count),
            rows,
        };

        if !result.rows.is_empty() {
            self.cache
                .set(FilterClass::AllUsers, result.clone(), self.cache_ttl);
        }

        Ok(result)
    }
}
