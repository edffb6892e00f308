use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::errors::InternalError;
use crate::stores::password;
use crate::types::db::admin::{self, Entity as Admin};
use crate::types::internal::auth::Role;

/// AdminStore holds administrator credentials and role assignments.
/// Admin accounts are created by seeding, never by registration.
pub struct AdminStore {
    db: DatabaseConnection,
}

impl AdminStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<admin::Model>, InternalError> {
        Admin::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find admin by email", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<admin::Model>, InternalError> {
        Admin::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find admin by id", e))
    }

    /// Verify admin login credentials, returning the admin and the parsed
    /// role assignments to encode into the session token.
    pub async fn verify_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(admin::Model, Vec<Role>), InternalError> {
        let admin = self
            .find_by_email(email)
            .await?
            .ok_or(InternalError::UnknownEmail)?;

        if !password::verify(password, &admin.password_hash)? {
            return Err(InternalError::InvalidCredentials);
        }

        let roles = parse_roles(&admin.roles)?;

        Ok((admin, roles))
    }

    /// Seed the super admin account if no admin exists under the email.
    ///
    /// # Returns
    /// * `Ok(true)` when the account was created, `Ok(false)` when it
    ///   already existed
    pub async fn seed_super_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, InternalError> {
        if self.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = password::hash(password)?;
        let roles = serde_json::to_string(&vec![Role::SuperAdmin, Role::Admin])
            .map_err(|e| InternalError::parse("role list", e.to_string()))?;
        let now = Utc::now().timestamp();

        let new_admin = admin::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            roles: Set(roles),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_admin
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert admin", e))?;

        Ok(true)
    }
}

fn parse_roles(raw: &str) -> Result<Vec<Role>, InternalError> {
    serde_json::from_str(raw).map_err(|e| InternalError::parse("role list", e.to_string()))
}
