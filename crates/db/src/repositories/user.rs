//! User repository for identity records.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// National id; unique, immutable after creation.
    pub national_id: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Postal address.
    pub address: String,
    /// Argon2id PHC string, produced by the auth collaborator.
    pub password_hash: String,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by national id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::NationalId.eq(national_id))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user.
    ///
    /// The unique index on `national_id` backs up the pre-insert
    /// existence check under concurrent registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            national_id: Set(input.national_id),
            name: Set(input.name),
            birth_date: Set(input.birth_date),
            address: Set(input.address),
            password_hash: Set(input.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Checks if a national id is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn national_id_exists(&self, national_id: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::NationalId.eq(national_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
