//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{CreateUserInput, DomainError, PaginatedUsers, UpdateUserInput, UserRepository};
use crate::models::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::models::UserDto;

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<PaginatedUsers, DomainError> {
        let query = UserEntity::find().order_by_asc(Column::CreatedAt);

        let (users, total) = if let Some(limit) = limit {
            let page = page.unwrap_or(0);
            let paginator = query.paginate(&self.db, limit);
            let total = paginator.num_items().await.unwrap_or(0);
            let items = paginator.fetch_page(page).await?;
            (items, total)
        } else {
            let items = query.all(&self.db).await?;
            let total = items.len() as u64;
            (items, total)
        };

        Ok(PaginatedUsers {
            users: users.into_iter().map(UserDto::from).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserDto>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(UserDto::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    async fn create(&self, input: CreateUserInput) -> Result<UserDto, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_user = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            is_admin: Set(input.is_admin),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_user.insert(&self.db).await?;
        Ok(UserDto::from(result))
    }

    async fn update(&self, id: &str, input: UpdateUserInput) -> Result<UserDto, DomainError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = input.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(is_admin) = input.is_admin {
            active.is_admin = Set(is_admin);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(UserDto::from(result))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
