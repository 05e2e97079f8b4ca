//! User management service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, StaffMember, UpdateUser, User, UserQuery},
    repository::Repository,
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn search_users(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    pub async fn list_staff(&self) -> AppResult<Vec<StaffMember>> {
        self.repository.users.list_staff().await
    }

    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.get_by_email(&user.email).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
        let hash = hash_password(&user.password)?;
        let created = self.repository.users.create(&user, &hash).await?;
        tracing::info!(user_id = created.id, role = %created.role, "User created");
        Ok(created)
    }

    pub async fn update_user(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        let hash = user.password.as_deref().map(hash_password).transpose()?;
        self.repository.users.update(id, &user, hash.as_deref()).await
    }

    /// Delete a user; an admin cannot delete their own account
    pub async fn delete_user(&self, id: i32, current_user_id: i32) -> AppResult<()> {
        if id == current_user_id {
            return Err(AppError::BadRequest("Cannot delete your own account".to_string()));
        }
        self.repository.users.delete(id).await
    }
}
