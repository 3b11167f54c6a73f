//! User Service
//!
//! Read access to user accounts.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::{RepositoryResultExt, Resource, ServiceError};
use crate::application::dto::UserResponse;
use crate::domain::{Page, PageRequest, UserRepository};

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users ordered by id
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserResponse>, ServiceError>;

    async fn find(&self, id: i64) -> Result<Option<UserResponse>, ServiceError>;

    async fn count(&self) -> Result<i64, ServiceError>;
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserResponse>, ServiceError> {
        let users = self
            .user_repo
            .find_all(page)
            .await
            .for_resource(Resource::User)?;
        Ok(users.map(UserResponse::from))
    }

    async fn find(&self, id: i64) -> Result<Option<UserResponse>, ServiceError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await
            .for_resource(Resource::User)?;
        Ok(user.map(UserResponse::from))
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        self.user_repo.count().await.for_resource(Resource::User)
    }
}
