//! User Order Service
//!
//! Handles order placement and order history lookups.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::{RepositoryResultExt, Resource, ServiceError};
use crate::application::dto::{CreateUserOrderRequest, UserOrderItem, UserOrderResponse};
use crate::domain::{
    CertificateRepository, NewUserOrder, OrderRepository, Page, PageRequest, UserRepository,
};

/// User order service trait
#[async_trait]
pub trait UserOrderService: Send + Sync {
    /// List all orders ordered by id
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserOrderItem>, ServiceError>;

    /// List the orders placed by a user
    async fn find_all_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrderItem>, ServiceError>;

    /// List the orders placed for a certificate
    async fn find_all_by_certificate_id(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrderItem>, ServiceError>;

    async fn find(&self, id: i64) -> Result<Option<UserOrderResponse>, ServiceError>;

    async fn count(&self) -> Result<i64, ServiceError>;

    /// Place an order at the certificate's current price
    async fn create(
        &self,
        request: CreateUserOrderRequest,
    ) -> Result<UserOrderResponse, ServiceError>;
}

/// UserOrderService implementation
pub struct UserOrderServiceImpl<O, U, C>
where
    O: OrderRepository,
    U: UserRepository,
    C: CertificateRepository,
{
    order_repo: Arc<O>,
    user_repo: Arc<U>,
    certificate_repo: Arc<C>,
}

impl<O, U, C> UserOrderServiceImpl<O, U, C>
where
    O: OrderRepository,
    U: UserRepository,
    C: CertificateRepository,
{
    pub fn new(order_repo: Arc<O>, user_repo: Arc<U>, certificate_repo: Arc<C>) -> Self {
        Self {
            order_repo,
            user_repo,
            certificate_repo,
        }
    }
}

#[async_trait]
impl<O, U, C> UserOrderService for UserOrderServiceImpl<O, U, C>
where
    O: OrderRepository + 'static,
    U: UserRepository + 'static,
    C: CertificateRepository + 'static,
{
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserOrderItem>, ServiceError> {
        let orders = self
            .order_repo
            .find_all(page)
            .await
            .for_resource(Resource::UserOrder)?;
        Ok(orders.map(UserOrderItem::from))
    }

    async fn find_all_by_user_id(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrderItem>, ServiceError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .for_resource(Resource::User)?
            .ok_or_else(|| ServiceError::not_found(Resource::User, user_id))?;

        let orders = self
            .order_repo
            .find_all_by_user(user_id, page)
            .await
            .for_resource(Resource::UserOrder)?;
        Ok(orders.map(UserOrderItem::from))
    }

    async fn find_all_by_certificate_id(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrderItem>, ServiceError> {
        self.certificate_repo
            .find_by_id(certificate_id)
            .await
            .for_resource(Resource::Certificate)?
            .ok_or_else(|| ServiceError::not_found(Resource::Certificate, certificate_id))?;

        let orders = self
            .order_repo
            .find_all_by_certificate(certificate_id, page)
            .await
            .for_resource(Resource::UserOrder)?;
        Ok(orders.map(UserOrderItem::from))
    }

    async fn find(&self, id: i64) -> Result<Option<UserOrderResponse>, ServiceError> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await
            .for_resource(Resource::UserOrder)?;
        Ok(order.map(UserOrderResponse::from))
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        self.order_repo
            .count()
            .await
            .for_resource(Resource::UserOrder)
    }

    async fn create(
        &self,
        request: CreateUserOrderRequest,
    ) -> Result<UserOrderResponse, ServiceError> {
        self.user_repo
            .find_by_id(request.user_id)
            .await
            .for_resource(Resource::UserOrder)?
            .ok_or_else(|| {
                ServiceError::invalid(
                    Resource::UserOrder,
                    format!("User with id {} does not exist", request.user_id),
                )
            })?;

        let certificate = self
            .certificate_repo
            .find_by_id(request.certificate_id)
            .await
            .for_resource(Resource::UserOrder)?
            .ok_or_else(|| {
                ServiceError::invalid(
                    Resource::UserOrder,
                    format!(
                        "Certificate with id {} does not exist",
                        request.certificate_id
                    ),
                )
            })?;

        let order = self
            .order_repo
            .create(&NewUserOrder {
                user_id: request.user_id,
                certificate_id: certificate.id,
                cost: certificate.price,
            })
            .await
            .for_resource(Resource::UserOrder)?;

        tracing::info!(
            order_id = order.id,
            user_id = order.user_id,
            certificate_id = order.certificate_id,
            cost = order.cost,
            "Order placed"
        );

        Ok(UserOrderResponse::from(order))
    }
}
