//! Order Repository Implementation
//!
//! PostgreSQL implementation of the OrderRepository trait over `user_orders`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewUserOrder, OrderRepository, Page, PageRequest, UserOrder};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct UserOrderRow {
    id: i64,
    user_id: i64,
    certificate_id: i64,
    cost: i32,
    purchase_date: DateTime<Utc>,
}

impl From<UserOrderRow> for UserOrder {
    fn from(row: UserOrderRow) -> Self {
        UserOrder {
            id: row.id,
            user_id: row.user_id,
            certificate_id: row.certificate_id,
            cost: row.cost,
            purchase_date: row.purchase_date,
        }
    }
}

/// PostgreSQL order repository implementation.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page through orders whose `column` equals `value`.
    ///
    /// `column` is always one of the fixed names below, never user input.
    async fn find_page_where(
        &self,
        column: &'static str,
        value: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrder>, AppError> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM user_orders WHERE {} = $1",
            column
        ))
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, UserOrderRow>(&format!(
            r#"
            SELECT id, user_id, certificate_id, cost, purchase_date
            FROM user_orders
            WHERE {} = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            column
        ))
        .bind(value)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(UserOrder::from).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserOrder>, AppError> {
        let total = self.count().await?;

        let rows = sqlx::query_as::<_, UserOrderRow>(
            r#"
            SELECT id, user_id, certificate_id, cost, purchase_date
            FROM user_orders
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(UserOrder::from).collect(),
            page,
            total,
        ))
    }

    async fn find_all_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrder>, AppError> {
        self.find_page_where("user_id", user_id, page).await
    }

    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrder>, AppError> {
        self.find_page_where("certificate_id", certificate_id, page)
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserOrder>, AppError> {
        let row = sqlx::query_as::<_, UserOrderRow>(
            r#"
            SELECT id, user_id, certificate_id, cost, purchase_date
            FROM user_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserOrder::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, order: &NewUserOrder) -> Result<UserOrder, AppError> {
        let row = sqlx::query_as::<_, UserOrderRow>(
            r#"
            INSERT INTO user_orders (user_id, certificate_id, cost)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, certificate_id, cost, purchase_date
            "#,
        )
        .bind(order.user_id)
        .bind(order.certificate_id)
        .bind(order.cost)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                format!(
                    "Order refers to unknown user {} or certificate {}",
                    order.user_id, order.certificate_id
                ),
            )
        })?;

        Ok(UserOrder::from(row))
    }
}
