//! Tag Repository Implementation
//!
//! PostgreSQL implementation of the TagRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Page, PageRequest, Tag, TagRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
        }
    }
}

/// PostgreSQL tag repository implementation.
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_all(&self, page: PageRequest) -> Result<Page<Tag>, AppError> {
        let total = self.count().await?;

        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name
            FROM tags
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(Tag::from).collect(),
            page,
            total,
        ))
    }

    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<Tag>, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM certificate_tags WHERE certificate_id = $1",
        )
        .bind(certificate_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN certificate_tags ct ON ct.tag_id = t.id
            WHERE ct.certificate_id = $1
            ORDER BY t.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(certificate_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(Tag::from).collect(),
            page,
            total,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Tag::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Tag::from))
    }

    async fn find_most_used_tag_of_top_spender(&self) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            WITH top_user AS (
                SELECT user_id
                FROM user_orders
                GROUP BY user_id
                ORDER BY SUM(cost) DESC, user_id
                LIMIT 1
            )
            SELECT t.id, t.name
            FROM tags t
            JOIN certificate_tags ct ON ct.tag_id = t.id
            JOIN user_orders o ON o.certificate_id = ct.certificate_id
            WHERE o.user_id = (SELECT user_id FROM top_user)
            GROUP BY t.id, t.name
            ORDER BY COUNT(*) DESC, t.id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, name: &str) -> Result<Tag, AppError> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, format!("Tag '{}' already exists", name)))?;

        Ok(Tag::from(row))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tag with id {} not found", id)));
        }

        Ok(())
    }
}
