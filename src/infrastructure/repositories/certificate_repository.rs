//! Certificate Repository Implementation
//!
//! PostgreSQL implementation of the CertificateRepository trait.
//! Certificates are loaded in one query and their tags in a second one,
//! keyed by certificate id.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{
    Certificate, CertificateFilter, CertificateRepository, NewCertificate, Page, PageRequest,
    Tag,
};
use crate::shared::error::AppError;

const CERTIFICATE_COLUMNS: &str =
    "c.id, c.name, c.description, c.price, c.duration, c.create_date, c.last_update_date";

#[derive(Debug, sqlx::FromRow)]
struct CertificateRow {
    id: i64,
    name: String,
    description: String,
    price: i32,
    duration: i32,
    create_date: DateTime<Utc>,
    last_update_date: DateTime<Utc>,
}

impl CertificateRow {
    fn into_certificate(self, tags: Vec<Tag>) -> Certificate {
        Certificate {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            create_date: self.create_date,
            last_update_date: self.last_update_date,
            tags,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CertificateTagRow {
    certificate_id: i64,
    id: i64,
    name: String,
}

/// Escape LIKE wildcards so the search text matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append the WHERE clause for `filter` to a query selecting from `certificates c`.
fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, filter: &CertificateFilter) {
    builder.push(" WHERE TRUE");

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search.trim());
        builder
            .push(" AND (c.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    let mut tag_names: Vec<String> = filter
        .tag_names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    tag_names.sort();
    tag_names.dedup();

    if !tag_names.is_empty() {
        let required = tag_names.len() as i64;
        builder
            .push(
                " AND c.id IN (SELECT ct.certificate_id FROM certificate_tags ct \
                 JOIN tags t ON t.id = ct.tag_id WHERE t.name = ANY(",
            )
            .push_bind(tag_names)
            .push(") GROUP BY ct.certificate_id HAVING COUNT(DISTINCT t.id) = ")
            .push_bind(required)
            .push(")");
    }
}

/// PostgreSQL certificate repository implementation.
#[derive(Clone)]
pub struct PgCertificateRepository {
    pool: PgPool,
}

impl PgCertificateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the tags of every certificate in `ids`, ordered by tag id.
    async fn load_tags(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CertificateTagRow>(
            r#"
            SELECT ct.certificate_id, t.id, t.name
            FROM certificate_tags ct
            JOIN tags t ON t.id = ct.tag_id
            WHERE ct.certificate_id = ANY($1)
            ORDER BY t.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            tags.entry(row.certificate_id)
                .or_default()
                .push(Tag::new(row.id, row.name));
        }
        Ok(tags)
    }

    async fn with_tags(&self, rows: Vec<CertificateRow>) -> Result<Vec<Certificate>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.load_tags(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let certificate_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_certificate(certificate_tags)
            })
            .collect())
    }

    /// Replace the tag links of a certificate inside an open transaction.
    async fn link_tags(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        certificate_id: i64,
        tags: &[Tag],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM certificate_tags WHERE certificate_id = $1")
            .bind(certificate_id)
            .execute(&mut **tx)
            .await?;

        if tags.is_empty() {
            return Ok(());
        }

        let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
        sqlx::query(
            r#"
            INSERT INTO certificate_tags (certificate_id, tag_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(certificate_id)
        .bind(&tag_ids)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_constraint(e, "Certificate refers to a tag that does not exist"))?;

        Ok(())
    }
}

fn sorted_tags(tags: &[Tag]) -> Vec<Tag> {
    let mut tags = tags.to_vec();
    tags.sort_by_key(|t| t.id);
    tags.dedup_by_key(|t| t.id);
    tags
}

#[async_trait]
impl CertificateRepository for PgCertificateRepository {
    async fn find_all(
        &self,
        filter: &CertificateFilter,
        page: PageRequest,
    ) -> Result<Page<Certificate>, AppError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM certificates c");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {} FROM certificates c", CERTIFICATE_COLUMNS));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY ")
            .push(filter.sort.field.column())
            .push(" ")
            .push(filter.sort.direction.as_sql())
            .push(", c.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<CertificateRow> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(Page::new(self.with_tags(rows).await?, page, total))
    }

    async fn find_all_by_tag(
        &self,
        tag_id: i64,
        page: PageRequest,
    ) -> Result<Page<Certificate>, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM certificate_tags WHERE tag_id = $1")
                .bind(tag_id)
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, CertificateRow>(&format!(
            r#"
            SELECT {}
            FROM certificates c
            JOIN certificate_tags ct ON ct.certificate_id = c.id
            WHERE ct.tag_id = $1
            ORDER BY c.id
            LIMIT $2 OFFSET $3
            "#,
            CERTIFICATE_COLUMNS
        ))
        .bind(tag_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(self.with_tags(rows).await?, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, AppError> {
        let row = sqlx::query_as::<_, CertificateRow>(&format!(
            "SELECT {} FROM certificates c WHERE c.id = $1",
            CERTIFICATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM certificates")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, certificate: &NewCertificate) -> Result<Certificate, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CertificateRow>(
            r#"
            INSERT INTO certificates (name, description, price, duration)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, duration, create_date, last_update_date
            "#,
        )
        .bind(&certificate.name)
        .bind(&certificate.description)
        .bind(certificate.price)
        .bind(certificate.duration)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_tags(&mut tx, row.id, &certificate.tags).await?;
        tx.commit().await?;

        Ok(row.into_certificate(sorted_tags(&certificate.tags)))
    }

    async fn update(&self, certificate: &Certificate) -> Result<Certificate, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CertificateRow>(
            r#"
            UPDATE certificates
            SET name = $2, description = $3, price = $4, duration = $5,
                last_update_date = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, duration, create_date, last_update_date
            "#,
        )
        .bind(certificate.id)
        .bind(&certificate.name)
        .bind(&certificate.description)
        .bind(certificate.price)
        .bind(certificate.duration)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Certificate with id {} not found", certificate.id))
        })?;

        Self::link_tags(&mut tx, row.id, &certificate.tags).await?;
        tx.commit().await?;

        Ok(row.into_certificate(sorted_tags(&certificate.tags)))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    format!("Certificate with id {} has orders and cannot be deleted", id),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Certificate with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
