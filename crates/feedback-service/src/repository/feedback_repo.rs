//! 反馈记录仓储
//!
//! 基于 PostgreSQL 的 FeedbackRepositoryTrait 实现。
//! 评分范围和枚举值在表上有 CHECK 约束兜底，
//! 与 API 边界的 validator 校验保持一致。

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use super::traits::FeedbackRepositoryTrait;
use crate::error::Result;
use crate::models::{
    Feedback, FeedbackChanges, FeedbackFilter, FeedbackStats, NewFeedback, SortField, SortOrder,
};

/// SELECT 列清单，所有查询共用
const FEEDBACK_COLUMNS: &str =
    "id, name, message, rating, category, is_anonymous, status, created_at";

/// 反馈记录仓储
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 确保表结构存在
    ///
    /// 部署无独立迁移流程，启动时幂等建表
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                message TEXT NOT NULL,
                rating INT NOT NULL CHECK (rating BETWEEN 1 AND 5),
                category VARCHAR(20) NOT NULL CHECK (
                    category IN ('course', 'facility', 'instructor', 'suggestion', 'general')
                ),
                is_anonymous BOOLEAN NOT NULL DEFAULT FALSE,
                status VARCHAR(20) NOT NULL DEFAULT 'pending' CHECK (
                    status IN ('pending', 'reviewed', 'resolved')
                ),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedback_category ON feedback(category)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedback_status ON feedback(status)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedback_created ON feedback(created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl FeedbackRepositoryTrait for FeedbackRepository {
    async fn insert(&self, record: &NewFeedback) -> Result<Feedback> {
        let sql = format!(
            r#"
            INSERT INTO feedback (name, message, rating, category, is_anonymous, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {FEEDBACK_COLUMNS}
            "#
        );

        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(&record.name)
            .bind(&record.message)
            .bind(record.rating)
            .bind(record.category)
            .bind(record.is_anonymous)
            .bind(record.status)
            .fetch_one(&self.pool)
            .await?;

        Ok(feedback)
    }

    async fn insert_many(&self, records: &[NewFeedback]) -> Result<Vec<Feedback>> {
        if records.is_empty() {
            return Ok(vec![]);
        }

        // 单条多行 INSERT，依赖语句级原子性，无需手动回滚
        let mut builder = QueryBuilder::new(
            "INSERT INTO feedback (name, message, rating, category, is_anonymous, status) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(record.name.clone())
                .push_bind(record.message.clone())
                .push_bind(record.rating)
                .push_bind(record.category)
                .push_bind(record.is_anonymous)
                .push_bind(record.status);
        });
        builder.push(format!(" RETURNING {FEEDBACK_COLUMNS}"));

        let inserted = builder
            .build_query_as::<Feedback>()
            .fetch_all(&self.pool)
            .await?;

        Ok(inserted)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        let sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE id = $1");

        let feedback = sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(feedback)
    }

    async fn find(
        &self,
        filter: &FeedbackFilter,
        sort_by: SortField,
        sort_order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Feedback>> {
        // 排序字段来自白名单枚举，拼接是安全的；
        // id 作第二排序键保证分页结果稳定
        let sql = format!(
            r#"
            SELECT {FEEDBACK_COLUMNS}
            FROM feedback
            WHERE ($1::text IS NULL OR category::text = $1)
              AND ($2::text IS NULL OR status::text = $2)
              AND ($3::int IS NULL OR rating = $3)
            ORDER BY {} {}, id DESC
            LIMIT $4 OFFSET $5
            "#,
            sort_by.column(),
            sort_order.sql(),
        );

        let rows = sqlx::query_as::<_, Feedback>(&sql)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.rating)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, filter: &FeedbackFilter) -> Result<i64> {
        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM feedback
            WHERE ($1::text IS NULL OR category::text = $1)
              AND ($2::text IS NULL OR status::text = $2)
              AND ($3::int IS NULL OR rating = $3)
            "#,
        )
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }

    async fn update_by_id(&self, id: i64, changes: &FeedbackChanges) -> Result<Option<Feedback>> {
        let sql = format!(
            r#"
            UPDATE feedback
            SET status = COALESCE($2, status),
                message = COALESCE($3, message),
                rating = COALESCE($4, rating),
                category = COALESCE($5, category)
            WHERE id = $1
            RETURNING {FEEDBACK_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Feedback>(&sql)
            .bind(id)
            .bind(changes.status)
            .bind(changes.message.as_deref())
            .bind(changes.rating)
            .bind(changes.category)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM feedback")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn aggregate_stats(&self) -> Result<FeedbackStats> {
        // 空表时 array_agg 返回 NULL，COALESCE 收敛为空数组；
        // 平均分四舍五入到一位小数
        let row: (i64, f64, Vec<String>, Vec<String>) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(ROUND(AVG(rating)::numeric, 1)::float8, 0),
                COALESCE(array_agg(DISTINCT category::text), ARRAY[]::text[]),
                COALESCE(array_agg(DISTINCT status::text), ARRAY[]::text[])
            FROM feedback
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(FeedbackStats {
            total_feedback: row.0,
            average_rating: row.1,
            categories: row.2,
            statuses: row.3,
        })
    }
}
