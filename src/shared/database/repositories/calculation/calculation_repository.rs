use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use uuid::Uuid;
use crate::domains::calculation::models::{Calculation, CalculationType, NewCalculation};
use crate::shared::database::stores::CalculationStore;

pub struct CalculationRepository {
    pool: PgPool,
}

impl CalculationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Result<Calculation> {
        let type_name: String = row.get("type");
        let calculation_type = CalculationType::parse(&type_name)
            .ok_or_else(|| anyhow!("Unknown calculation type in database: {}", type_name))?;

        Ok(Calculation {
            id: row.get("id"),
            user_id: row.get("user_id"),
            calculation_type,
            inputs: row.get("inputs"),
            result: row.get("result"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl CalculationStore for CalculationRepository {
    async fn create_calculation(&self, calculation: NewCalculation) -> Result<Calculation> {
        let row = sqlx::query(
            r#"
            INSERT INTO calculations (id, user_id, type, inputs, result, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, user_id, type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(calculation.user_id)
        .bind(calculation.calculation_type.as_str())
        .bind(&calculation.inputs)
        .bind(calculation.result)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create calculation")?;

        Self::map_row(row)
    }

    async fn find_calculation(&self, id: Uuid, user_id: Uuid) -> Result<Option<Calculation>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch calculation")?;

        row.map(Self::map_row).transpose()
    }

    async fn list_calculations(&self, user_id: Uuid) -> Result<Vec<Calculation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list calculations")?;

        rows.into_iter().map(Self::map_row).collect()
    }

    async fn update_calculation(
        &self,
        id: Uuid,
        user_id: Uuid,
        inputs: &[f64],
        result: f64,
    ) -> Result<Option<Calculation>> {
        let row = sqlx::query(
            r#"
            UPDATE calculations
            SET inputs = $3, result = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(inputs)
        .bind(result)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update calculation")?;

        row.map(Self::map_row).transpose()
    }

    async fn delete_calculation(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM calculations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete calculation")?;

        Ok(result.rows_affected() > 0)
    }
}
