//! PostgreSQL implementation of ClassTypeRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ClassTypeId, Currency, DomainError, ErrorCode, Price, Timestamp,
};
use crate::domain::schedule::ClassType;
use crate::ports::ClassTypeRepository;

pub struct PostgresClassTypeRepository {
    pool: PgPool,
}

impl PostgresClassTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClassTypeRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    default_price_minor: i64,
    currency: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClassTypeRow> for ClassType {
    type Error = DomainError;

    fn try_from(row: ClassTypeRow) -> Result<Self, Self::Error> {
        let currency = Currency::new(row.currency.trim())
            .map_err(|e| DomainError::database("Invalid stored currency", e))?;
        let price = Price::new(row.default_price_minor, currency)
            .map_err(|e| DomainError::database("Invalid stored price", e))?;

        Ok(ClassType::reconstitute(
            ClassTypeId::from_uuid(row.id),
            row.name,
            row.description,
            price,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, default_price_minor, currency, created_at FROM class_types";

#[async_trait]
impl ClassTypeRepository for PostgresClassTypeRepository {
    async fn save(&self, class_type: &ClassType) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO class_types (id, name, description, default_price_minor, currency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(class_type.id().as_uuid())
        .bind(class_type.name())
        .bind(class_type.description())
        .bind(class_type.default_price().minor_units())
        .bind(class_type.default_price().currency().as_str())
        .bind(class_type.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save class type", e))?;

        Ok(())
    }

    async fn update(&self, class_type: &ClassType) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE class_types SET
                name = $2,
                description = $3,
                default_price_minor = $4,
                currency = $5
            WHERE id = $1
            "#,
        )
        .bind(class_type.id().as_uuid())
        .bind(class_type.name())
        .bind(class_type.description())
        .bind(class_type.default_price().minor_units())
        .bind(class_type.default_price().currency().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update class type", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClassTypeNotFound,
                format!("Class type not found: {}", class_type.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClassTypeId) -> Result<Option<ClassType>, DomainError> {
        let row: Option<ClassTypeRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find class type", e))?;

        row.map(ClassType::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<ClassType>, DomainError> {
        let rows: Vec<ClassTypeRow> =
            sqlx::query_as(&format!("{} ORDER BY name ASC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to list class types", e))?;

        rows.into_iter().map(ClassType::try_from).collect()
    }
}
