//! Generic persistence for content entities
//!
//! One `insert` serves every entity: the column list comes from the entity's
//! [`TableSchema`](crate::db::schema_sync::TableSchema) declaration and the
//! values from [`Entity::values`], bound positionally. Every function accepts
//! either a pool or an open transaction.

use crate::db::table_schemas::tables_in_construction_order;
use crate::model::{Entity, SqlValue};
use crate::{Error, Result};
use sqlx::error::ErrorKind;
use sqlx::{Executor, Sqlite, SqliteConnection};
use tracing::{debug, info};

/// INSERT statement for an entity's declared columns
pub fn insert_sql<E: Entity>() -> String {
    let columns: Vec<String> = E::expected_columns()
        .iter()
        .filter(|c| !c.is_database_managed())
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        E::table_name(),
        columns.join(", "),
        placeholders
    )
}

/// Validate and store an entity, returning it for use as a foreign key
///
/// # Errors
/// - `InvalidInput` when validation fails (nothing is written)
/// - `NotFound` when a referenced parent row is missing
/// - `Conflict` when a row with the same id already exists
pub async fn insert<'e, E, X>(executor: X, entity: E) -> Result<E>
where
    E: Entity,
    X: Executor<'e, Database = Sqlite>,
{
    entity.validate()?;

    let values = entity.values();
    let expected = E::expected_columns().len();
    if values.len() != expected {
        return Err(Error::InvalidInput(format!(
            "{} has {} values for {} columns",
            E::KIND,
            values.len(),
            expected
        )));
    }

    let sql = insert_sql::<E>();
    let mut query = sqlx::query(&sql);
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Real(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
        };
    }

    query
        .execute(executor)
        .await
        .map_err(|e| classify_insert_error(E::KIND, e))?;

    debug!("Inserted {} {}", E::KIND, entity.id());
    Ok(entity)
}

/// Map constraint failures to the hub's error vocabulary
fn classify_insert_error(kind: &str, e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &e {
        let message = db_err.message();
        if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
            || message.contains("FOREIGN KEY constraint failed")
        {
            return Error::NotFound(format!("{} parent does not exist", kind));
        }
        if matches!(db_err.kind(), ErrorKind::UniqueViolation) || message.contains("UNIQUE constraint failed") {
            return Error::Conflict(format!("{} already exists", kind));
        }
    }
    Error::Database(e)
}

/// Number of stored rows of one entity kind
pub async fn count<'e, E, X>(executor: X) -> Result<i64>
where
    E: Entity,
    X: Executor<'e, Database = Sqlite>,
{
    count_table(executor, E::table_name()).await
}

/// Number of stored rows in a content table, by name
pub async fn count_table<'e, X>(executor: X, table_name: &str) -> Result<i64>
where
    X: Executor<'e, Database = Sqlite>,
{
    let table = tables_in_construction_order()
        .into_iter()
        .find(|t| t.table_name == table_name)
        .ok_or_else(|| Error::NotFound(format!("Content table {} does not exist", table_name)))?;

    let sql = format!("SELECT COUNT(*) FROM {}", table.table_name);
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(executor).await?;
    Ok(count)
}

/// Delete every content row, children first
///
/// Runs on one connection so the caller decides the transaction; returns the
/// number of rows deleted.
pub async fn truncate_all(conn: &mut SqliteConnection) -> Result<u64> {
    let mut deleted = 0;

    for table in tables_in_construction_order().iter().rev() {
        let sql = format!("DELETE FROM {}", table.table_name);
        deleted += sqlx::query(&sql).execute(&mut *conn).await?.rows_affected();
    }

    info!("Truncated content tables ({} rows deleted)", deleted);
    Ok(deleted)
}
