//! Declarative table schemas and automatic schema synchronization
//!
//! Each content table is declared once, in code, as an ordered list of
//! [`ColumnDefinition`]s. The same declaration drives:
//! 1. **CREATE TABLE IF NOT EXISTS** for a fresh database
//! 2. **Auto-Sync** of an existing database (missing columns added via ALTER TABLE)
//! 3. The column list of the generic insert in [`crate::db::dao`]
//!
//! # Usage
//!
//! ```rust,ignore
//! impl TableSchema for Library {
//!     fn table_name() -> &'static str { "libraries" }
//!
//!     fn expected_columns() -> Vec<ColumnDefinition> {
//!         vec![
//!             ColumnDefinition::id(),
//!             ColumnDefinition::new("account_id", "TEXT").not_null().references("accounts"),
//!             ColumnDefinition::new("name", "TEXT").not_null(),
//!         ]
//!     }
//! }
//! ```

use crate::Result;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// One declared column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    /// Declared SQLite type, e.g. "TEXT" or "REAL"
    pub sql_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    /// SQL literal or expression used as DEFAULT
    pub default_value: Option<String>,
    /// Parent table whose `id` this column references
    pub references: Option<String>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            primary_key: false,
            default_value: None,
            references: None,
        }
    }

    /// The uuid primary key every content table starts with
    pub fn id() -> Self {
        Self::new("id", "TEXT").primary_key()
    }

    pub fn primary_key(self) -> Self {
        Self { primary_key: true, ..self }
    }

    pub fn not_null(self) -> Self {
        Self { not_null: true, ..self }
    }

    pub fn default(self, value: impl Into<String>) -> Self {
        Self {
            default_value: Some(value.into()),
            ..self
        }
    }

    /// Foreign key to `parent(id)`, deleted along with its parent
    pub fn references(self, parent: impl Into<String>) -> Self {
        Self {
            references: Some(parent.into()),
            ..self
        }
    }

    /// Database-managed timestamp columns
    fn timestamps() -> [Self; 2] {
        ["created_at", "updated_at"]
            .map(|name| Self::new(name, "TIMESTAMP").not_null().default("CURRENT_TIMESTAMP"))
    }

    /// Whether the insert DAO leaves this column to the database
    pub fn is_database_managed(&self) -> bool {
        matches!(self.name.as_str(), "created_at" | "updated_at")
    }

    fn foreign_key_clause(&self) -> Option<String> {
        self.references
            .as_ref()
            .map(|parent| format!("REFERENCES {}(id) ON DELETE CASCADE", parent))
    }

    /// Column clause for CREATE TABLE
    pub fn to_sql(&self) -> String {
        let mut parts = vec![format!("\"{}\"", self.name), self.sql_type.clone()];
        if self.primary_key {
            parts.push("PRIMARY KEY".into());
        }
        if self.not_null {
            parts.push("NOT NULL".into());
        }
        if let Some(default) = &self.default_value {
            parts.push(format!("DEFAULT {}", default));
        }
        parts.extend(self.foreign_key_clause());
        parts.join(" ")
    }
}

/// A table's declared columns
pub trait TableSchema {
    fn table_name() -> &'static str;

    /// Entity columns in insert order, without the timestamp columns
    fn expected_columns() -> Vec<ColumnDefinition>;

    /// Entity columns followed by the database-managed timestamps
    fn all_columns() -> Vec<ColumnDefinition> {
        let mut columns = Self::expected_columns();
        columns.extend(ColumnDefinition::timestamps());
        columns
    }

    fn create_table_sql() -> String {
        create_table_sql(Self::table_name(), &Self::all_columns())
    }
}

/// CREATE TABLE IF NOT EXISTS from a column list
pub fn create_table_sql(table_name: &str, columns: &[ColumnDefinition]) -> String {
    let body: Vec<String> = columns.iter().map(ColumnDefinition::to_sql).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        table_name,
        body.join(",\n    ")
    )
}

/// A column as the database reports it
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingColumn {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Difference between a declaration and the stored table
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDrift {
    /// Declared but not stored; fixable with ALTER TABLE
    MissingColumn { column: ColumnDefinition },
    /// Stored with a different type affinity; reported only
    TypeChanged {
        column: String,
        declared: String,
        found: String,
    },
    /// Stored without a declared constraint; reported only
    ConstraintMissing { column: String, constraint: &'static str },
}

/// Reads the stored schema
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    /// Columns of `table_name` in table order
    pub async fn introspect_table(pool: &SqlitePool, table_name: &str) -> Result<Vec<ExistingColumn>> {
        // cid, name, type, notnull, dflt_value, pk
        let rows: Vec<(i64, String, String, i64, Option<String>, i64)> =
            sqlx::query_as(&format!("PRAGMA table_info(\"{}\")", table_name))
                .fetch_all(pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(_, name, declared_type, not_null, _, pk)| ExistingColumn {
                name,
                declared_type,
                not_null: not_null != 0,
                primary_key: pk != 0,
            })
            .collect())
    }

    pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table_name)
                .fetch_one(pool)
                .await?;
        Ok(found > 0)
    }
}

/// SQLite column affinity, per the rules of section 3.1 of the SQLite docs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    fn of(declared: &str) -> Self {
        let t = declared.to_ascii_uppercase();
        if t.contains("INT") {
            Affinity::Integer
        } else if t.contains("CHAR") || t.contains("CLOB") || t.contains("TEXT") {
            Affinity::Text
        } else if t.is_empty() || t.contains("BLOB") {
            Affinity::Blob
        } else if t.contains("REAL") || t.contains("FLOA") || t.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}

/// Compares declarations to stored tables
pub struct SchemaDiff;

impl SchemaDiff {
    /// Every way `existing` falls short of `declared`
    pub fn compare(declared: &[ColumnDefinition], existing: &[ExistingColumn]) -> Vec<SchemaDrift> {
        declared
            .iter()
            .flat_map(|want| match existing.iter().find(|have| have.name == want.name) {
                None => vec![SchemaDrift::MissingColumn { column: want.clone() }],
                Some(have) => Self::column_drift(want, have),
            })
            .collect()
    }

    fn column_drift(want: &ColumnDefinition, have: &ExistingColumn) -> Vec<SchemaDrift> {
        let mut drift = Vec::new();

        if !Self::types_compatible(&want.sql_type, &have.declared_type) {
            drift.push(SchemaDrift::TypeChanged {
                column: want.name.clone(),
                declared: want.sql_type.clone(),
                found: have.declared_type.clone(),
            });
        }

        let missing_constraints = [
            (want.primary_key && !have.primary_key, "PRIMARY KEY"),
            (want.not_null && !have.not_null && !have.primary_key, "NOT NULL"),
        ];
        for (missing, constraint) in missing_constraints {
            if missing {
                drift.push(SchemaDrift::ConstraintMissing {
                    column: want.name.clone(),
                    constraint,
                });
            }
        }

        drift
    }

    /// Same storage affinity
    fn types_compatible(declared: &str, found: &str) -> bool {
        Affinity::of(declared) == Affinity::of(found)
    }
}

/// Brings stored tables up to their declarations
pub struct SchemaSync;

impl SchemaSync {
    /// CREATE TABLE IF NOT EXISTS
    pub async fn create_table(pool: &SqlitePool, table_name: &str, declared: &[ColumnDefinition]) -> Result<()> {
        sqlx::query(&create_table_sql(table_name, declared)).execute(pool).await?;
        debug!("Ensured table '{}'", table_name);
        Ok(())
    }

    /// Add columns the stored table lacks
    ///
    /// Type and constraint drift is only logged: SQLite cannot alter an
    /// existing column in place.
    pub async fn sync_table<T: TableSchema>(pool: &SqlitePool) -> Result<()> {
        Self::sync_columns(pool, T::table_name(), &T::all_columns()).await
    }

    pub async fn sync_columns(pool: &SqlitePool, table_name: &str, declared: &[ColumnDefinition]) -> Result<()> {
        if !SchemaIntrospector::table_exists(pool, table_name).await? {
            warn!("Table '{}' does not exist; create it before syncing", table_name);
            return Ok(());
        }

        let existing = SchemaIntrospector::introspect_table(pool, table_name).await?;
        let drift = SchemaDiff::compare(declared, &existing);
        if drift.is_empty() {
            debug!("Schema up to date for '{}'", table_name);
            return Ok(());
        }

        for item in drift {
            match item {
                SchemaDrift::MissingColumn { column } => Self::add_column(pool, table_name, &column).await?,
                SchemaDrift::TypeChanged { column, declared, found } => warn!(
                    "{}.{} is stored as '{}' but declared '{}'",
                    table_name, column, found, declared
                ),
                SchemaDrift::ConstraintMissing { column, constraint } => {
                    warn!("{}.{} is stored without {}", table_name, column, constraint)
                }
            }
        }

        Ok(())
    }

    /// ALTER TABLE ADD COLUMN, relaxing what SQLite cannot add
    ///
    /// SQLite refuses PRIMARY KEY here, NOT NULL without a default,
    /// and non-constant defaults such as CURRENT_TIMESTAMP.
    async fn add_column(pool: &SqlitePool, table: &str, column: &ColumnDefinition) -> Result<()> {
        if column.primary_key {
            warn!("Adding {}.{} without its key constraint", table, column.name);
        }

        let constant_default = column
            .default_value
            .as_deref()
            .filter(|d| !d.to_ascii_uppercase().starts_with("CURRENT_"));
        if column.default_value.is_some() && constant_default.is_none() {
            warn!("Adding {}.{} without its DEFAULT; existing rows get NULL", table, column.name);
        } else if column.not_null && constant_default.is_none() {
            warn!("Adding {}.{} as nullable: NOT NULL needs a DEFAULT", table, column.name);
        }

        let mut parts = vec![format!("\"{}\"", column.name), column.sql_type.clone()];
        if let Some(default) = constant_default {
            if column.not_null {
                parts.push("NOT NULL".into());
            }
            parts.push(format!("DEFAULT {}", default));
        }
        parts.extend(column.foreign_key_clause());

        let sql = format!("ALTER TABLE {} ADD COLUMN {}", table, parts.join(" "));
        info!("Adding column {}.{} ({})", table, column.name, column.sql_type);

        match sqlx::query(&sql).execute(pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column") => {
                debug!("{}.{} appeared concurrently", table, column.name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    struct TempoTable;

    impl TableSchema for TempoTable {
        fn table_name() -> &'static str {
            "tempos"
        }

        fn expected_columns() -> Vec<ColumnDefinition> {
            vec![
                ColumnDefinition::id(),
                ColumnDefinition::new("name", "TEXT").not_null(),
                ColumnDefinition::new("bpm", "REAL").not_null().default("120.0"),
            ]
        }
    }

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn legacy_tempos(pool: &SqlitePool) {
        sqlx::query("CREATE TABLE tempos (id TEXT PRIMARY KEY, name TEXT NOT NULL)")
            .execute(pool)
            .await
            .unwrap();
    }

    #[test]
    fn test_id_column_sql() {
        assert_eq!(ColumnDefinition::id().to_sql(), "\"id\" TEXT PRIMARY KEY");
        assert_eq!(
            ColumnDefinition::new("density", "REAL").not_null().default("0.6").to_sql(),
            "\"density\" REAL NOT NULL DEFAULT 0.6"
        );
    }

    #[test]
    fn test_foreign_key_column_sql() {
        let col = ColumnDefinition::new("library_id", "TEXT")
            .not_null()
            .references("libraries");

        assert!(col.not_null);
        assert_eq!(col.references.as_deref(), Some("libraries"));
        assert_eq!(
            col.to_sql(),
            "\"library_id\" TEXT NOT NULL REFERENCES libraries(id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn test_create_table_sql_appends_timestamps() {
        let sql = TempoTable::create_table_sql();

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS tempos ("));
        assert!(sql.contains("\"id\" TEXT PRIMARY KEY"));
        assert!(sql.contains("\"bpm\" REAL NOT NULL DEFAULT 120.0"));
        assert!(sql.contains("\"created_at\" TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"));
        assert!(sql.contains("\"updated_at\" TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_type_affinity() {
        assert!(SchemaDiff::types_compatible("TEXT", "text"));
        assert!(SchemaDiff::types_compatible("INTEGER", "BIGINT"));
        assert!(SchemaDiff::types_compatible("REAL", "DOUBLE PRECISION"));
        assert!(SchemaDiff::types_compatible("TEXT", "VARCHAR(64)"));
        assert!(SchemaDiff::types_compatible("TIMESTAMP", "DATETIME"));
        assert!(!SchemaDiff::types_compatible("TEXT", "INTEGER"));
        assert!(!SchemaDiff::types_compatible("REAL", "TEXT"));
    }

    #[tokio::test]
    async fn test_compare_reports_missing_columns() {
        let pool = memory_pool().await;
        legacy_tempos(&pool).await;

        let existing = SchemaIntrospector::introspect_table(&pool, "tempos").await.unwrap();
        let drift = SchemaDiff::compare(&TempoTable::all_columns(), &existing);

        let missing: Vec<&str> = drift
            .iter()
            .filter_map(|d| match d {
                SchemaDrift::MissingColumn { column } => Some(column.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, vec!["bpm", "created_at", "updated_at"]);
    }

    #[tokio::test]
    async fn test_sync_adds_missing_columns() {
        let pool = memory_pool().await;
        legacy_tempos(&pool).await;
        sqlx::query("INSERT INTO tempos (id, name) VALUES ('a', 'slow')")
            .execute(&pool)
            .await
            .unwrap();

        SchemaSync::sync_table::<TempoTable>(&pool).await.unwrap();

        let bpm: f64 = sqlx::query_scalar("SELECT bpm FROM tempos WHERE id = 'a'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(bpm, 120.0);

        // Second pass only warns about the nullable timestamps
        SchemaSync::sync_table::<TempoTable>(&pool).await.unwrap();
        let columns = SchemaIntrospector::introspect_table(&pool, "tempos").await.unwrap();
        assert_eq!(columns.len(), 5);
    }

    #[tokio::test]
    async fn test_create_table_is_idempotent() {
        let pool = memory_pool().await;

        let columns = TempoTable::all_columns();
        SchemaSync::create_table(&pool, "tempos", &columns).await.unwrap();
        SchemaSync::create_table(&pool, "tempos", &columns).await.unwrap();

        assert!(SchemaIntrospector::table_exists(&pool, "tempos").await.unwrap());
        assert!(!SchemaIntrospector::table_exists(&pool, "missing").await.unwrap());
    }
}
