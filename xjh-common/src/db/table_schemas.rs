//! Content tables in schema construction order
//!
//! Parents always precede their children. The order drives table creation,
//! seed insertion, and (reversed) truncation.

use crate::db::schema_sync::{ColumnDefinition, SchemaSync, TableSchema};
use crate::model::*;
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Type-erased handle on one entity's table
#[derive(Clone, Copy)]
pub struct ContentTable {
    /// Entity kind stored in the table
    pub kind: &'static str,
    /// Table name in database
    pub table_name: &'static str,
    columns: fn() -> Vec<ColumnDefinition>,
}

impl ContentTable {
    pub fn of<E: Entity>() -> Self {
        Self {
            kind: E::KIND,
            table_name: E::table_name(),
            columns: E::all_columns,
        }
    }

    /// Declared columns, timestamps included
    pub fn columns(&self) -> Vec<ColumnDefinition> {
        (self.columns)()
    }

    /// CREATE TABLE IF NOT EXISTS
    pub async fn create(&self, pool: &SqlitePool) -> Result<()> {
        SchemaSync::create_table(pool, self.table_name, &self.columns()).await
    }

    /// Add any declared column the existing table lacks
    pub async fn sync(&self, pool: &SqlitePool) -> Result<()> {
        SchemaSync::sync_columns(pool, self.table_name, &self.columns()).await
    }
}

impl std::fmt::Debug for ContentTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentTable")
            .field("kind", &self.kind)
            .field("table_name", &self.table_name)
            .finish()
    }
}

/// Every content table, parents before children
pub fn tables_in_construction_order() -> Vec<ContentTable> {
    vec![
        ContentTable::of::<User>(),
        ContentTable::of::<UserRole>(), // after user
        ContentTable::of::<Account>(),
        ContentTable::of::<AccountUser>(), // after account, user
        ContentTable::of::<Library>(),     // after account
        ContentTable::of::<Program>(),     // after user, library
        ContentTable::of::<ProgramMeme>(),
        ContentTable::of::<ProgramVoice>(),
        ContentTable::of::<ProgramVoiceTrack>(), // after voice
        ContentTable::of::<ProgramSequence>(),
        ContentTable::of::<ProgramSequenceBinding>(), // after sequence
        ContentTable::of::<ProgramSequenceBindingMeme>(), // after binding
        ContentTable::of::<ProgramSequenceChord>(),   // after sequence
        ContentTable::of::<ProgramSequencePattern>(), // after sequence, voice
        ContentTable::of::<ProgramSequencePatternEvent>(), // after pattern, track
        ContentTable::of::<Instrument>(),             // after user, library
        ContentTable::of::<InstrumentMeme>(),
        ContentTable::of::<InstrumentAudio>(),
        ContentTable::of::<InstrumentAudioEvent>(), // after audio
        ContentTable::of::<InstrumentAudioChord>(), // after audio
    ]
}

/// Create every content table that does not exist yet
pub async fn create_all_tables(pool: &SqlitePool) -> Result<()> {
    for table in tables_in_construction_order() {
        table.create(pool).await?;
    }
    Ok(())
}

/// Synchronize all table schemas
///
/// Runs after CREATE TABLE IF NOT EXISTS, so only databases created by an
/// older build have anything to add.
pub async fn sync_all_table_schemas(pool: &SqlitePool) -> Result<()> {
    info!("Checking content table schemas");
    for table in tables_in_construction_order() {
        table.sync(pool).await?;
    }
    Ok(())
}
