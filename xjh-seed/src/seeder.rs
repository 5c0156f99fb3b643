//! Transactional insert session
//!
//! Every record of one seed run goes through a single transaction, so a run
//! either lands completely or not at all. Dropping a `Seeder` without calling
//! [`Seeder::commit`] rolls the transaction back.

use crate::report::SeedReport;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use xjh_common::db::dao;
use xjh_common::{Entity, Result};

pub struct Seeder {
    tx: Transaction<'static, Sqlite>,
    report: SeedReport,
}

impl Seeder {
    /// Open the transaction a seed run inserts into
    pub async fn begin(pool: &SqlitePool) -> Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self {
            tx,
            report: SeedReport::new(),
        })
    }

    /// Insert one entity and return it for use as a parent
    pub async fn insert<E: Entity>(&mut self, entity: E) -> Result<E> {
        let entity = dao::insert(&mut *self.tx, entity).await?;
        self.report.tally(E::KIND);
        debug!("Seeded {} {}", E::KIND, entity.id());
        Ok(entity)
    }

    /// Empty every content table within this run's transaction
    pub async fn truncate(&mut self) -> Result<u64> {
        dao::truncate_all(&mut self.tx).await
    }

    /// Records inserted so far
    pub fn report(&self) -> &SeedReport {
        &self.report
    }

    /// Keep everything inserted and return the tally
    pub async fn commit(self) -> Result<SeedReport> {
        self.tx.commit().await?;
        info!("Committed {} records", self.report.total());
        Ok(self.report)
    }

    /// Discard everything inserted, still returning what would have landed
    pub async fn rollback(self) -> Result<SeedReport> {
        self.tx.rollback().await?;
        info!("Rolled back {} records", self.report.total());
        Ok(self.report)
    }
}
