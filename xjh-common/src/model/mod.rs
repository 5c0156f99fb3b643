//! Content entity model
//!
//! Flat, strongly typed records for the hub's content hierarchy. Each entity
//! is built by a `create(...)` factory that assigns a fresh id and copies the
//! ids of the parents it is given, so a freshly inserted parent can be handed
//! straight to its children's factories.

use crate::db::schema_sync::TableSchema;
use crate::{Error, Result};
use uuid::Uuid;

pub mod account;
pub mod enums;
pub mod instrument;
pub mod program;
pub mod user;

pub use account::{Account, AccountUser, Library};
pub use enums::{
    InstrumentState, InstrumentType, ProgramSequencePatternType, ProgramState, ProgramType,
    UserRoleType,
};
pub use instrument::{
    Instrument, InstrumentAudio, InstrumentAudioChord, InstrumentAudioEvent, InstrumentMeme,
};
pub use program::{
    Program, ProgramMeme, ProgramSequence, ProgramSequenceBinding, ProgramSequenceBindingMeme,
    ProgramSequenceChord, ProgramSequencePattern, ProgramSequencePatternEvent, ProgramVoice,
    ProgramVoiceTrack,
};
pub use user::{User, UserRole};

/// A single column value, bound positionally by the insert DAO
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Real(f64),
    Integer(i64),
}

impl From<Uuid> for SqlValue {
    fn from(id: Uuid) -> Self {
        SqlValue::Text(Some(id.to_string()))
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(Some(s.to_string()))
    }
}

impl From<&String> for SqlValue {
    fn from(s: &String) -> Self {
        SqlValue::Text(Some(s.clone()))
    }
}

impl From<&Option<String>> for SqlValue {
    fn from(s: &Option<String>) -> Self {
        SqlValue::Text(s.clone())
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(v.into())
    }
}

/// A persisted content record
///
/// `values()` must line up one-to-one with `TableSchema::expected_columns()`.
pub trait Entity: TableSchema + Send + Sync {
    /// Entity kind, as used in logs, errors and seed reports
    const KIND: &'static str;

    /// Identity assigned at creation
    fn id(&self) -> Uuid;

    /// Check required attributes before the entity is stored
    fn validate(&self) -> Result<()>;

    /// Column values in declaration order
    fn values(&self) -> Vec<SqlValue>;
}

/// Require non-empty text
pub(crate) fn require(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} is required.", name)));
    }
    Ok(())
}

/// Require a non-nil id
pub(crate) fn require_id(value: &Uuid, name: &str) -> Result<()> {
    if value.is_nil() {
        return Err(Error::InvalidInput(format!("{} is required.", name)));
    }
    Ok(())
}

/// Require a non-zero number
pub(crate) fn require_non_zero(value: f64, name: &str) -> Result<()> {
    if value == 0.0 || value.is_nan() {
        return Err(Error::InvalidInput(format!("Non-zero {} is required.", name)));
    }
    Ok(())
}

/// Require two parents of one record to hang off the same owner
pub(crate) fn require_same_owner(child: &str, left: (&str, Uuid), right: (&str, Uuid), owner: &str) -> Result<()> {
    if left.1 != right.1 {
        return Err(Error::InvalidInput(format!(
            "{} {} and {} must belong to the same {}.",
            child, left.0, right.0, owner
        )));
    }
    Ok(())
}

/// Require a number no lower than `minimum`
pub(crate) fn require_minimum(minimum: f64, value: f64, name: &str) -> Result<()> {
    if value.is_nan() || value < minimum {
        return Err(Error::InvalidInput(format!("{} must be at least {}", name, minimum)));
    }
    Ok(())
}
