//! # XJ Hub Common Library
//!
//! Shared code for the hub content tools including:
//! - Content entity model (users, libraries, programs, instruments)
//! - Database schema, initialization and the generic insert DAO
//! - Configuration loading
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::Entity;
