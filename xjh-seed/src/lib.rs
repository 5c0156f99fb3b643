//! xjh-seed library - content seeding for the XJ hub database
//!
//! Loads either the built-in content set or a seed document into a hub
//! database, inserting parents before children inside one transaction.

pub mod content;
pub mod document;
pub mod report;
pub mod seeder;

pub use document::SeedDocument;
pub use report::SeedReport;
pub use seeder::Seeder;
