//! Cinelog Database Library
//!
//! This crate provides the document-database collaborator for Cinelog: the
//! `DocumentStore` capability trait, a Postgres-backed implementation (JSONB
//! documents), an in-memory implementation for tests and local development,
//! and the typed `MovieCollection` built on top.

pub mod documents;
pub mod memory;
pub mod movies;
pub mod pg;

pub use documents::DocumentStore;
pub use memory::MemoryDocumentStore;
pub use movies::MovieCollection;
pub use pg::PgDocumentStore;
