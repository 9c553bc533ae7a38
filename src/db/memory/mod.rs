//! In-process implementation of the database traits.
//!
//! Keeps records in memory for tests and local development. It enforces the
//! same schema rules and ordering as the MongoDB backend.

mod connection;
mod project;


pub use connection::MemoryDatabase;
pub use project::MemoryProjectRepository;
