//! MongoDB implementation of the database traits.
//!
//! This module provides a MongoDB-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod document;
mod project;


pub use connection::{MongoConfig, MongoDatabase};
pub use document::ProjectDocument;
pub use project::MongoProjectRepository;
