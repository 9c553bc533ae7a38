//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends (MongoDB, in-memory) to be swapped
//! without changing the HTTP layer.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities and schema rules
//! - `repository`: Trait definitions for data access
//! - `mongo`: MongoDB backend
//! - `memory`: In-process backend

mod error;
mod memory;
mod models;
mod mongo;
mod repository;
pub(crate) mod utils;


pub use error::{DbError, DbResult};
pub use memory::{MemoryDatabase, MemoryProjectRepository};
pub use models::*;
pub use mongo::{MongoConfig, MongoDatabase, MongoProjectRepository, ProjectDocument};
pub use repository::*;
