//! Database utility functions.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::db::Project;

/// Generate a 24-character hex ID for new records.
pub fn generate_entity_id() -> String {
    ObjectId::new().to_hex()
}

/// Current instant used as the `createdAt` default.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Order records newest first.
///
/// The sort is stable, so equal timestamps keep the order they arrive in.
pub fn sort_newest_first(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
