//! Domain models for the project store.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{DbError, DbResult};

/// 24-character hex ID assigned by the store.
pub type Id = String;

/// A project listing as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Id,
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub img_src: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    /// Only meaningful for `type4` listings, but never cross-checked.
    pub committee_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate project built from an untrusted request body.
///
/// Casting follows document-mapper rules: strings are kept, numbers and
/// booleans become their string form, `null` is treated as absent, and any
/// other value is a cast failure that the store rejects at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub img_src: Option<String>,
    pub project_type: Option<String>,
    pub committee_details: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    cast_errors: Vec<String>,
}

impl NewProject {
    /// Build a candidate from a JSON body, ignoring unrecognized fields.
    pub fn from_json(body: &Value) -> Self {
        let mut candidate = NewProject::default();
        let Some(obj) = body.as_object() else {
            return candidate;
        };

        let mut cast_errors = Vec::new();
        let mut field = |path: &str| -> Option<String> {
            match obj.get(path) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(Value::Bool(b)) => Some(b.to_string()),
                Some(other) => {
                    candidate_cast_error(&mut cast_errors, path, other);
                    None
                }
            }
        };

        candidate.title = field("title");
        candidate.description = field("description");
        candidate.author = field("author");
        candidate.img_src = field("imgSrc");
        candidate.project_type = field("type");
        candidate.committee_details = field("committeeDetails");

        candidate.created_at = match obj.get("createdAt") {
            None | Some(Value::Null) => None,
            Some(value) => {
                let parsed = match value {
                    Value::String(s) => parse_date_string(s),
                    Value::Number(n) => n
                        .as_i64()
                        .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
                    _ => None,
                };
                if parsed.is_none() {
                    candidate_cast_error(&mut cast_errors, "createdAt", value);
                }
                parsed
            }
        };

        candidate.cast_errors = cast_errors;
        candidate
    }

    /// Cast failures recorded while building the candidate.
    pub fn cast_errors(&self) -> &[String] {
        &self.cast_errors
    }

    /// Materialize the record with a store-assigned id.
    ///
    /// `createdAt` keeps a supplied value and otherwise defaults to `now`.
    pub fn into_project(self, id: Id, now: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            author: self.author,
            img_src: self.img_src,
            project_type: self.project_type,
            committee_details: self.committee_details,
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

/// Parse the date string forms clients send for `createdAt`.
///
/// Accepts RFC 3339, RFC 2822 and bare `YYYY-MM-DD` dates, which are taken
/// as midnight UTC.
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc())
        })
}

fn candidate_cast_error(errors: &mut Vec<String>, path: &str, value: &Value) {
    let kind = if path == "createdAt" { "date" } else { "string" };
    errors.push(format!(
        "{path}: Cast to {kind} failed for value {value} at path `{path}`"
    ));
}

/// Field presence rules enforced by every backend at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectSchema {
    /// Require title, description, author, imgSrc and type to be non-empty.
    pub strict: bool,
}

impl ProjectSchema {
    pub const STRICT: ProjectSchema = ProjectSchema { strict: true };
    pub const LOOSE: ProjectSchema = ProjectSchema { strict: false };

    /// Reject a candidate that breaks the presence rules or failed to cast.
    ///
    /// All violations are reported together in one message.
    pub fn validate(&self, candidate: &NewProject) -> DbResult<()> {
        let mut violations: Vec<String> = candidate.cast_errors.clone();

        if self.strict {
            let required = [
                ("title", &candidate.title),
                ("description", &candidate.description),
                ("author", &candidate.author),
                ("imgSrc", &candidate.img_src),
                ("type", &candidate.project_type),
            ];
            for (path, value) in required {
                if value.as_deref().is_none_or(str::is_empty) {
                    violations.push(format!("{path}: Path `{path}` is required."));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DbError::Validation {
                message: format!("Projects validation failed: {}", violations.join(", ")),
            })
        }
    }
}

/// Filter for project listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    /// Exact match on the `type` field.
    pub project_type: Option<String>,
}

impl ProjectQuery {
    pub fn by_type(project_type: impl Into<String>) -> Self {
        Self {
            project_type: Some(project_type.into()),
        }
    }

    /// Whether a record satisfies this filter.
    pub fn matches(&self, project: &Project) -> bool {
        match &self.project_type {
            Some(wanted) => project.project_type.as_deref() == Some(wanted.as_str()),
            None => true,
        }
    }
}
