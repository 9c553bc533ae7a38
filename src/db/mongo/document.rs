//! BSON shape of a stored project.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, Project};

/// A project document in the `projects` collection.
///
/// Field names match documents written by earlier deployments, including the
/// `__v` version key, so existing collections stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committee_details: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "__v", default)]
    pub version: i32,
}

impl TryFrom<&Project> for ProjectDocument {
    type Error = DbError;

    fn try_from(project: &Project) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(&project.id).map_err(|e| DbError::InvalidData {
            message: format!("'{}' is not an ObjectId: {}", project.id, e),
            help: "Ids must be 24 hex characters".to_string(),
        })?;

        Ok(Self {
            id,
            title: project.title.clone(),
            description: project.description.clone(),
            author: project.author.clone(),
            img_src: project.img_src.clone(),
            project_type: project.project_type.clone(),
            committee_details: project.committee_details.clone(),
            // BSON dates carry millisecond precision.
            created_at: bson::DateTime::from_chrono(project.created_at).to_chrono(),
            version: 0,
        })
    }
}

impl From<ProjectDocument> for Project {
    fn from(doc: ProjectDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            author: doc.author,
            img_src: doc.img_src,
            project_type: doc.project_type,
            committee_details: doc.committee_details,
            created_at: doc.created_at,
        }
    }
}
