//! Resource request comment model and DTOs.

use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::rules::validate_comment;
use pso_core::types::{DbId, Timestamp, Version};
use pso_core::validation::Validator;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::patch;

/// A row from the `resource_request_comments` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub request_id: DbId,
    pub comment: String,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Versioned for Comment {
    const ENTITY: &'static str = "Comment";

    fn id(&self) -> DbId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Comment {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_comment(&mut v, &self.comment);
        v.finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub request_id: DbId,
    pub comment: String,
}

impl CreateComment {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        validate_comment(&mut v, &self.comment);
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComment {
    pub comment: Option<String>,
}

impl UpdateComment {
    pub fn apply_to(&self, comment: &mut Comment) {
        patch(&mut comment.comment, &self.comment);
    }
}
