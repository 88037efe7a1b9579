//! Repository for the `resource_request_comments` table.

use pso_core::concurrency::Versioned;
use pso_core::error::CoreError;
use pso_core::types::DbId;

use crate::concurrency::finish_update;
use crate::database::{Database, Deadline};
use crate::models::comment::{Comment, CreateComment};

const COLUMNS: &str = "id, request_id, comment, version, created_at, updated_at";

const TABLE: &str = "resource_request_comments";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn insert(db: &Database, input: &CreateComment) -> Result<Comment, CoreError> {
        let deadline = db.deadline(Comment::ENTITY);
        let query = format!(
            "INSERT INTO resource_request_comments (request_id, comment) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        deadline
            .run(
                sqlx::query_as::<_, Comment>(&query)
                    .bind(input.request_id)
                    .bind(&input.comment)
                    .fetch_one(deadline.pool()),
            )
            .await
    }

    pub async fn get(db: &Database, id: DbId) -> Result<Comment, CoreError> {
        let not_found = CoreError::NotFound {
            entity: Comment::ENTITY,
            id,
        };
        if id < 1 {
            return Err(not_found);
        }

        let deadline = db.deadline(Comment::ENTITY);
        let query = format!("SELECT {COLUMNS} FROM resource_request_comments WHERE id = $1");
        deadline
            .run(
                sqlx::query_as::<_, Comment>(&query)
                    .bind(id)
                    .fetch_optional(deadline.pool()),
            )
            .await?
            .ok_or(not_found)
    }

    /// Rewrite the comment text if the stored version still matches.
    pub async fn update(db: &Database, comment: &Comment) -> Result<Comment, CoreError> {
        let deadline = db.deadline(Comment::ENTITY);
        let query = format!(
            "UPDATE resource_request_comments SET \
                comment = $3, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = deadline
            .run(
                sqlx::query_as::<_, Comment>(&query)
                    .bind(comment.id)
                    .bind(comment.version)
                    .bind(&comment.comment)
                    .fetch_optional(deadline.pool()),
            )
            .await?;
        finish_update(&deadline, TABLE, comment, updated).await
    }

    /// Comments on a request, oldest first.
    pub async fn list_for_request(
        db: &Database,
        request_id: DbId,
    ) -> Result<Vec<Comment>, CoreError> {
        Self::list_for_request_with(&db.deadline(Comment::ENTITY), request_id).await
    }

    pub(crate) async fn list_for_request_with(
        deadline: &Deadline<'_>,
        request_id: DbId,
    ) -> Result<Vec<Comment>, CoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM resource_request_comments \
             WHERE request_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        deadline
            .run(
                sqlx::query_as::<_, Comment>(&query)
                    .bind(request_id)
                    .fetch_all(deadline.pool()),
            )
            .await
    }
}
