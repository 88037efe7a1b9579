//! Version-guarded updates under contention.

use assert_matches::assert_matches;
use pso_core::error::CoreError;
use pso_db::models::project::{CreateProject, Project};
use pso_db::repositories::ProjectRepo;
use pso_db::Database;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_project(db: &Database) -> Project {
    ProjectRepo::insert(
        db,
        &CreateProject {
            opportunity_id: Some("OPP-42".into()),
            changepoint_id: None,
            revenue_type: "T&M".into(),
            name: "Migration".into(),
            customer: "Acme".into(),
            end_customer: None,
            project_manager: "Nisha Halim".into(),
            status: "Staged".into(),
        },
    )
    .await
    .unwrap()
}

fn renamed(project: &Project, name: &str) -> Project {
    let mut copy = project.clone();
    copy.name = name.to_string();
    copy
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_updates_exactly_one_wins(pool: PgPool) {
    let db = Database::from_pool(pool);
    let snapshot = create_project(&db).await;

    let left = renamed(&snapshot, "Left");
    let right = renamed(&snapshot, "Right");
    let (a, b) = tokio::join!(
        ProjectRepo::update(&db, &left),
        ProjectRepo::update(&db, &right)
    );

    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
        other => panic!("expected exactly one winner, got {other:?}"),
    };
    assert_eq!(winner.version, 2);
    assert_matches!(
        loser,
        CoreError::EditConflict {
            expected: 1,
            current: 2,
            ..
        }
    );
    assert!(loser.is_retryable());

    let stored = ProjectRepo::get(&db, snapshot.id).await.unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.name, winner.name);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_many_writers_one_version_step(pool: PgPool) {
    let db = Database::from_pool(pool);
    let snapshot = create_project(&db).await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = db.clone();
            let attempt = renamed(&snapshot, &format!("Writer {i}"));
            tokio::spawn(async move { ProjectRepo::update(&db, &attempt).await })
        })
        .collect();

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(updated) => {
                assert_eq!(updated.version, 2);
                wins += 1;
            }
            Err(CoreError::EditConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);

    let stored = ProjectRepo::get(&db, snapshot.id).await.unwrap();
    assert_eq!(stored.version, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_version_leaves_store_untouched(pool: PgPool) {
    let db = Database::from_pool(pool);
    let mut current = create_project(&db).await;
    let mut stale = current.clone();

    for step in 0..3 {
        if step == 1 {
            stale = current.clone();
        }
        current = ProjectRepo::update(&db, &renamed(&current, &format!("Step {step}")))
            .await
            .unwrap();
    }
    assert_eq!(stale.version, 2);
    assert_eq!(current.version, 4);

    // Advance the stale snapshot to version 3 without writing it.
    let stale = Project {
        version: 3,
        ..renamed(&stale, "Stale")
    };
    let err = ProjectRepo::update(&db, &stale).await.unwrap_err();
    assert_matches!(
        err,
        CoreError::EditConflict {
            entity: "Project",
            expected: 3,
            current: 4,
            ..
        }
    );

    let stored = ProjectRepo::get(&db, current.id).await.unwrap();
    assert_eq!(stored, current);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_missing_row_is_not_found(pool: PgPool) {
    let db = Database::from_pool(pool);
    let project = create_project(&db).await;

    let ghost = Project {
        id: project.id + 1_000,
        ..project
    };
    let err = ProjectRepo::update(&db, &ghost).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Project", .. });
    assert!(!err.is_retryable());
}
