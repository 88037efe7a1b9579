//! Integration tests for resource storage and listing.

use assert_matches::assert_matches;
use pso_core::error::{CoreError, INTERNAL_ERROR_MESSAGE};
use pso_core::filters::FilterSortSpec;
use pso_core::listing::{ListFilters, ResourceFilters};
use pso_db::models::resource::{CreateResource, UpdateResource};
use pso_db::repositories::ResourceRepo;
use pso_db::Database;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_resource(id: i64, name: &str, workgroup: &str, specialties: &[&str]) -> CreateResource {
    CreateResource {
        id,
        name: name.to_string(),
        email: format!("{id}@example.com"),
        job_title: "Consultant".to_string(),
        manager: "Lisa Ryan".to_string(),
        workgroup: workgroup.to_string(),
        clearance: "Baseline".to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        certifications: vec![],
        active: None,
    }
}

fn spec(sort: &str) -> FilterSortSpec {
    FilterSortSpec::new(1, 20, sort, ResourceFilters::SORT_SAFELIST).unwrap()
}

async fn seed(db: &Database) {
    let rows = [
        new_resource(101, "Ada", "Architects - ANZ", &["NSX", "vSAN"]),
        new_resource(102, "Brian", "PMO - ANZ", &[]),
        new_resource(103, "Chen", "Server - Australia", &["NSX"]),
        new_resource(104, "Dana", "Architects - ANZ", &["vSAN"]),
    ];
    for row in &rows {
        ResourceRepo::insert(db, row).await.unwrap();
    }
    let mut retired = new_resource(105, "Eve", "Architects - ANZ", &["NSX", "vSAN"]);
    retired.active = Some(false);
    ResourceRepo::insert(db, &retired).await.unwrap();
}

fn ids(resources: &[pso_db::models::resource::Resource]) -> Vec<i64> {
    resources.iter().map(|r| r.id).collect()
}

// ---------------------------------------------------------------------------
// Insert / get / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_keeps_employee_id(pool: PgPool) {
    let db = Database::from_pool(pool);
    let created = ResourceRepo::insert(&db, &new_resource(4711, "Ada", "PMO - ANZ", &["NSX"]))
        .await
        .unwrap();
    assert_eq!(created.id, 4711);
    assert_eq!(created.version, 1);
    assert!(created.active);
    assert_eq!(created.specialties, vec!["NSX".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_employee_id_is_sanitized_internal(pool: PgPool) {
    let db = Database::from_pool(pool);
    ResourceRepo::insert(&db, &new_resource(7, "Ada", "PMO - ANZ", &[]))
        .await
        .unwrap();

    let mut again = new_resource(7, "Ada Again", "PMO - ANZ", &[]);
    again.email = "another@example.com".into();
    let err = ResourceRepo::insert(&db, &again).await.unwrap_err();
    assert_matches!(err, CoreError::Internal(_));
    assert!(err.to_string().contains("resources_pkey"));
    assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    assert!(!err.public_message().contains("resources_pkey"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_sanitized_internal(pool: PgPool) {
    let db = Database::from_pool(pool);
    ResourceRepo::insert(&db, &new_resource(7, "Ada", "PMO - ANZ", &[]))
        .await
        .unwrap();

    let mut clash = new_resource(8, "Brian", "PMO - ANZ", &[]);
    clash.email = "7@example.com".into();
    let err = ResourceRepo::insert(&db, &clash).await.unwrap_err();
    assert_matches!(err, CoreError::Internal(_));
    assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_positive_ids_are_not_found(pool: PgPool) {
    let db = Database::from_pool(pool);
    for id in [0, -1] {
        assert_matches!(
            ResourceRepo::get(&db, id).await,
            Err(CoreError::NotFound { entity: "Resource", .. })
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivate_through_update(pool: PgPool) {
    let db = Database::from_pool(pool);
    ResourceRepo::insert(&db, &new_resource(9, "Ada", "PMO - ANZ", &[]))
        .await
        .unwrap();

    let mut resource = ResourceRepo::get(&db, 9).await.unwrap();
    UpdateResource {
        active: Some(false),
        certifications: Some(vec!["VCP-DCV".into()]),
        ..Default::default()
    }
    .apply_to(&mut resource);
    let updated = ResourceRepo::update(&db, &resource).await.unwrap();

    assert!(!updated.active);
    assert_eq!(updated.certifications, vec!["VCP-DCV".to_string()]);
    assert_eq!(updated.version, 2);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_filter_defaults_to_true(pool: PgPool) {
    let db = Database::from_pool(pool);
    seed(&db).await;

    let (active, meta) = ResourceRepo::get_all(&db, &ResourceFilters::default(), &spec("id"))
        .await
        .unwrap();
    assert_eq!(ids(&active), vec![101, 102, 103, 104]);
    assert_eq!(meta.total_records, 4);

    let inactive = ResourceFilters {
        active: false,
        ..Default::default()
    };
    let (retired, _) = ResourceRepo::get_all(&db, &inactive, &spec("id"))
        .await
        .unwrap();
    assert_eq!(ids(&retired), vec![105]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workgroups_match_any(pool: PgPool) {
    let db = Database::from_pool(pool);
    seed(&db).await;

    let filters = ResourceFilters {
        workgroups: vec!["PMO - ANZ".into(), "Server - Australia".into()],
        ..Default::default()
    };
    let (found, _) = ResourceRepo::get_all(&db, &filters, &spec("id"))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![102, 103]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_specialties_require_all(pool: PgPool) {
    let db = Database::from_pool(pool);
    seed(&db).await;

    let filters = ResourceFilters {
        specialties: vec!["NSX".into(), "vSAN".into()],
        ..Default::default()
    };
    let (found, _) = ResourceRepo::get_all(&db, &filters, &spec("id"))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![101]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sort_by_name_descending(pool: PgPool) {
    let db = Database::from_pool(pool);
    seed(&db).await;

    let (found, _) = ResourceRepo::get_all(&db, &ResourceFilters::default(), &spec("-name"))
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Dana", "Chen", "Brian", "Ada"]);
}
