use pso_core::allowed::{AllowedValueSet, AllowedValues, ValueCategory};
use pso_db::lookup::load_allowed_values;
use pso_db::Database;
use sqlx::PgPool;

/// Full bootstrap: migrate, ping, and load the permitted-value snapshot.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    pso_db::health_check(&pool).await.unwrap();

    let tables = [
        "lookup_values",
        "resources",
        "projects",
        "resource_requests",
        "resource_request_comments",
        "resource_assignments",
    ];
    for table in tables {
        sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
    }
}

/// The seeded lookup table carries the same lists as the built-in defaults.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_values_match_builtin(pool: PgPool) {
    let db = Database::from_pool(pool);
    let loaded = load_allowed_values(&db).await.unwrap();
    let builtin = AllowedValueSet::builtin();

    for category in ValueCategory::ALL {
        assert_eq!(
            loaded.permitted(category),
            builtin.permitted(category),
            "{} differs from the built-in list",
            category.as_str()
        );
    }
}

/// New lookup rows are picked up on the next load; unknown categories are skipped.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_values_extend_without_code_change(pool: PgPool) {
    sqlx::query(
        "INSERT INTO lookup_values (category, value, sort_order) VALUES \
            ('manager', 'Grace Hopper', 99), \
            ('colour', 'Teal', 1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let db = Database::from_pool(pool);
    let loaded = load_allowed_values(&db).await.unwrap();
    assert!(loaded.is_permitted(ValueCategory::Manager, "Grace Hopper"));
    assert_eq!(
        loaded.permitted(ValueCategory::Manager).last().map(String::as_str),
        Some("Grace Hopper")
    );
}
