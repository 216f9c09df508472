//! Postgres integration tests for the component repository.
//!
//! Requires a running PostgreSQL database; the schema is applied by the tests.
//! Run with: DATABASE_URL="postgresql:///virya_test" cargo test --test db_integration -- --ignored --nocapture

use ds_types::Category;
use tokio::sync::OnceCell;
use uuid::Uuid;

use virya_ds::database::{ComponentStore, DatabaseConfig, DatabaseManager};
use virya_ds::models::{DsComponentPatch, NewDsComponent};
use virya_ds::DsError;

static SCHEMA_APPLIED: OnceCell<()> = OnceCell::const_new();

async fn connect() -> DatabaseManager {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let db = DatabaseManager::new(&DatabaseConfig::new(url))
        .await
        .expect("failed to connect to test database");
    SCHEMA_APPLIED
        .get_or_init(|| async {
            db.apply_schema().await.expect("failed to apply schema");
        })
        .await;
    db
}

fn unique_component(prefix: &str) -> NewDsComponent {
    let tag = Uuid::new_v4().simple().to_string();
    NewDsComponent {
        name: format!("{} {}", prefix, &tag[..8]),
        slug: format!("{}-{}", prefix.to_lowercase(), &tag[..8]),
        category: Category::Organisms,
        description: "Integration test row".to_string(),
        usage_markdown: String::new(),
        code: "<Test />".to_string(),
        thumbnail_url: None,
        image_urls: None,
    }
}

#[tokio::test]
#[ignore]
async fn test_insert_update_delete_roundtrip() {
    let db = connect().await;
    let repo = db.component_repository();

    let created = repo
        .insert("itest@virya.dev", unique_component("Widget"))
        .await
        .unwrap();
    let found = repo.find_by_slug(&created.slug).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    let patch = DsComponentPatch {
        description: Some("Updated".to_string()),
        ..Default::default()
    };
    let updated = repo.update("itest@virya.dev", created.id, patch).await.unwrap();
    assert_eq!(updated.description, "Updated");
    assert!(updated.updated_at >= created.updated_at);

    repo.delete("itest@virya.dev", created.id).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_slug_maps_to_conflict() {
    let db = connect().await;
    let repo = db.component_repository();

    let component = unique_component("Dup");
    let created = repo.insert("itest@virya.dev", component.clone()).await.unwrap();
    let err = repo.insert("itest@virya.dev", component).await.unwrap_err();
    assert!(matches!(err, DsError::Conflict(_)));

    repo.delete("itest@virya.dev", created.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_anonymous_writes_are_rejected_by_row_security() {
    let db = connect().await;
    let component = unique_component("Anon");

    // Bypass the repository so no role is set for the transaction
    let result = sqlx::query(
        "INSERT INTO ds_components (name, slug, category, code) VALUES ($1, $2, $3, $4)",
    )
    .bind(&component.name)
    .bind(&component.slug)
    .bind(component.category.as_str())
    .bind(&component.code)
    .execute(db.pool())
    .await;

    // Superusers bypass RLS; only assert when the policy actually applied
    if let Err(e) = result {
        assert!(e.to_string().contains("row-level security"));
    } else {
        let repo = db.component_repository();
        if let Some(row) = repo.find_by_slug(&component.slug).await.unwrap() {
            repo.delete("itest@virya.dev", row.id).await.unwrap();
        }
    }
}
