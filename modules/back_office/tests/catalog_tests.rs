//! Integration tests for manually ordered content collections

mod common;

use back_office::contract::{BackOfficeError, Collection};
use common::{catalog_draft, print_test_header, TestEnv};

async fn titles(env: &TestEnv, collection: Collection) -> Vec<String> {
    env.services
        .catalog
        .list(collection, false)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect()
}

#[tokio::test]
async fn new_entries_are_appended() {
    let env = TestEnv::new();
    let first = env
        .services
        .catalog
        .create(Collection::Faq, catalog_draft("How do I pay?"))
        .await
        .unwrap();
    let second = env
        .services
        .catalog
        .create(Collection::Faq, catalog_draft("When do creators get paid?"))
        .await
        .unwrap();

    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 1);
}

#[tokio::test]
async fn reorder_assigns_positions() {
    print_test_header(
        "reorder_assigns_positions",
        "Drag-and-drop save: each id gets its index as sort_order",
    );
    let env = TestEnv::new();
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let entry = env
            .services
            .catalog
            .create(Collection::ProductCategories, catalog_draft(title))
            .await
            .unwrap();
        ids.push(entry.id);
    }

    let reordered = env
        .services
        .catalog
        .reorder(Collection::ProductCategories, &[ids[2], ids[0], ids[1]])
        .await
        .unwrap();

    let order: Vec<(String, i32)> = reordered
        .into_iter()
        .map(|e| (e.title, e.sort_order))
        .collect();
    assert_eq!(
        order,
        vec![
            ("C".to_string(), 0),
            ("A".to_string(), 1),
            ("B".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn reorder_rejects_foreign_ids_without_changes() {
    let env = TestEnv::new();
    let a = env
        .services
        .catalog
        .create(Collection::StickerGroups, catalog_draft("Cats"))
        .await
        .unwrap();
    let b = env
        .services
        .catalog
        .create(Collection::StickerGroups, catalog_draft("Dogs"))
        .await
        .unwrap();
    let foreign = env
        .services
        .catalog
        .create(Collection::Announcements, catalog_draft("Sale!"))
        .await
        .unwrap();

    let result = env
        .services
        .catalog
        .reorder(Collection::StickerGroups, &[b.id, foreign.id, a.id])
        .await;
    assert!(matches!(result, Err(BackOfficeError::NotFound { .. })));

    let duplicate = env
        .services
        .catalog
        .reorder(Collection::StickerGroups, &[b.id, b.id])
        .await;
    assert!(matches!(duplicate, Err(BackOfficeError::Validation { .. })));

    assert_eq!(titles(&env, Collection::StickerGroups).await, vec!["Cats", "Dogs"]);
    assert_eq!(titles(&env, Collection::Announcements).await, vec!["Sale!"]);
}

#[tokio::test]
async fn active_only_hides_inactive_entries() {
    let env = TestEnv::new();
    let mut hidden = catalog_draft("Draft page");
    hidden.is_active = false;
    env.services
        .catalog
        .create(Collection::WorkInsertPages, catalog_draft("Cover"))
        .await
        .unwrap();
    env.services
        .catalog
        .create(Collection::WorkInsertPages, hidden)
        .await
        .unwrap();

    let visible = env
        .services
        .catalog
        .list(Collection::WorkInsertPages, true)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Cover");
}

#[tokio::test]
async fn update_and_delete_are_scoped_to_the_collection() {
    let env = TestEnv::new();
    let entry = env
        .services
        .catalog
        .create(Collection::ServiceCategories, catalog_draft("Portraits"))
        .await
        .unwrap();

    let wrong_collection = env
        .services
        .catalog
        .update(Collection::Faq, entry.id, catalog_draft("Hijack"))
        .await;
    assert!(matches!(wrong_collection, Err(BackOfficeError::NotFound { .. })));

    let mut draft = catalog_draft("Portraits & Icons");
    draft.tag = Some("art".to_string());
    let updated = env
        .services
        .catalog
        .update(Collection::ServiceCategories, entry.id, draft)
        .await
        .unwrap();
    assert_eq!(updated.title, "Portraits & Icons");
    assert_eq!(updated.sort_order, entry.sort_order);

    assert!(env
        .services
        .catalog
        .delete(Collection::Faq, entry.id)
        .await
        .is_err());
    env.services
        .catalog
        .delete(Collection::ServiceCategories, entry.id)
        .await
        .unwrap();
    assert!(titles(&env, Collection::ServiceCategories).await.is_empty());
}

#[tokio::test]
async fn blank_titles_are_rejected() {
    let env = TestEnv::new();
    let result = env
        .services
        .catalog
        .create(Collection::Faq, catalog_draft("  "))
        .await;
    assert!(matches!(result, Err(BackOfficeError::Validation { .. })));
}
