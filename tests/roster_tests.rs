use std::sync::Arc;

use serde_json::json;
use transport_attendance::dto::passenger_dto::ActiveFilter;
use transport_attendance::services::roster_service::{PassengerDraft, RosterService};
use transport_attendance::store::{MemoryStore, RealtimeStore};
use transport_attendance::utils::errors::AppError;

fn draft(name: &str, doc: &str, code: &str) -> PassengerDraft {
    PassengerDraft {
        name: name.to_string(),
        doc: doc.to_string(),
        code: code.to_string(),
        photo_url: None,
        active: true,
        default_trip: None,
    }
}

fn setup() -> (Arc<MemoryStore>, RosterService) {
    let store = Arc::new(MemoryStore::new());
    let service = RosterService::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn create_stores_record_and_code_index() {
    let (store, service) = setup();

    let record = service
        .create(draft("Ana Ruiz", "123", "ar01"))
        .await
        .unwrap();

    // el código queda normalizado a mayúsculas y el índice apunta al id nuevo
    assert_eq!(record.data.code, "AR01");
    assert_eq!(record.data.name, "Ana Ruiz");
    assert!(record.data.created_at.is_some());

    let indexed = store.get("codes/AR01").await.unwrap();
    assert_eq!(indexed, Some(json!(record.id)));

    let stored = store
        .get(&format!("passengers/{}", record.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["name"], "Ana Ruiz");
    assert_eq!(stored["doc"], "123");
    assert_eq!(stored["code"], "AR01");
    assert_eq!(stored["active"], true);
}

#[tokio::test]
async fn create_requires_name_doc_and_code() {
    let (store, service) = setup();

    let result = service.create(draft("", "123", "ar01")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = service.create(draft("Ana Ruiz", "123", "   ")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // nada quedó escrito
    assert_eq!(store.get("passengers").await.unwrap(), None);
    assert_eq!(store.get("codes").await.unwrap(), None);
}

#[tokio::test]
async fn create_rejects_codes_with_path_characters() {
    let (_, service) = setup();

    let result = service.create(draft("Ana Ruiz", "123", "a/r01")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_with_taken_code_fails_without_writing() {
    let (store, service) = setup();

    let ana = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();

    // mismo código con otra capitalización
    let result = service.create(draft("Bruno Díaz", "456", " ar01 ")).await;
    assert!(matches!(result, Err(AppError::CodeConflict(_))));

    let passengers = store.get("passengers").await.unwrap().unwrap();
    assert_eq!(passengers.as_object().unwrap().len(), 1);
    assert_eq!(store.get("codes/AR01").await.unwrap(), Some(json!(ana.id)));
}

#[tokio::test]
async fn update_moves_the_code_index_entry() {
    let (store, service) = setup();

    let record = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();
    let created_at = record.data.created_at;

    let mut changed = draft("Ana Ruiz de Díaz", "123", "br02");
    changed.active = false;
    let updated = service.update(&record.id, changed).await.unwrap();

    assert_eq!(updated.data.code, "BR02");
    assert_eq!(updated.data.name, "Ana Ruiz de Díaz");
    assert!(!updated.data.active);
    // createdAt se conserva en la edición
    assert_eq!(updated.data.created_at, created_at);

    assert_eq!(store.get("codes/AR01").await.unwrap(), None);
    assert_eq!(store.get("codes/BR02").await.unwrap(), Some(json!(record.id)));
}

#[tokio::test]
async fn update_keeping_own_code_is_not_a_conflict() {
    let (_, service) = setup();

    let record = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();
    let updated = service
        .update(&record.id, draft("Ana R.", "123", "ar01"))
        .await
        .unwrap();
    assert_eq!(updated.data.code, "AR01");
    assert_eq!(updated.data.name, "Ana R.");
}

#[tokio::test]
async fn update_to_foreign_code_fails_without_writing() {
    let (store, service) = setup();

    let ana = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();
    let bruno = service
        .create(draft("Bruno Díaz", "456", "BR02"))
        .await
        .unwrap();

    let result = service
        .update(&bruno.id, draft("Bruno Díaz", "456", "AR01"))
        .await;
    assert!(matches!(result, Err(AppError::CodeConflict(_))));

    // Bruno quedó intacto y los dos índices siguen apuntando bien
    let unchanged = service.get(&bruno.id).await.unwrap();
    assert_eq!(unchanged.data.code, "BR02");
    assert_eq!(store.get("codes/AR01").await.unwrap(), Some(json!(ana.id)));
    assert_eq!(store.get("codes/BR02").await.unwrap(), Some(json!(bruno.id)));
}

#[tokio::test]
async fn update_unknown_passenger_is_not_found() {
    let (_, service) = setup();
    let result = service
        .update("nope", draft("Ana Ruiz", "123", "AR01"))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn toggle_flips_only_the_active_flag() {
    let (_, service) = setup();

    let record = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();

    let toggled = service.toggle_active(&record.id).await.unwrap();
    assert!(!toggled.data.active);
    assert_eq!(toggled.data.name, "Ana Ruiz");
    assert_eq!(toggled.data.code, "AR01");

    let again = service.toggle_active(&record.id).await.unwrap();
    assert!(again.data.active);
}

#[tokio::test]
async fn delete_removes_record_and_index_together() {
    let (store, service) = setup();

    let record = service
        .create(draft("Ana Ruiz", "123", "AR01"))
        .await
        .unwrap();
    service.delete(&record.id).await.unwrap();

    assert_eq!(
        store.get(&format!("passengers/{}", record.id)).await.unwrap(),
        None
    );
    assert_eq!(store.get("codes/AR01").await.unwrap(), None);
    assert!(matches!(
        service.get(&record.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn list_matches_without_case_or_diacritics_and_sorts_by_name() {
    let (_, service) = setup();

    service
        .create(draft("José Pérez", "789", "JP01"))
        .await
        .unwrap();
    service
        .create(draft("ana ruiz", "123", "AR01"))
        .await
        .unwrap();
    let berta = service
        .create(draft("Berta Soto", "456", "BS01"))
        .await
        .unwrap();
    service.toggle_active(&berta.id).await.unwrap();

    let all = service.list(None, ActiveFilter::All).await.unwrap();
    let names: Vec<&str> = all.iter().map(|r| r.data.name.as_str()).collect();
    assert_eq!(names, vec!["ana ruiz", "Berta Soto", "José Pérez"]);

    // "jose" encuentra a "José" sin tilde ni mayúsculas
    let found = service
        .list(Some("jose"), ActiveFilter::All)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data.name, "José Pérez");

    // también matchea por documento y por código
    let by_doc = service.list(Some("456"), ActiveFilter::All).await.unwrap();
    assert_eq!(by_doc.len(), 1);
    let by_code = service
        .list(Some("jp01"), ActiveFilter::All)
        .await
        .unwrap();
    assert_eq!(by_code.len(), 1);

    let active = service.list(None, ActiveFilter::Active).await.unwrap();
    assert_eq!(active.len(), 2);
    let inactive = service.list(None, ActiveFilter::Inactive).await.unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].data.name, "Berta Soto");
}
