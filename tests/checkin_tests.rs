use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use transport_attendance::models::Direction;
use transport_attendance::services::checkin_service::CheckinService;
use transport_attendance::services::checkin_station::CheckinStation;
use transport_attendance::services::roster_service::{PassengerDraft, RosterService};
use transport_attendance::store::{MemoryStore, RealtimeStore};
use transport_attendance::utils::errors::AppError;

const DAY: &str = "2024-03-05";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

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

async fn seed_trips(store: &MemoryStore) {
    store
        .set(
            "trips/t1",
            json!({"directionHint": "IDA", "from": "A", "to": "B", "active": true}),
        )
        .await
        .unwrap();
    store
        .set(
            "trips/t2",
            json!({"directionHint": "VUELTA", "from": "B", "to": "A", "active": true}),
        )
        .await
        .unwrap();
    // ruta sin hint reconocible: la dirección la pone el operador
    store
        .set("trips/t3", json!({"label": "Circular", "active": true}))
        .await
        .unwrap();
}

fn setup() -> (Arc<MemoryStore>, RosterService, CheckinService) {
    let store = Arc::new(MemoryStore::new());
    let roster = RosterService::new(store.clone());
    let checkin = CheckinService::new(store.clone());
    (store, roster, checkin)
}

#[tokio::test]
async fn unknown_code_reports_not_found_and_writes_nothing() {
    let (store, _, checkin) = setup();

    let result = checkin
        .register_on(day(), "ZZ99", Some(Direction::Ida), None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(store.get("attendance").await.unwrap(), None);
}

#[tokio::test]
async fn dangling_index_entry_counts_as_not_found() {
    let (store, _, checkin) = setup();

    // índice que apunta a un pasajero inexistente
    store.set("codes/AR01", json!("ghost")).await.unwrap();

    let result = checkin
        .register_on(day(), "ar01", Some(Direction::Ida), None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(store.get("attendance").await.unwrap(), None);
}

#[tokio::test]
async fn empty_code_is_a_validation_error() {
    let (_, _, checkin) = setup();
    let result = checkin
        .register_on(day(), "   ", Some(Direction::Ida), None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn inactive_passenger_is_previewed_but_never_registered() {
    let (store, roster, checkin) = setup();

    let ana = roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();
    roster.toggle_active(&ana.id).await.unwrap();

    // el preview se resuelve igual, para que la vista lo muestre
    let preview = checkin.resolve_code("ar01").await.unwrap();
    assert_eq!(preview.data.name, "Ana Ruiz");
    assert!(!preview.data.active);

    let result = checkin
        .register_on(day(), "ar01", Some(Direction::Ida), None)
        .await;
    match result {
        Err(AppError::InactivePassenger { name, preview }) => {
            assert_eq!(name, "Ana Ruiz");
            assert_eq!(preview["code"], "AR01");
        }
        other => panic!("se esperaba InactivePassenger, vino {:?}", other.err()),
    }
    assert_eq!(store.get("attendance").await.unwrap(), None);
}

#[tokio::test]
async fn trip_hint_forces_direction_over_operator_choice() {
    let (store, roster, checkin) = setup();
    seed_trips(&store).await;
    roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    // el operador eligió VUELTA, pero t1 fuerza IDA
    let outcome = checkin
        .register_on(day(), "AR01", Some(Direction::Vuelta), Some("t1".to_string()))
        .await
        .unwrap();
    assert_eq!(outcome.direction, Direction::Ida);
    assert_eq!(outcome.day, DAY);

    let scope = store
        .get("attendance/2024-03-05/t1")
        .await
        .unwrap()
        .expect("debe existir un registro bajo el scope (día, ruta)");
    let records = scope.as_object().unwrap();
    assert_eq!(records.len(), 1);
    let record = records.values().next().unwrap();
    assert_eq!(record["direction"], "IDA");
    assert_eq!(record["code"], "AR01");
    assert!(record["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn without_trip_the_record_lands_under_the_day_scope() {
    let (store, roster, checkin) = setup();
    roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    let outcome = checkin
        .register_on(day(), "ar01", Some(Direction::Vuelta), None)
        .await
        .unwrap();
    assert_eq!(outcome.direction, Direction::Vuelta);
    assert_eq!(outcome.trip_id, None);

    let scope = store
        .get("attendance/2024-03-05")
        .await
        .unwrap()
        .expect("debe existir el scope del día");
    let record = scope.as_object().unwrap().values().next().unwrap();
    assert_eq!(record["passengerId"], json!(outcome.passenger.id));
    assert_eq!(record["direction"], "VUELTA");
}

#[tokio::test]
async fn default_trip_switches_the_selected_trip() {
    let (store, roster, checkin) = setup();
    seed_trips(&store).await;

    let mut with_default = draft("Bruno Díaz", "456", "BR02");
    with_default.default_trip = Some("t2".to_string());
    roster.create(with_default).await.unwrap();

    // estaba seleccionada t1, pero el pasajero viaja en t2
    let outcome = checkin
        .register_on(day(), "BR02", Some(Direction::Ida), Some("t1".to_string()))
        .await
        .unwrap();
    assert_eq!(outcome.trip_id, Some("t2".to_string()));
    // y t2 fuerza VUELTA
    assert_eq!(outcome.direction, Direction::Vuelta);

    assert!(store
        .get("attendance/2024-03-05/t2")
        .await
        .unwrap()
        .is_some());
    assert_eq!(store.get("attendance/2024-03-05/t1").await.unwrap(), None);
}

#[tokio::test]
async fn missing_direction_without_hint_is_a_validation_error() {
    let (store, roster, checkin) = setup();
    seed_trips(&store).await;
    roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    // t3 no tiene hint reconocible y el operador no eligió dirección
    let result = checkin
        .register_on(day(), "AR01", None, Some("t3".to_string()))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(store.get("attendance").await.unwrap(), None);
}

#[tokio::test]
async fn unknown_selected_trip_is_not_found() {
    let (store, roster, checkin) = setup();
    roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    let result = checkin
        .register_on(day(), "AR01", Some(Direction::Ida), Some("nope".to_string()))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(store.get("attendance").await.unwrap(), None);
}

#[tokio::test]
async fn snapshotted_code_survives_a_later_rename() {
    let (store, roster, checkin) = setup();
    let ana = roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    checkin
        .register_on(day(), "AR01", Some(Direction::Ida), None)
        .await
        .unwrap();
    roster
        .update(&ana.id, draft("Ana Ruiz", "123", "XX99"))
        .await
        .unwrap();

    // el registro conserva el código con el que se escaneó
    let scope = store.get("attendance/2024-03-05").await.unwrap().unwrap();
    let record = scope.as_object().unwrap().values().next().unwrap();
    assert_eq!(record["code"], "AR01");
}

#[tokio::test]
async fn station_joins_names_and_sorts_descending_by_timestamp() {
    let (store, roster, _) = setup();
    let ana = roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    // registros con timestamps conocidos, el más nuevo al final
    store
        .set(
            "attendance/2024-03-05/r1",
            json!({"passengerId": ana.id, "code": "AR01", "direction": "IDA", "timestamp": 100}),
        )
        .await
        .unwrap();
    store
        .set(
            "attendance/2024-03-05/r2",
            json!({"passengerId": "ghost", "code": "ZZ99", "direction": "VUELTA", "timestamp": 200}),
        )
        .await
        .unwrap();

    let station = CheckinStation::for_day(store.clone(), DAY.to_string())
        .await
        .unwrap();
    let entries = station.entries().await;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].record_id, "r2");
    // pasajero desconocido: nombre de relleno
    assert_eq!(entries[0].name, "(Sin nombre)");
    assert_eq!(entries[1].name, "Ana Ruiz");
}

#[tokio::test]
async fn station_live_list_follows_new_registrations() {
    let (store, roster, checkin) = setup();
    roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    let station = CheckinStation::for_day(store.clone(), DAY.to_string())
        .await
        .unwrap();
    assert!(station.entries().await.is_empty());

    checkin
        .register_on(day(), "AR01", Some(Direction::Ida), None)
        .await
        .unwrap();

    let mut entries = station.entries().await;
    for _ in 0..100 {
        if !entries.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        entries = station.entries().await;
    }
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Ana Ruiz");
    assert_eq!(entries[0].direction, Direction::Ida);
}

#[tokio::test]
async fn selecting_a_trip_swaps_the_attendance_scope() {
    let (store, roster, _) = setup();
    seed_trips(&store).await;
    let ana = roster.create(draft("Ana Ruiz", "123", "AR01")).await.unwrap();

    store
        .set(
            "attendance/2024-03-05/t1/r1",
            json!({"passengerId": ana.id, "code": "AR01", "direction": "IDA", "timestamp": 100}),
        )
        .await
        .unwrap();
    store
        .set(
            "attendance/2024-03-05/t2/r2",
            json!({"passengerId": ana.id, "code": "AR01", "direction": "VUELTA", "timestamp": 200}),
        )
        .await
        .unwrap();

    let mut station = CheckinStation::for_day(store.clone(), DAY.to_string())
        .await
        .unwrap();

    station.select_trip(Some("t1".to_string())).await.unwrap();
    let entries = station.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_id, "r1");

    station.select_trip(Some("t2".to_string())).await.unwrap();
    let entries = station.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_id, "r2");

    // la suscripción vieja quedó liberada: un registro nuevo en t1 ya no
    // toca la lista de la estación
    store
        .set(
            "attendance/2024-03-05/t1/r3",
            json!({"passengerId": ana.id, "code": "AR01", "direction": "IDA", "timestamp": 300}),
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let entries = station.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_id, "r2");
}
