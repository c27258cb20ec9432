use axum::http::StatusCode;
use axum_test::TestServer;
use planthub::api::create_router;
use planthub::catalog::CatalogClient;
use planthub::models::*;
use planthub::store::Store;

/// A server whose catalog points at an unreachable address, so every catalog
/// call exercises the degraded path without touching the network.
fn setup() -> TestServer {
    let store = Store::open_memory().expect("Failed to create store");
    store.migrate().expect("Failed to migrate");
    let app = create_router(store, CatalogClient::new("http://127.0.0.1:9", None));
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_test_plant(server: &TestServer) -> Plant {
    server
        .post("/api/v1/plants")
        .json(&serde_json::json!({
            "name": "Monstera",
            "scientific_name": "Monstera deliciosa",
            "watering": "Average",
            "indoor": true
        }))
        .await
        .json::<Plant>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod plants {
    use super::*;

    #[tokio::test]
    async fn create_returns_the_stored_plant() {
        let server = setup();

        let response = server
            .post("/api/v1/plants")
            .json(&serde_json::json!({ "name": "Monstera" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let plant: Plant = response.json();
        assert!(plant.id > 0);
        assert_eq!(plant.nickname, "Monstera");
        assert_eq!(plant.health, HealthStatus::Good);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_bad_request() {
        let server = setup();
        server
            .post("/api/v1/plants")
            .json(&serde_json::json!({ "id": 425, "name": "Monstera" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/v1/plants")
            .json(&serde_json::json!({ "id": 425, "name": "Pothos" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_and_list_round_trip() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let listed: Vec<Plant> = server.get("/api/v1/plants").await.json();
        assert_eq!(listed.len(), 1);

        let fetched: Plant = server
            .get(&format!("/api/v1/plants/{}", plant.id))
            .await
            .json();
        assert_eq!(fetched.id, plant.id);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let server = setup();

        server
            .get("/api/v1/plants/999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let response = server
            .put(&format!("/api/v1/plants/{}", plant.id))
            .json(&serde_json::json!({ "nickname": "Monty", "health": "fair" }))
            .await;

        response.assert_status_ok();
        let updated: Plant = response.json();
        assert_eq!(updated.nickname, "Monty");
        assert_eq!(updated.health, HealthStatus::Fair);
        assert_eq!(updated.name, "Monstera");
    }

    #[tokio::test]
    async fn delete_removes_the_plant() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        server
            .delete(&format!("/api/v1/plants/{}", plant.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/plants/{}", plant.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn water_stamps_last_watered() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let watered: Plant = server
            .post(&format!("/api/v1/plants/{}/water", plant.id))
            .await
            .json();

        assert!(watered.last_watered.is_some());
    }

    #[tokio::test]
    async fn generate_tasks_degrades_to_empty_when_catalog_is_down() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let response = server
            .post(&format!("/api/v1/plants/{}/generate-tasks", plant.id))
            .await;

        response.assert_status_ok();
        let created: Vec<Task> = response.json();
        assert!(created.is_empty());
    }

    #[tokio::test]
    async fn generate_tasks_for_missing_plant_is_not_found() {
        let server = setup();

        server
            .post("/api/v1/plants/999/generate-tasks")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod tasks {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn create_complete_and_streak() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let task: Task = server
            .post("/api/v1/tasks")
            .json(&serde_json::json!({
                "plant_id": plant.id,
                "kind": "water",
                "due_date": Utc::now(),
                "repeat": "weekly"
            }))
            .await
            .json();
        assert!(!task.completed);
        assert_eq!(task.repeat, Some(RepeatCadence::Weekly));

        let completed: Task = server
            .post(&format!("/api/v1/tasks/{}/complete", task.id))
            .await
            .json();
        assert!(completed.completed);

        let stats: Stats = server.get("/api/v1/stats").await.json();
        assert_eq!(stats.care_streak, 1);
    }

    #[tokio::test]
    async fn upcoming_excludes_completed_and_sorts() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let soon: Task = server
            .post("/api/v1/tasks")
            .json(&serde_json::json!({
                "plant_id": plant.id,
                "kind": "water",
                "due_date": Utc::now() + Duration::hours(1)
            }))
            .await
            .json();
        let later: Task = server
            .post("/api/v1/tasks")
            .json(&serde_json::json!({
                "plant_id": plant.id,
                "kind": "prune",
                "due_date": Utc::now() + Duration::days(3)
            }))
            .await
            .json();
        let done: Task = server
            .post("/api/v1/tasks")
            .json(&serde_json::json!({
                "plant_id": plant.id,
                "kind": "repot",
                "due_date": Utc::now() + Duration::days(1)
            }))
            .await
            .json();
        server
            .post(&format!("/api/v1/tasks/{}/complete", done.id))
            .await
            .assert_status_ok();

        let upcoming: Vec<TaskView> = server.get("/api/v1/tasks/upcoming").await.json();
        let ids: Vec<i64> = upcoming.iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![soon.id, later.id]);
        assert_eq!(upcoming[0].plant_name, "Monstera");
    }

    #[tokio::test]
    async fn due_lookup_matches_the_local_day() {
        let server = setup();
        let plant = create_test_plant(&server).await;
        server
            .post("/api/v1/tasks")
            .json(&serde_json::json!({
                "plant_id": plant.id,
                "kind": "water",
                "due_date": Utc::now()
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let today = chrono::Local::now().date_naive();
        let due: Vec<TaskView> = server
            .get(&format!("/api/v1/tasks/due?date={}", today))
            .await
            .json();

        assert_eq!(due.len(), 1);
    }
}

mod journal {
    use super::*;

    #[tokio::test]
    async fn create_list_and_filter() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        server
            .post("/api/v1/journal")
            .json(&serde_json::json!({ "content": "General note" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/journal")
            .json(&serde_json::json!({ "plant_id": plant.id, "content": "New leaf!" }))
            .await
            .assert_status(StatusCode::CREATED);

        let all: Vec<JournalEntry> = server.get("/api/v1/journal").await.json();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "New leaf!");

        let filtered: Vec<JournalEntry> = server
            .get(&format!("/api/v1/journal?plant_id={}", plant.id))
            .await
            .json();
        assert_eq!(filtered.len(), 1);
    }
}

mod room {
    use super::*;

    #[tokio::test]
    async fn place_update_and_clear() {
        let server = setup();
        let plant = create_test_plant(&server).await;

        let room: RoomLayout = server
            .put(&format!("/api/v1/room/placements/{}", plant.id))
            .json(&serde_json::json!({ "x": "120px", "y": "80px" }))
            .await
            .json();
        assert_eq!(room.layout.len(), 1);

        let room: RoomLayout = server
            .put("/api/v1/room")
            .json(&serde_json::json!({ "theme": "ocean" }))
            .await
            .json();
        assert_eq!(room.theme, RoomTheme::Ocean);
        assert_eq!(room.layout.len(), 1);

        server
            .delete(&format!("/api/v1/room/placements/{}", plant.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let room: RoomLayout = server.get("/api/v1/room").await.json();
        assert!(room.layout.is_empty());
    }

    #[tokio::test]
    async fn removing_a_plant_clears_its_placement() {
        let server = setup();
        let plant = create_test_plant(&server).await;
        server
            .put(&format!("/api/v1/room/placements/{}", plant.id))
            .json(&serde_json::json!({ "x": "10px", "y": "20px" }))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/api/v1/plants/{}", plant.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let room: RoomLayout = server.get("/api/v1/room").await.json();
        assert!(room.layout.is_empty());
    }
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn partial_update_preserves_the_rest() {
        let server = setup();

        let settings: Settings = server
            .put("/api/v1/settings")
            .json(&serde_json::json!({ "dark_mode": true }))
            .await
            .json();

        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert!(settings.water_reminders);
    }
}

mod snapshots {
    use super::*;

    #[tokio::test]
    async fn export_then_import_restores_collections() {
        let server = setup();
        create_test_plant(&server).await;
        server
            .post("/api/v1/journal")
            .json(&serde_json::json!({ "content": "Repotted" }))
            .await
            .assert_status(StatusCode::CREATED);

        let snapshot = server.get("/api/v1/export").await.text();

        let fresh = setup();
        fresh
            .post("/api/v1/import")
            .text(snapshot)
            .await
            .assert_status_ok();

        let plants: Vec<Plant> = fresh.get("/api/v1/plants").await.json();
        assert_eq!(plants.len(), 1);
        let journal: Vec<JournalEntry> = fresh.get("/api/v1/journal").await.json();
        assert_eq!(journal.len(), 1);
    }

    #[tokio::test]
    async fn malformed_import_is_rejected_without_side_effects() {
        let server = setup();
        create_test_plant(&server).await;

        server
            .post("/api/v1/import")
            .text("not json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let plants: Vec<Plant> = server.get("/api/v1/plants").await.json();
        assert_eq!(plants.len(), 1);
    }
}

mod catalog {
    use super::*;
    use planthub::catalog::{CareGuide, PestDisease, SpeciesPage, SpeciesSummary};

    #[tokio::test]
    async fn search_degrades_to_an_empty_page() {
        let server = setup();

        let response = server.get("/api/v1/catalog/search?q=monstera").await;

        response.assert_status_ok();
        let page: SpeciesPage = response.json();
        assert!(page.species.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn species_detail_degrades_to_null() {
        let server = setup();

        let detail: Option<SpeciesSummary> =
            server.get("/api/v1/catalog/species/425").await.json();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn care_guide_degrades_to_null() {
        let server = setup();

        let guide: Option<CareGuide> = server
            .get("/api/v1/catalog/species/425/care-guide")
            .await
            .json();
        assert!(guide.is_none());
    }

    #[tokio::test]
    async fn pests_degrade_to_an_empty_list() {
        let server = setup();

        let pests: Vec<PestDisease> =
            server.get("/api/v1/catalog/species/425/pests").await.json();
        assert!(pests.is_empty());
    }
}
