use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::AppState;
use crate::models::*;
use crate::scheduler::DEFAULT_UPCOMING_WINDOW_DAYS;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
///
/// Validation errors (duplicate plant id) are safe to expose and come back
/// as BAD_REQUEST.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();

    if msg.contains("already exists") {
        tracing::warn!("Validation error: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {}", msg);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Plants
// ============================================================

pub async fn list_plants(State(state): State<AppState>) -> Json<Vec<Plant>> {
    Json(state.store.all_plants())
}

pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>, (StatusCode, String)> {
    state
        .store
        .get_plant(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Plant not found".to_string()))
}

pub async fn add_plant(
    State(state): State<AppState>,
    Json(input): Json<CreatePlantInput>,
) -> Result<(StatusCode, Json<Plant>), (StatusCode, String)> {
    state
        .store
        .add_plant(input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(internal_error)
}

pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePlantInput>,
) -> Result<Json<Plant>, (StatusCode, String)> {
    state
        .store
        .update_plant(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Plant not found".to_string()))
}

pub async fn remove_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.remove_plant(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Plant not found".to_string()))
    }
}

pub async fn water_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>, (StatusCode, String)> {
    state
        .store
        .water_plant(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Plant not found".to_string()))
}

pub async fn fertilize_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>, (StatusCode, String)> {
    state
        .store
        .fertilize_plant(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Plant not found".to_string()))
}

/// Fetch the plant's care guide from the catalog and derive recurring tasks.
/// A catalog failure degrades to "no guide"; the worst outcome is zero
/// generated tasks.
pub async fn generate_plant_tasks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    state
        .store
        .get_plant(id)
        .ok_or((StatusCode::NOT_FOUND, "Plant not found".to_string()))?;

    let sections = match state.catalog.care_guide(id).await {
        Ok(Some(guide)) => guide.sections,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("Care guide fetch failed for species {}: {}", id, e);
            Vec::new()
        }
    };

    state
        .store
        .generate_care_tasks(id, &sections)
        .map(Json)
        .map_err(internal_error)
}

// ============================================================
// Tasks
// ============================================================

pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.all_tasks())
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, (StatusCode, String)> {
    state
        .store
        .get_task(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    state
        .store
        .add_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error)
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, (StatusCode, String)> {
    state
        .store
        .update_task(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn remove_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.remove_task(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Task not found".to_string()))
    }
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, (StatusCode, String)> {
    state
        .store
        .complete_task(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

/// Query parameters for the upcoming-tasks window.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

pub async fn upcoming_tasks(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Json<Vec<TaskView>> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_WINDOW_DAYS);
    Json(state.store.upcoming_tasks(days))
}

/// Query parameters for the due-tasks lookup.
#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub date: NaiveDate,
}

pub async fn tasks_for_date(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> Json<Vec<TaskView>> {
    Json(state.store.tasks_for_date(query.date))
}

// ============================================================
// Journal
// ============================================================

/// Query parameters for listing journal entries.
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    pub plant_id: Option<i64>,
}

pub async fn list_journal(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Json<Vec<JournalEntry>> {
    Json(state.store.entries(query.plant_id))
}

pub async fn add_journal_entry(
    State(state): State<AppState>,
    Json(input): Json<CreateJournalInput>,
) -> Result<(StatusCode, Json<JournalEntry>), (StatusCode, String)> {
    state
        .store
        .add_entry(input)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(internal_error)
}

pub async fn update_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateJournalInput>,
) -> Result<Json<JournalEntry>, (StatusCode, String)> {
    state
        .store
        .update_entry(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Journal entry not found".to_string()))
}

pub async fn remove_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.remove_entry(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Journal entry not found".to_string()))
    }
}

// ============================================================
// Room
// ============================================================

pub async fn get_room(State(state): State<AppState>) -> Json<RoomLayout> {
    Json(state.store.room())
}

pub async fn update_room(
    State(state): State<AppState>,
    Json(input): Json<UpdateRoomInput>,
) -> Result<Json<RoomLayout>, (StatusCode, String)> {
    state.store.update_room(input).map(Json).map_err(internal_error)
}

pub async fn set_layout(
    State(state): State<AppState>,
    Json(layout): Json<Vec<Placement>>,
) -> Result<Json<RoomLayout>, (StatusCode, String)> {
    state.store.set_layout(layout).map(Json).map_err(internal_error)
}

/// Body for placing a plant in the room.
#[derive(Debug, Deserialize)]
pub struct PlaceInput {
    pub x: String,
    pub y: String,
}

pub async fn place_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<i64>,
    Json(input): Json<PlaceInput>,
) -> Result<Json<RoomLayout>, (StatusCode, String)> {
    state
        .store
        .place_plant(plant_id, input.x, input.y)
        .map(Json)
        .map_err(internal_error)
}

pub async fn remove_placement(
    State(state): State<AppState>,
    Path(plant_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state
        .store
        .remove_placement(plant_id)
        .map_err(internal_error)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Placement not found".to_string()))
    }
}

// ============================================================
// Settings / stats
// ============================================================

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store.settings())
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateSettingsInput>,
) -> Result<Json<Settings>, (StatusCode, String)> {
    state
        .store
        .update_settings(input)
        .map(Json)
        .map_err(internal_error)
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.store.stats())
}

// ============================================================
// Snapshots
// ============================================================

pub async fn export_data(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state.store.export_data().map(Json).map_err(internal_error)
}

/// Import a snapshot. A malformed body is a BAD_REQUEST with nothing
/// applied.
pub async fn import_data(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match state.store.import_data(&body) {
        Ok(()) => Ok(Json(serde_json::json!({ "imported": true }))),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

// ============================================================
// Catalog proxy
// ============================================================

use crate::catalog::{CareGuide, PestDisease, SpeciesPage, SpeciesQuery, SpeciesSummary};

/// Species search. Catalog failure degrades to an empty page.
pub async fn catalog_search(
    State(state): State<AppState>,
    Query(query): Query<SpeciesQuery>,
) -> Json<SpeciesPage> {
    match state.catalog.search_species(&query).await {
        Ok(page) => Json(page),
        Err(e) => {
            tracing::warn!("Catalog search failed: {}", e);
            Json(SpeciesPage::default())
        }
    }
}

/// Species detail. Catalog failure degrades to `null`.
pub async fn catalog_species(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<Option<SpeciesSummary>> {
    match state.catalog.species_detail(id).await {
        Ok(species) => Json(Some(species)),
        Err(e) => {
            tracing::warn!("Species detail fetch failed for {}: {}", id, e);
            Json(None)
        }
    }
}

/// Care guide. Catalog failure degrades to `null`.
pub async fn catalog_care_guide(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<Option<CareGuide>> {
    match state.catalog.care_guide(id).await {
        Ok(guide) => Json(guide),
        Err(e) => {
            tracing::warn!("Care guide fetch failed for {}: {}", id, e);
            Json(None)
        }
    }
}

/// Pest/disease listing. Catalog failure degrades to an empty list.
pub async fn catalog_pests(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<Vec<PestDisease>> {
    match state.catalog.pest_diseases(id).await {
        Ok(pests) => Json(pests),
        Err(e) => {
            tracing::warn!("Pest listing failed for {}: {}", id, e);
            Json(Vec::new())
        }
    }
}
