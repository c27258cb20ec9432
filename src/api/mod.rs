mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::CatalogClient;
use crate::store::Store;

/// Shared state for the HTTP surface: the persistent store and the external
/// catalog client.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub catalog: CatalogClient,
}

pub fn create_router(store: Store, catalog: CatalogClient) -> Router {
    let api = Router::new()
        // Plants
        .route("/plants", get(handlers::list_plants))
        .route("/plants", post(handlers::add_plant))
        .route("/plants/{id}", get(handlers::get_plant))
        .route("/plants/{id}", put(handlers::update_plant))
        .route("/plants/{id}", delete(handlers::remove_plant))
        .route("/plants/{id}/water", post(handlers::water_plant))
        .route("/plants/{id}/fertilize", post(handlers::fertilize_plant))
        .route("/plants/{id}/generate-tasks", post(handlers::generate_plant_tasks))
        // Tasks
        .route("/tasks", get(handlers::list_tasks))
        .route("/tasks", post(handlers::add_task))
        .route("/tasks/upcoming", get(handlers::upcoming_tasks))
        .route("/tasks/due", get(handlers::tasks_for_date))
        .route("/tasks/{id}", get(handlers::get_task))
        .route("/tasks/{id}", put(handlers::update_task))
        .route("/tasks/{id}", delete(handlers::remove_task))
        .route("/tasks/{id}/complete", post(handlers::complete_task))
        // Journal
        .route("/journal", get(handlers::list_journal))
        .route("/journal", post(handlers::add_journal_entry))
        .route("/journal/{id}", put(handlers::update_journal_entry))
        .route("/journal/{id}", delete(handlers::remove_journal_entry))
        // Room
        .route("/room", get(handlers::get_room))
        .route("/room", put(handlers::update_room))
        .route("/room/layout", put(handlers::set_layout))
        .route("/room/placements/{plant_id}", put(handlers::place_plant))
        .route("/room/placements/{plant_id}", delete(handlers::remove_placement))
        // Settings / stats
        .route("/settings", get(handlers::get_settings))
        .route("/settings", put(handlers::update_settings))
        .route("/stats", get(handlers::get_stats))
        // Snapshots
        .route("/export", get(handlers::export_data))
        .route("/import", post(handlers::import_data))
        // Catalog proxy
        .route("/catalog/search", get(handlers::catalog_search))
        .route("/catalog/species/{id}", get(handlers::catalog_species))
        .route("/catalog/species/{id}/care-guide", get(handlers::catalog_care_guide))
        .route("/catalog/species/{id}/pests", get(handlers::catalog_pests))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { store, catalog })
}
