use crate::domain::EntriesPayload;
use crate::interface_adapters::state::AppState;
use crate::use_cases::CollectEntriesUseCase;
use axum::{Json, extract::State};
use std::sync::Arc;

// Failures are reported inside the payload, so this always answers 200.
#[tracing::instrument(name = "notion_entries", skip_all)]
pub async fn notion_entries(State(state): State<Arc<AppState>>) -> Json<EntriesPayload> {
    let use_case = CollectEntriesUseCase {
        database: Arc::clone(&state.database),
        slots: state.slots.clone(),
    };

    let payload = use_case.execute().await;
    tracing::info!("entries collected.");

    Json(payload)
}
