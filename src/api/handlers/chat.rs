use crate::{
    service::APOLOGY_RESPONSE,
    types::{AppError, ChatRequest, ChatResponse, Result, DEFAULT_ROOM_ID},
    AppState,
};
use axum::{extract::State, Json};
use tracing::error;

/// Send a guest message to the concierge
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Concierge reply", body = ChatResponse),
        (status = 400, description = "Missing or empty message")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    // Input validation happens before any state mutation.
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Il messaggio è obbligatorio".to_string(),
        ));
    }

    let room_id = payload
        .room_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ROOM_ID.to_string());

    // The pipeline itself recovers model failures with topic fallbacks;
    // anything escaping it (a panic in a classifier, say) is answered with
    // the fixed apology and the best-known room id instead of a 500.
    let service = state.service.clone();
    let message = payload.message.clone();
    let task_room = room_id.clone();
    let response = match tokio::spawn(async move {
        service.process_message(&message, &task_room).await
    })
    .await
    {
        Ok(reply) => reply,
        Err(join_err) => {
            error!(room_id = %room_id, error = %join_err, "turn pipeline aborted");
            APOLOGY_RESPONSE.to_string()
        }
    };

    Ok(Json(ChatResponse { response, room_id }))
}

/// Liveness probe for the widget.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Villa Petriolo Concierge API attiva"
    }))
}
