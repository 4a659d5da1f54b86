use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Room identifier used when the widget does not send one.
pub const DEFAULT_ROOM_ID: &str = "default-room";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
}

// ============= Error Types =============

/// Request rejections surfaced to the client. Pipeline failures never land
/// here: model faults become topic fallbacks and anything escaping the
/// pipeline is answered with the fixed apology, so rejection happens only
/// before a turn starts.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_accepts_camel_case_room_id() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"ciao","roomId":"camera-12"}"#).unwrap();
        assert_eq!(req.message, "ciao");
        assert_eq!(req.room_id.as_deref(), Some("camera-12"));
    }

    #[test]
    fn chat_request_room_id_is_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"ciao"}"#).unwrap();
        assert!(req.room_id.is_none());
    }

    #[test]
    fn invalid_input_maps_to_bad_request() {
        use axum::response::IntoResponse;
        let response =
            AppError::InvalidInput("Il messaggio è obbligatorio".to_string()).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn chat_response_serializes_room_id_camel_case() {
        let resp = ChatResponse {
            response: "Salve!".to_string(),
            room_id: "camera-12".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["roomId"], "camera-12");
    }
}
