use axum::Json;
use serde::Serialize;

/// Success envelope shared by every JSON endpoint: `{ success, message?, ...data }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data,
        })
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data,
        })
    }
}

/// Payload for endpoints that only report a message.
#[derive(Debug, Serialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let Json(resp) = ApiResponse::with_message("done", Payload { count: 2 });
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_envelope_omits_missing_message() {
        let Json(resp) = ApiResponse::ok(Empty {});
        let json = serde_json::to_value(resp).unwrap();
        assert!(json.get("message").is_none());
    }
}
