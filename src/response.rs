use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Response envelope shared by every endpoint:
/// `{"status":"success","message"?:…,"data"?:…}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: "success",
        message: None,
        data: Some(data),
    })
}

pub fn ok_msg<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: "success",
        message: Some(message.to_string()),
        data: Some(data),
    })
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok_msg(message, data))
}

pub fn message_only(message: &str) -> Json<Envelope<()>> {
    Json(Envelope {
        status: "success",
        message: Some(message.to_string()),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_fields() {
        let Json(env) = message_only("done");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "done");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn envelope_carries_data() {
        let Json(env) = ok(serde_json::json!({ "n": 1 }));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["data"]["n"], 1);
        assert!(json.get("message").is_none());
    }
}
