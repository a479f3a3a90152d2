//! Standard response envelope
//!
//! Every API response, success or failure, is wrapped as
//! `{status, code, message, data?, meta?}`.

use crate::pagination::PaginationMeta;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Envelope status string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client error (4xx)
    Error,
    /// Server error (5xx)
    Fail,
}

impl ResponseStatus {
    /// Status reported for a failed request with the given HTTP code
    pub fn for_error_code(code: u16) -> Self {
        if code >= 500 {
            Self::Fail
        } else {
            Self::Error
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            code,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    /// 200 response carrying one page of results
    pub fn paginated(message: impl Into<String>, data: T, meta: PaginationMeta) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::for_error_code(code),
            code,
            message: message.into(),
            data: None,
            meta: None,
        }
    }

    /// Error response that still carries a payload, e.g. a failed sync log
    pub fn error_with_data(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::error(code, message)
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization_omits_meta() {
        let response = ApiResponse::success(200, "ok", vec![1, 2, 3]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn test_null_data_is_serialized_when_present_as_none() {
        let response: ApiResponse<Option<u32>> =
            ApiResponse::success(200, "No sync log found", None);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["data"].is_null());
        assert!(json.as_object().unwrap().contains_key("data"));
    }

    #[test]
    fn test_error_status_by_code() {
        assert_eq!(ResponseStatus::for_error_code(400), ResponseStatus::Error);
        assert_eq!(ResponseStatus::for_error_code(404), ResponseStatus::Error);
        assert_eq!(ResponseStatus::for_error_code(500), ResponseStatus::Fail);
        assert_eq!(ResponseStatus::for_error_code(503), ResponseStatus::Fail);
    }

    #[test]
    fn test_error_with_data() {
        let response = ApiResponse::error_with_data(500, "Failed to sync movies", "log");
        assert_eq!(response.status, ResponseStatus::Fail);
        assert_eq!(response.data, Some("log"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiResponse::success(201, "created", 1).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
