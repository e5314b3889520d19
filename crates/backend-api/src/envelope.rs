use serde::Deserialize;

use crate::ApiError;

/// Standard response wrapper used by every backend endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope into its payload. A `success=false` response
    /// becomes `ApiError::Backend` carrying the server's message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Backend(
                self.error.unwrap_or_else(|| "Operation failed".to_string()),
            ));
        }

        self.data.ok_or_else(|| {
            ApiError::Backend("Backend reported success without a payload".to_string())
        })
    }

    /// Check only the success flag, for endpoints that return no
    /// payload (delivery status updates and the like).
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Backend(
                self.error.unwrap_or_else(|| "Operation failed".to_string()),
            ))
        }
    }
}

/// Payload of creation endpoints: the backend-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_data() {
        let envelope: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2, 3]}"#).unwrap();

        assert_eq!(envelope.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_envelope_surfaces_backend_message() {
        let envelope: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"success": false, "error": "Insufficient stock for product 4"}"#)
                .unwrap();

        match envelope.into_result() {
            Err(ApiError::Backend(message)) => {
                assert_eq!(message, "Insufficient stock for product 4")
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_data_is_a_backend_error() {
        let envelope: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();

        assert!(matches!(envelope.into_result(), Err(ApiError::Backend(_))));
    }

    #[test]
    fn test_into_unit_ignores_missing_data() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": true, "message": "Updated"}"#).unwrap();

        assert!(envelope.into_unit().is_ok());
    }

    #[test]
    fn test_created_response_decodes_id() {
        let envelope: ApiEnvelope<CreatedResponse> =
            serde_json::from_str(r#"{"success": true, "data": {"id": 42}}"#).unwrap();

        assert_eq!(envelope.into_result().unwrap().id, 42);
    }
}
